//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP layer produces:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (request counters and latency histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape), when enabled
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request span
//! - Metrics go through the `metrics` facade; with no recorder installed they are no-ops

pub mod logging;
pub mod metrics;
