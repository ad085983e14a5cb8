//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use movie_service::config::ServiceConfig;
use movie_service::http::HttpServer;
use movie_service::lifecycle::Shutdown;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A movie service running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    /// Start a server with the given configuration on 127.0.0.1:0.
    pub async fn start(config: ServiceConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shutdown = Shutdown::new();
        let server = HttpServer::new(config);
        let server_shutdown = shutdown.subscribe();
        let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    /// Start a server with default (seeded) configuration.
    pub async fn start_default() -> Self {
        Self::start(ServiceConfig::default()).await
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server task to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not shut down in time")
            .unwrap()
            .unwrap();
    }
}

/// HTTP client that never reuses connections, so shutdown is not held up.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
