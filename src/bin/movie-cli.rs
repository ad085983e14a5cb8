use clap::{Args, Parser, Subcommand};
use movie_service::movies::{Director, MovieDraft};
use reqwest::Url;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "movie-cli")]
#[command(about = "Command-line client for the movie service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all movies
    List,
    /// Show a single movie
    Get { id: String },
    /// Add a movie
    Create(MovieArgs),
    /// Replace the fields of an existing movie
    Update {
        id: String,
        #[command(flatten)]
        movie: MovieArgs,
    },
    /// Remove a movie
    Delete { id: String },
    /// Check service health
    Health,
}

#[derive(Args)]
struct MovieArgs {
    #[arg(long)]
    isbn: i64,

    #[arg(long)]
    title: String,

    #[arg(long, requires = "last_name")]
    first_name: Option<String>,

    #[arg(long, requires = "first_name")]
    last_name: Option<String>,
}

impl MovieArgs {
    fn into_draft(self) -> MovieDraft {
        let director = match (self.first_name, self.last_name) {
            (Some(first), Some(last)) => Some(Director::new(first, last)),
            _ => None,
        };
        MovieDraft {
            isbn: self.isbn,
            title: self.title,
            director,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cli.command {
        Commands::List => client.get(service_url(&cli.url, &["movies"])?).send().await?,
        Commands::Get { id } => {
            client
                .get(service_url(&cli.url, &["movies", &id])?)
                .send()
                .await?
        }
        Commands::Create(args) => {
            client
                .post(service_url(&cli.url, &["movies"])?)
                .json(&args.into_draft())
                .send()
                .await?
        }
        Commands::Update { id, movie } => {
            client
                .put(service_url(&cli.url, &["movies", &id])?)
                .json(&movie.into_draft())
                .send()
                .await?
        }
        Commands::Delete { id } => {
            client
                .delete(service_url(&cli.url, &["movies", &id])?)
                .send()
                .await?
        }
        Commands::Health => client.get(service_url(&cli.url, &["health"])?).send().await?,
    };

    print_response(res).await
}

/// Append path segments to the service base URL, percent-encoding each one.
fn service_url(base: &str, segments: &[&str]) -> Result<Url, Box<dyn std::error::Error>> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|_| format!("invalid service URL: {}", base))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        let text = res.text().await.unwrap_or_default();
        return Err(format!("movie service returned status {}: {}", status, text).into());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
