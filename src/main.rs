// starlist entry point.
// Parses the CLI, opens the cache store from the environment, runs the command,
// and guarantees the store is closed on every exit path.

mod cache;
mod error;
mod github;
mod output;
mod stars;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;

use cache::RepoStore;
use error::Result;
use github::GitHubClient;

#[derive(Parser)]
#[command(name = "starlist")]
#[command(about = "List a GitHub user's starred repositories", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a user's starred repositories
    List {
        /// GitHub username to list stars for
        #[arg(short, long)]
        username: String,
        /// Keep only repos with this primary language (repeatable)
        #[arg(short, long = "language")]
        language: Vec<String>,
    },
}

/// DEBUG=true forces debug-level diagnostics (page fetches, rate-limit
/// headers); otherwise RUST_LOG applies, defaulting to warnings only.
fn init_tracing() {
    let env_filter = if std::env::var("DEBUG").is_ok_and(|v| v == "true") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli, store: &dyn RepoStore) -> Result<()> {
    match cli.command {
        Commands::List { username, language } => {
            let languages: Vec<String> = language.iter().map(|l| l.to_lowercase()).collect();

            let client = GitHubClient::new()?;
            let repos = stars::starred_repos(&client, store, &username, &languages).await?;
            output::print_listing(&repos);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut store = cache::open_from_env();
    let result = run(cli, store.as_ref()).await;

    if let Err(e) = store.close() {
        error!("closing cache store: {e}");
        return ExitCode::FAILURE;
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
