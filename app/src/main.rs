#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use clap::{Parser, Subcommand};
use confscrape_fetch::FetchBackend;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod command;

use command::{
    CommandStrategy, DictionaryInput, DictionaryStrategy, ExtractInput, ExtractStrategy,
    GenderInput, GenderStrategy, InfoStrategy, InitStrategy, ReshapeInput, ReshapeStrategy,
    ScrapeInput, ScrapeStrategy, VersionStrategy,
};

#[derive(Parser)]
#[command(name = "confscrape")]
#[command(about = "Conference programme scraper: session roles, categories and gender labels", long_about = None)]
struct Cli {
    /// Config file (default: ~/confscrape/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every session page and write the session tables
    Scrape {
        /// Session id file (one id per line)
        #[arg(short, long)]
        ids: Option<PathBuf>,

        /// Fetch backend: browser or http
        #[arg(short, long)]
        backend: Option<FetchBackend>,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Run the extractor on a saved page text
    Extract {
        /// File holding the page's visible text
        file: PathBuf,

        /// Print the fields as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rebuild the oral, poster and panel tables from a raw session table
    Reshape {
        /// Raw session CSV written by `scrape`
        sessions: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Infer gender labels for names
    Gender {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Download the full first-name dictionary
    Dictionary {
        /// Replace an existing dictionary file
        #[arg(long)]
        force: bool,
    },
    /// Initialize configuration
    Init,
    /// Show effective configuration
    Info,
    /// Show version
    Version,
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = cli.config;

    match cli.command {
        Commands::Scrape { ids, backend, out } => {
            ScrapeStrategy
                .execute(ScrapeInput {
                    config,
                    ids,
                    backend,
                    out,
                })
                .await
        }
        Commands::Extract { file, json } => ExtractStrategy.execute(ExtractInput { file, json }).await,
        Commands::Reshape { sessions, out } => {
            ReshapeStrategy
                .execute(ReshapeInput {
                    config,
                    sessions,
                    out,
                })
                .await
        }
        Commands::Gender { names } => GenderStrategy.execute(GenderInput { config, names }).await,
        Commands::Dictionary { force } => {
            DictionaryStrategy
                .execute(DictionaryInput { config, force })
                .await
        }
        Commands::Init => InitStrategy.execute(config).await,
        Commands::Info => InfoStrategy.execute(config).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
