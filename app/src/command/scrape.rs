use anyhow::Context;
use confscrape_core::{collect_sessions, read_session_ids, write_sessions};
use confscrape_fetch::{FetchBackend, build_fetcher};
use std::path::PathBuf;
use tracing::{info, warn};

use super::{gender_detector, load_config};

/// Input parameters for the Scrape command strategy.
#[derive(Debug, Clone)]
pub struct ScrapeInput {
    pub config: Option<PathBuf>,
    /// Session id file override
    pub ids: Option<PathBuf>,
    /// Fetch backend override
    pub backend: Option<FetchBackend>,
    /// Output directory override
    pub out: Option<PathBuf>,
}

/// Strategy for the full scrape pipeline.
///
/// Fetches each session page in turn, extracts its roles, writes the raw
/// session table, then classifies and reshapes the batch into the oral,
/// poster and panel tables.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeStrategy;

impl super::CommandStrategy for ScrapeStrategy {
    type Input = ScrapeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let mut config = load_config(input.config.as_ref())?;
        if let Some(backend) = input.backend {
            config.fetcher.backend = backend;
        }

        let ids_path = input.ids.unwrap_or_else(|| config.source.session_ids.clone());
        let session_ids = read_session_ids(&ids_path)
            .with_context(|| format!("Failed to read session ids from {}", ids_path.display()))?;
        if session_ids.is_empty() {
            warn!("No session ids in {}", ids_path.display());
        }

        let base_url = config.source.base_url()?;
        let detector = gender_detector(&config).await?;
        let fetcher = build_fetcher(&config.fetcher)?;
        info!(
            "Scraping {} sessions from {base_url} with the {} backend",
            session_ids.len(),
            fetcher.backend_name()
        );

        let collected = collect_sessions(fetcher.as_ref(), &base_url, &session_ids).await;

        let paths = config.output.report_paths(input.out.as_deref());
        write_sessions(&paths.sessions, collected.records())?;

        let tables = collected.reshape(&detector);
        paths.write_tables(&tables)?;

        println!("Sessions:       {}", collected.len());
        println!("Failed:         {}", collected.error_count());
        println!(
            "Oral sessions:  {} ({} rows)",
            collected.oral().len(),
            tables.oral.len()
        );
        println!(
            "Poster sessions: {} ({} rows)",
            collected.poster().len(),
            tables.poster.len()
        );
        println!(
            "Panel sessions: {} ({} rows)",
            collected.panel().len(),
            tables.panel.len()
        );

        Ok(())
    }
}
