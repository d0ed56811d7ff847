use anyhow::Context;
use confscrape_core::{CollectedSessions, read_sessions};
use std::path::PathBuf;
use tracing::info;

use super::{gender_detector, load_config};

/// Input parameters for the Reshape command strategy.
#[derive(Debug, Clone)]
pub struct ReshapeInput {
    pub config: Option<PathBuf>,
    /// Raw session table written by a previous scrape
    pub sessions: PathBuf,
    pub out: Option<PathBuf>,
}

/// Strategy for rebuilding the category tables without refetching.
///
/// # Design
/// - Reads the raw session table back into records
/// - Classification, name normalization and gender inference run again,
///   so a new dictionary or rule change applies to an existing scrape
#[derive(Debug, Clone, Copy)]
pub struct ReshapeStrategy;

impl super::CommandStrategy for ReshapeStrategy {
    type Input = ReshapeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.config.as_ref())?;
        let records = read_sessions(&input.sessions)
            .with_context(|| format!("Failed to read sessions from {}", input.sessions.display()))?;
        info!(
            "Read {} sessions from {}",
            records.len(),
            input.sessions.display()
        );

        let collected = CollectedSessions::from(records);
        let detector = gender_detector(&config).await?;
        let tables = collected.reshape(&detector);

        let paths = config.output.report_paths(input.out.as_deref());
        paths.write_tables(&tables)?;

        println!("Oral rows:   {} -> {}", tables.oral.len(), paths.oral.display());
        println!("Poster rows: {} -> {}", tables.poster.len(), paths.poster.display());
        println!("Panel rows:  {} -> {}", tables.panel.len(), paths.panel.display());
        Ok(())
    }
}
