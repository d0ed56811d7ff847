use confscrape_config::Config;
use std::path::PathBuf;

/// Strategy for writing the default configuration file.
///
/// # Design
/// - Writes to `--config` when given, otherwise `~/confscrape/config.json`
/// - Never overwrites an existing file
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        Config::create_config(input.as_deref())?;
        Ok(())
    }
}
