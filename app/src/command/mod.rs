//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! dispatch in `main` is resolved at compile time.

use confscrape_config::Config;
use confscrape_core::GenderDetector;
use std::path::PathBuf;
use tracing::warn;

mod dictionary;
mod extract;
mod gender;
mod info;
mod init;
mod reshape;
mod scrape;
mod version;

pub use dictionary::{DictionaryInput, DictionaryStrategy};
pub use extract::{ExtractInput, ExtractStrategy};
pub use gender::{GenderInput, GenderStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use reshape::{ReshapeInput, ReshapeStrategy};
pub use scrape::{ScrapeInput, ScrapeStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    Config::load(path.map(PathBuf::as_path))
}

/// Detector over the full dictionary.
///
/// An explicitly configured file must exist. Otherwise the default file is
/// downloaded on first use; if that fails, the bundled fallback list is used.
async fn gender_detector(config: &Config) -> anyhow::Result<GenderDetector> {
    if let Some(path) = &config.gender.dictionary {
        return Ok(GenderDetector::from_file(path)?);
    }

    let path = config.gender.dictionary_path()?;
    if !path.exists() && config.gender.auto_download {
        if let Err(e) = dictionary::download_dictionary(config, &path).await {
            warn!("Could not download the name dictionary: {e:#}");
        }
    }

    let available = path.exists().then_some(path);
    Ok(GenderDetector::from_optional_file(available.as_deref())?)
}
