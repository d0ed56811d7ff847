use anyhow::Context;
use confscrape_config::Config;
use confscrape_core::NameDictionary;
use confscrape_fetch::{FetcherConfig, HttpFetcher};
use std::path::{Path, PathBuf};
use tracing::info;

use super::load_config;

/// Input parameters for the Dictionary command strategy.
#[derive(Debug, Clone)]
pub struct DictionaryInput {
    pub config: Option<PathBuf>,
    /// Replace an existing dictionary file
    pub force: bool,
}

/// Strategy for downloading the full first-name dictionary.
///
/// # Design
/// - Writes to `gender.dictionary`, or `~/confscrape/nam_dict.txt`
/// - The download is parsed before it is written, so a broken response
///   never replaces a working file
#[derive(Debug, Clone, Copy)]
pub struct DictionaryStrategy;

impl super::CommandStrategy for DictionaryStrategy {
    type Input = DictionaryInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.config.as_ref())?;
        let path = config.gender.dictionary_path()?;

        if path.exists() && !input.force {
            anyhow::bail!(
                "Name dictionary already exists at: {}. Use --force to replace it.",
                path.display()
            );
        }

        let names = download_dictionary(&config, &path).await?;
        println!("✅ Saved {names} names to {}", path.display());
        Ok(())
    }
}

/// Fetch `gender.dictionary_url`, check that it parses and write it to `path`.
/// Returns the number of names.
pub(super) async fn download_dictionary(config: &Config, path: &Path) -> anyhow::Result<usize> {
    let url = &config.gender.dictionary_url;
    info!("Downloading name dictionary from {url}");

    let fetcher = HttpFetcher::new(&download_settings(&config.fetcher))?;
    let bytes = fetcher.fetch_bytes(url).await?;
    let dictionary = NameDictionary::from_latin1(&bytes)
        .with_context(|| format!("Downloaded file from {url} is not a name dictionary"))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write name dictionary to {}", path.display()))?;

    info!(
        "Saved name dictionary to {} ({} names)",
        path.display(),
        dictionary.len()
    );
    Ok(dictionary.len())
}

/// The dictionary is a few megabytes; allow more than a page fetch.
fn download_settings(fetcher: &FetcherConfig) -> FetcherConfig {
    FetcherConfig {
        timeout_secs: fetcher.timeout_secs.max(120),
        ..fetcher.clone()
    }
}
