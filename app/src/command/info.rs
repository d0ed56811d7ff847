use confscrape_config::Config;
use std::path::PathBuf;

use super::load_config;

/// Strategy for displaying the effective configuration.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.as_ref())?;
        let source = input.map_or_else(
            || {
                Config::default_path().map_or_else(
                    |_| "(built-in defaults)".to_string(),
                    |p| p.display().to_string(),
                )
            },
            |p| p.display().to_string(),
        );

        println!("Config: {source}");
        println!();
        println!("Source:");
        println!("  base_url:    {}", config.source.base_url);
        println!("  session_ids: {}", config.source.session_ids.display());
        println!("Fetcher:");
        println!("  backend:     {}", config.fetcher.backend);
        println!("  settle:      {}s", config.fetcher.settle_delay_secs);
        println!("  timeout:     {}s", config.fetcher.timeout_secs);
        println!("  headless:    {}", config.fetcher.headless);
        println!("Output:");
        println!(
            "  tables:      {}",
            config.output.report_paths(None).sessions.display()
        );
        println!("Gender:");
        let dictionary = config.gender.dictionary_path()?;
        let state = if dictionary.exists() {
            "present"
        } else if config.gender.auto_download {
            "missing, downloaded on first use"
        } else {
            "missing, bundled fallback list in use"
        };
        println!("  dictionary:  {} ({state})", dictionary.display());
        println!("  source:      {}", config.gender.dictionary_url);
        Ok(())
    }
}
