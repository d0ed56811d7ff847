use anyhow::Context;
use confscrape_core::extract;
use std::path::PathBuf;

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    pub file: PathBuf,
    pub json: bool,
}

/// Strategy for running the field extractor on a saved page text.
///
/// # Design
/// - No network access and no config: the file is the whole input
/// - Useful for checking extraction against a page copied from a browser
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let text = std::fs::read_to_string(&input.file)
            .with_context(|| format!("Failed to read {}", input.file.display()))?;
        let fields = extract(&text);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&fields)?);
            return Ok(());
        }

        println!("Title:      {}", fields.title);
        for (label, names) in [
            ("Chairs", &fields.chairs),
            ("Presenters", &fields.presenters),
            ("Speakers", &fields.speakers),
            ("Moderators", &fields.moderators),
            ("Panelists", &fields.panelists),
        ] {
            if names.is_empty() {
                println!("{label}: (none)");
            } else {
                println!("{label}:");
                for name in names {
                    println!("  - {name}");
                }
            }
        }

        Ok(())
    }
}
