use std::path::PathBuf;

use super::{gender_detector, load_config};

/// Input parameters for the Gender command strategy.
#[derive(Debug, Clone)]
pub struct GenderInput {
    pub config: Option<PathBuf>,
    pub names: Vec<String>,
}

/// Strategy for labelling names from the command line.
#[derive(Debug, Clone, Copy)]
pub struct GenderStrategy;

impl super::CommandStrategy for GenderStrategy {
    type Input = GenderInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = load_config(input.config.as_ref())?;
        let detector = gender_detector(&config).await?;

        for name in &input.names {
            println!("{name}\t{}", detector.infer_gender(name));
        }
        Ok(())
    }
}
