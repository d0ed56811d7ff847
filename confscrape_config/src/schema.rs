use confscrape_core::ReportPaths;
use confscrape_fetch::FetcherConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub gender: GenderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SourceConfig {
    /// Session page URL; `id=<session_id>` is appended to its query string.
    #[serde(default = "SourceConfig::default_base_url")]
    pub base_url: String,
    /// Newline-delimited session identifier file.
    #[serde(default = "SourceConfig::default_session_ids")]
    pub session_ids: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            session_ids: Self::default_session_ids(),
        }
    }
}

impl SourceConfig {
    fn default_base_url() -> String {
        "https://lps25.esa.int/programme/programme-session/".to_string()
    }

    fn default_session_ids() -> PathBuf {
        PathBuf::from("session_ids.txt")
    }

    pub fn base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base_url {:?}: {e}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("base_url must be an http or https URL: {}", self.base_url);
        }
        Ok(url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_dir")]
    pub dir: PathBuf,
    #[serde(default = "OutputConfig::default_prefix")]
    pub prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
            prefix: Self::default_prefix(),
        }
    }
}

impl OutputConfig {
    fn default_dir() -> PathBuf {
        PathBuf::from(".")
    }

    fn default_prefix() -> String {
        "esa_lps25".to_string()
    }

    #[must_use]
    pub fn report_paths(&self, dir_override: Option<&Path>) -> ReportPaths {
        ReportPaths::new(dir_override.unwrap_or(self.dir.as_path()), &self.prefix)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenderConfig {
    /// Full `nam_dict.txt` dictionary; `~/confscrape/nam_dict.txt` when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
    /// Source of the full dictionary (gender-guesser's published `nam_dict.txt`).
    #[serde(default = "GenderConfig::default_dictionary_url")]
    pub dictionary_url: String,
    /// Download the dictionary on first use when the default file is missing.
    #[serde(default = "GenderConfig::default_auto_download")]
    pub auto_download: bool,
}

impl Default for GenderConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            dictionary_url: Self::default_dictionary_url(),
            auto_download: Self::default_auto_download(),
        }
    }
}

impl GenderConfig {
    fn default_dictionary_url() -> String {
        "https://raw.githubusercontent.com/lead-ratings/gender-guesser/master/gender_guesser/data/nam_dict.txt"
            .to_string()
    }

    const fn default_auto_download() -> bool {
        true
    }

    /// Where the full dictionary is read from and downloaded to.
    pub fn dictionary_path(&self) -> anyhow::Result<PathBuf> {
        match &self.dictionary {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_dir()?.join(DICTIONARY_FILE)),
        }
    }
}

const DICTIONARY_FILE: &str = "nam_dict.txt";

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("confscrape"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load from an explicit path, or from `~/confscrape/config.json`.
    ///
    /// A missing default file falls back to built-in defaults; a missing
    /// explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found at: {}", path.display());
                }
                Self::from_file(path)?
            }
            None => {
                let path = Self::default_path()?;
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    info!(
                        "No config file at {}, using built-in defaults",
                        path.display()
                    );
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.source.base_url()?;
        if self.output.prefix.trim().is_empty() {
            anyhow::bail!("output.prefix must not be empty");
        }
        if self.fetcher.settle_delay_secs >= self.fetcher.timeout_secs {
            anyhow::bail!(
                "fetcher.settle_delay_secs ({}) must be less than fetcher.timeout_secs ({})",
                self.fetcher.settle_delay_secs,
                self.fetcher.timeout_secs
            );
        }
        let dictionary_url = Url::parse(&self.gender.dictionary_url).map_err(|e| {
            anyhow::anyhow!(
                "Invalid gender.dictionary_url {:?}: {e}",
                self.gender.dictionary_url
            )
        })?;
        if !matches!(dictionary_url.scheme(), "http" | "https") {
            anyhow::bail!(
                "gender.dictionary_url must be an http or https URL: {}",
                self.gender.dictionary_url
            );
        }
        Ok(())
    }

    /// Write the default configuration as a template. Refuses to overwrite.
    pub fn create_config(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
        let config_path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let template = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(&config_path, template + "\n")?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Put one session id per line in the file named by source.session_ids");
        println!("   2. Make sure Chrome or Chromium is installed (or set fetcher.chrome_path)");
        println!("   3. Run 'confscrape scrape' to build the session tables");
        println!();
        println!("🔧 Configuration options:");
        println!("   - fetcher.backend: browser (renders JavaScript) or http (static pages)");
        println!("   - fetcher.settle_delay_secs: wait after navigation before reading text");
        println!("   - gender.dictionary: path to the nam_dict.txt first-name dictionary");
        println!("     (downloaded on first use, or run 'confscrape dictionary')");
        println!();
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confscrape_fetch::FetchBackend;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(
            config.source.base_url,
            "https://lps25.esa.int/programme/programme-session/"
        );
        assert_eq!(config.source.session_ids, PathBuf::from("session_ids.txt"));
        assert_eq!(config.output.prefix, "esa_lps25");
        assert_eq!(config.fetcher.backend, FetchBackend::Browser);
        assert!(config.gender.dictionary.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_uses_defaults() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"fetcher": {"backend": "http"}, "output": {"prefix": "lps"}}"#,
        )?;

        let config = Config::load(Some(&path))?;
        assert_eq!(config.fetcher.backend, FetchBackend::Http);
        assert_eq!(config.fetcher.settle_delay_secs, 5);
        assert_eq!(config.output.prefix, "lps");
        assert_eq!(config.output.dir, PathBuf::from("."));
        Ok(())
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = Config::load(Some(Path::new("/nonexistent/confscrape.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let mut config = Config::default();
        config.source.base_url = "ftp://example.org/".to_string();
        assert!(config.validate().is_err());
        config.source.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_settle_delay_must_be_below_timeout() {
        let mut config = Config::default();
        config.fetcher.settle_delay_secs = 60;
        config.fetcher.timeout_secs = 60;
        assert!(config.validate().is_err());

        config.fetcher.settle_delay_secs = 90;
        assert!(config.validate().is_err());

        config.fetcher.settle_delay_secs = 59;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_gender_defaults_point_at_full_dictionary() -> anyhow::Result<()> {
        let config = Config::default();
        assert!(config.gender.auto_download);
        assert!(config.gender.dictionary_url.ends_with("/nam_dict.txt"));
        assert_eq!(
            config.gender.dictionary_path()?,
            Config::config_dir()?.join("nam_dict.txt")
        );

        let gender = GenderConfig {
            dictionary: Some(PathBuf::from("/data/nam_dict.txt")),
            ..GenderConfig::default()
        };
        assert_eq!(gender.dictionary_path()?, PathBuf::from("/data/nam_dict.txt"));
        Ok(())
    }

    #[test]
    fn test_invalid_dictionary_url_is_rejected() {
        let mut config = Config::default();
        config.gender.dictionary_url = "file:///tmp/nam_dict.txt".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_create_config_refuses_overwrite() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("nested").join("config.json");

        let created = Config::create_config(Some(&path))?;
        assert_eq!(created, path);
        let reloaded = Config::load(Some(&path))?;
        assert_eq!(reloaded.output.prefix, "esa_lps25");

        assert!(Config::create_config(Some(&path)).is_err());
        Ok(())
    }

    #[test]
    fn test_report_paths_override_dir() {
        let output = OutputConfig::default();
        let paths = output.report_paths(Some(Path::new("/tmp/out")));
        assert_eq!(
            paths.panel,
            PathBuf::from("/tmp/out/esa_lps25_panel_sessions.csv")
        );
    }
}
