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

pub mod browser;
pub mod http;

pub use browser::BrowserFetcher;
pub use http::HttpFetcher;

use confscrape_core::{FetchError, PageFetcher};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchBackend {
    /// Headless Chrome, renders client-side content.
    #[default]
    Browser,
    /// Plain HTTP GET with HTML to text conversion.
    Http,
}

impl fmt::Display for FetchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Browser => f.write_str("browser"),
            Self::Http => f.write_str("http"),
        }
    }
}

impl FromStr for FetchBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "browser" => Ok(Self::Browser),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown fetch backend: {other} (expected browser or http)")),
        }
    }
}

/// Page fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    #[serde(default)]
    pub backend: FetchBackend,

    /// Wait after navigation for client-side rendering (seconds)
    #[serde(default = "FetcherConfig::default_settle_delay")]
    pub settle_delay_secs: u64,

    #[serde(default = "FetcherConfig::default_headless")]
    pub headless: bool,

    /// Chrome sandbox; usually disabled inside containers
    #[serde(default)]
    pub sandbox: bool,

    /// Chrome/Chromium executable; auto-detected when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,

    /// Per-request timeout (seconds)
    #[serde(default = "FetcherConfig::default_timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for the HTTP backend
    #[serde(default = "FetcherConfig::default_user_agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    const fn default_settle_delay() -> u64 {
        5
    }

    const fn default_headless() -> bool {
        true
    }

    const fn default_timeout() -> u64 {
        60
    }

    fn default_user_agent() -> String {
        "Mozilla/5.0 (compatible; confscrape/0.1)".to_string()
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            backend: FetchBackend::default(),
            settle_delay_secs: Self::default_settle_delay(),
            headless: Self::default_headless(),
            sandbox: false,
            chrome_path: None,
            timeout_secs: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
        }
    }
}

/// Fetcher for the configured backend.
pub fn build_fetcher(config: &FetcherConfig) -> Result<Box<dyn PageFetcher>, FetchError> {
    match config.backend {
        FetchBackend::Browser => Ok(Box::new(BrowserFetcher::new(config.clone()))),
        FetchBackend::Http => Ok(Box::new(HttpFetcher::new(config)?)),
    }
}
