//! Headless Chrome backend.
//!
//! Every call launches its own browser process and drops it before
//! returning, so nothing is shared between sessions and a failing page cannot
//! leave a browser behind.

use async_trait::async_trait;
use confscrape_core::{FetchError, PageFetcher};
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use tracing::debug;

use crate::FetcherConfig;

pub struct BrowserFetcher {
    config: FetcherConfig,
}

impl BrowserFetcher {
    #[must_use]
    pub const fn new(config: FetcherConfig) -> Self {
        Self { config }
    }

    fn launch_options(config: &FetcherConfig) -> Result<LaunchOptions<'static>, FetchError> {
        LaunchOptions::default_builder()
            .headless(config.headless)
            .sandbox(config.sandbox)
            .path(config.chrome_path.clone())
            // the connection stays idle through the settle wait
            .idle_browser_timeout(config.timeout() + config.settle_delay())
            .args(vec![OsStr::new("--disable-dev-shm-usage")])
            .build()
            .map_err(|e| FetchError::Launch(e.to_string()))
    }

    /// Blocking body of a fetch. The browser is owned by this frame and is
    /// shut down when it goes out of scope on every return path.
    fn render(config: &FetcherConfig, url: &str) -> Result<String, FetchError> {
        let options = Self::launch_options(config)?;
        let browser = Browser::new(options).map_err(|e| FetchError::Launch(e.to_string()))?;

        let navigation = |e: &dyn std::fmt::Display| FetchError::Navigation {
            url: url.to_string(),
            message: e.to_string(),
        };
        let render = |e: &dyn std::fmt::Display| FetchError::Render {
            url: url.to_string(),
            message: e.to_string(),
        };

        let tab = browser.new_tab().map_err(|e| FetchError::Launch(e.to_string()))?;
        tab.set_default_timeout(config.timeout());
        tab.navigate_to(url).map_err(|e| navigation(&e))?;
        tab.wait_until_navigated().map_err(|e| navigation(&e))?;

        debug!("Navigated to {url}, waiting {}s for rendering", config.settle_delay_secs);
        std::thread::sleep(config.settle_delay());

        let body = tab.wait_for_element("body").map_err(|e| render(&e))?;
        let text = body.get_inner_text().map_err(|e| render(&e))?;

        debug!("Read {} bytes of page text from {url}", text.len());
        Ok(text)
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError> {
        let config = self.config.clone();
        let url = url.to_string();

        tokio::task::spawn_blocking(move || Self::render(&config, &url))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))?
    }

    fn backend_name(&self) -> &'static str {
        "browser"
    }
}
