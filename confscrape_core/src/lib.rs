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

use async_trait::async_trait;
use thiserror::Error;

pub mod classify;
pub mod extract;
pub mod gender;
pub mod normalize;
pub mod pipeline;
pub mod record;
pub mod report;

pub use classify::{
    CollectedSessions, OralPosterEntry, PanelRole, PersonRoleEntry, ReshapedTables, is_oral,
    is_panel, is_poster, reshape_panel, reshape_pairwise,
};
pub use extract::{ExtractedFields, extract};
pub use gender::{DictionaryError, GenderDetector, GenderLabel, NameDictionary, infer_gender};
pub use normalize::{normalize_name, strip_digits, strip_honorifics};
pub use pipeline::{collect_sessions, parse_session_ids, read_session_ids, session_url};
pub use record::{ERROR_TITLE, NOT_AVAILABLE, SessionRecord};
pub use report::{RawSessionRow, ReportError, ReportPaths, read_sessions, write_sessions};

/// Failure to obtain the rendered text of a session page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("navigation to {url} failed: {message}")]
    Navigation { url: String, message: String },

    #[error("failed to read page text from {url}: {message}")]
    Render { url: String, message: String },

    #[error("HTTP request to {url} failed: {message}")]
    Http { url: String, message: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("fetch task aborted: {0}")]
    Task(String),
}

/// Source of rendered page text for one session URL.
///
/// Implementations own whatever driver they need for the duration of a
/// single call and release it before returning.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError>;

    fn backend_name(&self) -> &'static str;
}
