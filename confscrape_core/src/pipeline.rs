//! Sequential batch loop: fetch, extract, accumulate.

use std::path::Path;
use tracing::{info, warn};
use url::Url;

use crate::classify::CollectedSessions;
use crate::extract::extract;
use crate::record::SessionRecord;
use crate::PageFetcher;

/// One identifier per line; surrounding whitespace trimmed, blank lines skipped.
#[must_use]
pub fn parse_session_ids(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}

pub fn read_session_ids(path: &Path) -> std::io::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_session_ids(&content))
}

/// Page URL for a session: the base URL with `id=<session_id>` appended to
/// its query string.
#[must_use]
pub fn session_url(base_url: &Url, session_id: &str) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut().append_pair("id", session_id);
    url
}

/// Fetch and extract every session in order.
///
/// A failed fetch is logged and recorded as an `ERROR` placeholder so the
/// batch keeps one record per identifier.
pub async fn collect_sessions<F>(
    fetcher: &F,
    base_url: &Url,
    session_ids: &[String],
) -> CollectedSessions
where
    F: PageFetcher + ?Sized,
{
    let total = session_ids.len();
    let mut records = Vec::with_capacity(total);

    for (index, session_id) in session_ids.iter().enumerate() {
        let url = session_url(base_url, session_id);
        info!("Processing session {session_id} ({}/{total})", index + 1);

        match fetcher.fetch_rendered_text(url.as_str()).await {
            Ok(text) => {
                let record = SessionRecord::from_extracted(session_id.clone(), extract(&text));
                records.push(record);
            }
            Err(e) => {
                warn!("Error processing session {session_id}: {e}");
                records.push(SessionRecord::error(session_id.clone()));
            }
        }
    }

    CollectedSessions::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_ids_skips_blank_lines() {
        let ids = parse_session_ids("abc\n\n  def  \r\n\t\nghi");
        assert_eq!(ids, vec!["abc", "def", "ghi"]);
    }

    #[test]
    fn test_session_url_appends_id() {
        let Ok(base) = Url::parse("https://lps25.esa.int/programme/programme-session/") else {
            panic!("valid url");
        };
        let url = session_url(&base, "f0d3-42");
        assert_eq!(
            url.as_str(),
            "https://lps25.esa.int/programme/programme-session/?id=f0d3-42"
        );
    }

    #[test]
    fn test_session_url_encodes_and_keeps_existing_query() {
        let Ok(base) = Url::parse("https://example.org/session?lang=en") else {
            panic!("valid url");
        };
        let url = session_url(&base, "a b&c");
        assert_eq!(url.as_str(), "https://example.org/session?lang=en&id=a+b%26c");
    }
}
