//! Plain HTTP backend for pages that render on the server.

use async_trait::async_trait;
use confscrape_core::{FetchError, PageFetcher};
use regex::Regex;
use reqwest::{Client, Response};
use std::sync::OnceLock;
use tracing::debug;

use crate::FetcherConfig;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Launch(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// GET with the scheme and status checks shared by every request.
    async fn send(&self, url: &str, accept: &str) -> Result<Response, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::Navigation {
            url: url.to_string(),
            message: format!("invalid URL: {e}"),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::Navigation {
                url: url.to_string(),
                message: "only http and https URLs are supported".to_string(),
            });
        }

        let response = self
            .client
            .get(parsed)
            .header("Accept", accept)
            .send()
            .await
            .map_err(|e| http_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// Raw response body, for downloads such as the name dictionary.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.send(url, "*/*").await?;
        let body = response.bytes().await.map_err(|e| http_error(url, &e))?;
        debug!("Downloaded {} bytes from {url}", body.len());
        Ok(body.to_vec())
    }
}

fn http_error(url: &str, e: &reqwest::Error) -> FetchError {
    FetchError::Http {
        url: url.to_string(),
        message: e.to_string(),
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_rendered_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send(url, "text/html, text/plain").await?;

        let is_html = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_none_or(|ct| ct.contains("html"));

        let body = response.text().await.map_err(|e| http_error(url, &e))?;
        debug!("Fetched {} bytes from {url}", body.len());

        Ok(if is_html { html_to_text(&body) } else { body })
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}

static SCRIPT_PATTERN: OnceLock<Regex> = OnceLock::new();
static STYLE_PATTERN: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_PATTERN: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_END_PATTERN: OnceLock<Regex> = OnceLock::new();
static LINE_BREAK_PATTERN: OnceLock<Regex> = OnceLock::new();
static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_PATTERN: OnceLock<Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex patterns validated at compile time"
)]
fn pattern(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("Static regex pattern is guaranteed to be valid"))
}

/// Convert HTML to text, keeping block boundaries as line breaks so the
/// result has the same line structure as the browser's `innerText`.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let html = pattern(&SCRIPT_PATTERN, r"(?is)<script\b.*?</script\s*>").replace_all(html, " ");
    let html = pattern(&STYLE_PATTERN, r"(?is)<style\b.*?</style\s*>").replace_all(&html, " ");
    // Source whitespace is insignificant in HTML; line breaks come from tags.
    let html = pattern(&WHITESPACE_PATTERN, r"\s+").replace_all(&html, " ");
    let html = pattern(&PARAGRAPH_END_PATTERN, r"(?i)</(?:p|h[1-6])\s*>").replace_all(&html, "\n\n");
    let html = pattern(
        &LINE_BREAK_PATTERN,
        r"(?i)<br\s*/?>|</(?:div|li|tr|dt|dd|ul|ol|table|section|article|header|footer|nav)\s*>",
    )
    .replace_all(&html, "\n");
    let text = pattern(&TAG_PATTERN, r"(?s)<[^>]*>").replace_all(&html, "");
    let text = decode_entities(&text);

    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    pattern(&BLANK_RUN_PATTERN, r"\n{3,}")
        .replace_all(lines.join("\n").trim(), "\n\n")
        .into_owned()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&copy;", "©")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Answer a single request on a local port with a canned response.
    async fn serve_once(status_line: &str, content_type: &str, body: &str) -> String {
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let Ok(listener) = TcpListener::bind("127.0.0.1:0").await else {
            panic!("Failed to bind local listener");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("Failed to read listener address");
        };

        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut request = [0u8; 4096];
                let _ = socket.read(&mut request).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        format!("http://{addr}/programme-session/?id=abc")
    }

    fn fetcher() -> HttpFetcher {
        let Ok(fetcher) = HttpFetcher::new(&FetcherConfig::default()) else {
            panic!("Failed to create HttpFetcher");
        };
        fetcher
    }

    #[tokio::test]
    async fn test_not_found_is_status_error() {
        let url = serve_once("404 Not Found", "text/html", "<p>missing</p>").await;
        let result = fetcher().fetch_rendered_text(&url).await;
        assert!(matches!(
            result,
            Err(FetchError::Status { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_html_page_is_converted_to_text() {
        let body = "<html><body><div>Oral session</div><h2>Ice Sheets</h2>\
                    <div>Chair(s) Jane Doe, John Smith</div></body></html>";
        let url = serve_once("200 OK", "text/html; charset=utf-8", body).await;

        let Ok(text) = fetcher().fetch_rendered_text(&url).await else {
            panic!("page should be fetched");
        };
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["Oral session", "Ice Sheets", "", "Chair(s) Jane Doe, John Smith"]
        );
    }

    #[tokio::test]
    async fn test_fetch_bytes_returns_body() {
        let url = serve_once("200 OK", "text/plain", "M  John                       5").await;
        let Ok(bytes) = fetcher().fetch_bytes(&url).await else {
            panic!("body should be fetched");
        };
        assert_eq!(bytes, b"M  John                       5");
    }

    #[tokio::test]
    async fn test_fetch_bytes_server_error() {
        let url = serve_once("503 Service Unavailable", "text/plain", "").await;
        let result = fetcher().fetch_bytes(&url).await;
        assert!(matches!(
            result,
            Err(FetchError::Status { status: 503, .. })
        ));
    }

    #[test]
    fn test_http_fetcher_new() {
        let fetcher = HttpFetcher::new(&FetcherConfig::default());
        assert!(fetcher.is_ok());
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let result = fetcher().fetch_rendered_text("file:///etc/hosts").await;
        assert!(matches!(result, Err(FetchError::Navigation { .. })));
    }

    #[test]
    fn test_html_to_text_keeps_lines() {
        let html = r"<html><head><style>p { color: red; }</style></head><body>
            <div>Chair(s)</div><div>Jane Doe, John Smith</div>
            <p>Speakers:<br/>Ana Lopez<br>Peter Green</p>
            <script>var x = 1;</script>
            <footer>&copy; 2025 ESA &amp; partners</footer></body></html>";
        let text = html_to_text(html);
        assert!(!text.contains("var x"));
        assert!(!text.contains("color"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Chair(s)",
                "Jane Doe, John Smith",
                "Speakers:",
                "Ana Lopez",
                "Peter Green",
                "",
                "© 2025 ESA & partners",
            ]
        );
    }
}
