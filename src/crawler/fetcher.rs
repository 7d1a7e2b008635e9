//! HTTP fetcher implementation
//!
//! One bounded GET per URL, with every outcome expressed as a value: the
//! batch loop never sees an `Err` from a fetch, and no fetch is ever
//! retried. A failure is terminal for its URL only.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a single page fetch
#[derive(Debug)]
pub enum FetchResult {
    /// 2xx response with an HTML content type; eligible for link extraction
    Html {
        /// Page body content
        body: String,
    },

    /// 2xx response with a non-HTML content type
    ///
    /// Success-but-non-crawlable: contributes no links and is not an error.
    NonHtml {
        /// The Content-Type header value received
        content_type: String,
    },

    /// Non-2xx HTTP response
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// Timeout, DNS failure, connection error, or body read failure
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns true for the variants that represent a per-URL failure
    pub fn is_failure(&self) -> bool {
        matches!(self, FetchResult::HttpError { .. } | FetchResult::NetworkError { .. })
    }
}

/// Builds the shared HTTP client used for all page and robots fetches
///
/// # Arguments
///
/// * `user_agent` - Identification configuration for the UA header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a single URL with a bounded timeout
///
/// Any non-2xx status, timeout, DNS failure, or connection error yields an
/// error variant; nothing raises past this boundary.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
/// * `timeout` - Per-request timeout covering connect through body read
pub async fn fetch_page(client: &Client, url: &str, timeout: Duration) -> FetchResult {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return FetchResult::NonHtml { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Html { body },
        Err(e) => FetchResult::NetworkError {
            error: format!("body read failed: {}", e),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client() -> Client {
        build_http_client(&UserAgentConfig::default()).unwrap()
    }

    const TIMEOUT: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn test_html_page_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let result = fetch_page(&test_client(), &format!("{}/page", server.uri()), TIMEOUT).await;
        match result {
            FetchResult::Html { body } => assert!(body.contains("hi")),
            other => panic!("expected Html, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_html_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let result =
            fetch_page(&test_client(), &format!("{}/data.json", server.uri()), TIMEOUT).await;
        match result {
            FetchResult::NonHtml { content_type } => {
                assert_eq!(content_type, "application/json")
            }
            other => panic!("expected NonHtml, got {:?}", other),
        }
        assert!(!FetchResult::NonHtml {
            content_type: String::new()
        }
        .is_failure());
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result =
            fetch_page(&test_client(), &format!("{}/missing", server.uri()), TIMEOUT).await;
        match result {
            FetchResult::HttpError { status } => assert_eq!(status, 404),
            other => panic!("expected HttpError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let result = fetch_page(&test_client(), "http://127.0.0.1:1/page", TIMEOUT).await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
        assert!(result.is_failure());
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html></html>")
                    .insert_header("content-type", "text/html")
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let result = fetch_page(
            &test_client(),
            &format!("{}/slow", server.uri()),
            Duration::from_millis(200),
        )
        .await;
        assert!(matches!(result, FetchResult::NetworkError { .. }));
    }
}
