//! HTTP client for the summarization server.
//!
//! This module wraps reqwest to cover every endpoint the client consumes.
//! reqwest works on both native and WASM platforms:
//! - Native: Uses hyper for HTTP
//! - WASM: Uses browser fetch() API internally
//!
//! The HTTP client is pooled for connection reuse; the server's error
//! envelope (`{"error": ...}`) is recognized on every response before the
//! expected body shape is decoded, so server-reported failures surface their
//! own message instead of a parse error.

use once_cell::sync::Lazy;
use precis_core::api::{
    DownloadFormat, ErrorReply, HistoryEntry, RatePayload, StatsSnapshot, SummarizeResponse,
    SummaryRecord, ThemePayload,
};
use precis_core::config::{PDF_MIME_TYPE, WS_PATH};
use precis_core::error::ApiError;
use precis_core::session::SubmitJob;
use precis_core::theme::Theme;
use serde::de::DeserializeOwned;

/// Global HTTP client for connection pooling.
///
/// reqwest::Client handles connection pooling internally, so reusing a
/// single client across requests is much more efficient than creating one
/// per request. The browser-backed WASM client takes no configuration.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    #[cfg(not(target_arch = "wasm32"))]
    {
        reqwest::Client::builder()
            .user_agent("Precis/0.1.0 (PDF summarization client)")
            .build()
            .expect("Failed to build HTTP client")
    }
    #[cfg(target_arch = "wasm32")]
    {
        reqwest::Client::new()
    }
});

/// Client for the summarization server's HTTP endpoints.
///
/// Cheap to clone; every method owns one request/response cycle and no
/// request is retried or cancelled by the client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Client against an explicit base URL (no trailing slash needed).
    pub fn new(base_url: impl Into<String>) -> ApiClient {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        ApiClient { base_url }
    }

    /// Same-origin on web; `PRECIS_SERVER_URL` (or the default development
    /// server) on desktop.
    pub fn from_env() -> ApiClient {
        #[cfg(target_arch = "wasm32")]
        {
            ApiClient::new("")
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            ApiClient::new(std::env::var("PRECIS_SERVER_URL").unwrap_or_else(|_| {
                precis_core::config::DEFAULT_SERVER_URL.to_string()
            }))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of the realtime progress channel.
    ///
    /// Derived from the page origin on web (`ws:`/`wss:` following the page
    /// scheme) and from the configured base URL on desktop.
    pub fn ws_url(&self) -> String {
        #[cfg(target_arch = "wasm32")]
        {
            let location = web_sys::window().map(|w| w.location());
            let (protocol, host) = match location {
                Some(location) => (
                    location.protocol().unwrap_or_else(|_| "http:".to_string()),
                    location.host().unwrap_or_default(),
                ),
                None => ("http:".to_string(), String::new()),
            };
            let scheme = if protocol == "https:" { "wss" } else { "ws" };
            format!("{}://{}{}", scheme, host, WS_PATH)
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            let base = self
                .base_url
                .strip_prefix("https://")
                .map(|rest| format!("wss://{}", rest))
                .or_else(|| {
                    self.base_url
                        .strip_prefix("http://")
                        .map(|rest| format!("ws://{}", rest))
                })
                .unwrap_or_else(|| self.base_url.clone());
            format!("{}{}", base, WS_PATH)
        }
    }

    /// `POST /summarize` — uploads the staged PDF with the chosen style.
    pub async fn summarize(&self, job: &SubmitJob) -> Result<SummaryRecord, ApiError> {
        let part = reqwest::multipart::Part::bytes(job.bytes.clone())
            .file_name(job.filename.clone())
            .mime_str(PDF_MIME_TYPE)
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("pdf_file", part)
            .text("summary_type", job.summary_type.as_str());

        let response = HTTP_CLIENT
            .post(self.url("/summarize"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let parsed: SummarizeResponse = decode_reply(&body)?;
        Ok(parsed.into())
    }

    /// `GET /history` — all persisted summaries, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>, ApiError> {
        self.get_json("/history").await
    }

    /// `GET /history/{id}` — one full persisted summary.
    pub async fn history_item(&self, id: i64) -> Result<HistoryEntry, ApiError> {
        self.get_json(&format!("/history/{}", id)).await
    }

    /// `GET /stats` — aggregate counters.
    pub async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.get_json("/stats").await
    }

    /// `POST /history/{id}/rate` — stores a 1-5 rating. The response body
    /// is ignored.
    pub async fn rate(&self, id: i64, rating: u8) -> Result<(), ApiError> {
        let response = HTTP_CLIENT
            .post(self.url(&format!("/history/{}/rate", id)))
            .json(&RatePayload { rating })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::Server(format!(
                "rating rejected (HTTP {})",
                response.status()
            )));
        }
        Ok(())
    }

    /// `POST /theme` — best-effort mirror of the local preference. The
    /// response body is ignored; callers treat failure as log-only.
    pub async fn save_theme(&self, theme: Theme) -> Result<(), ApiError> {
        let response = HTTP_CLIENT
            .post(self.url("/theme"))
            .json(&ThemePayload { theme })
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::Server(format!(
                "theme mirror rejected (HTTP {})",
                response.status()
            )));
        }
        Ok(())
    }

    /// URL of `GET /download/{format}` for the given summary text. On web
    /// the browser is navigated straight to it.
    pub fn download_url(&self, format: DownloadFormat, summary: &str, filename: &str) -> String {
        let query = serde_urlencoded::to_string([("summary", summary), ("filename", filename)])
            .unwrap_or_default();
        format!("{}/download/{}?{}", self.base_url, format.as_str(), query)
    }

    /// Fetches an export as bytes (desktop, where there is no browser to
    /// navigate; the bytes go to a native save dialog).
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn download(
        &self,
        format: DownloadFormat,
        summary: &str,
        filename: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = HTTP_CLIENT
            .get(self.download_url(format, summary, filename))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(ApiError::Server(format!(
                "download failed (HTTP {})",
                response.status()
            )));
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = HTTP_CLIENT
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_reply(&body)
    }
}

/// Decodes a response body, recognizing the server's error envelope first so
/// its message wins over a shape mismatch.
fn decode_reply<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    if let Ok(reply) = serde_json::from_str::<ErrorReply>(body) {
        return Err(ApiError::Server(reply.error));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5001/");
        assert_eq!(client.url("/stats"), "http://localhost:5001/stats");
    }

    #[test]
    fn test_download_url_encodes_query() {
        let client = ApiClient::new("http://localhost:5001");
        let url = client.download_url(DownloadFormat::Txt, "a b&c", "report");
        assert_eq!(
            url,
            "http://localhost:5001/download/txt?summary=a+b%26c&filename=report"
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_ws_url_follows_scheme() {
        assert_eq!(
            ApiClient::new("http://127.0.0.1:5001").ws_url(),
            "ws://127.0.0.1:5001/ws"
        );
        assert_eq!(
            ApiClient::new("https://summaries.example.com").ws_url(),
            "wss://summaries.example.com/ws"
        );
    }

    #[test]
    fn test_error_envelope_wins_over_decode() {
        let result: Result<StatsSnapshot, ApiError> =
            decode_reply(r#"{"error": "No PDF file uploaded"}"#);
        match result {
            Err(ApiError::Server(message)) => assert_eq!(message, "No PDF file uploaded"),
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_reply_success_body() {
        let stats: StatsSnapshot = decode_reply(
            r#"{"total_summaries": 1, "avg_rating": 5.0, "total_pages_processed": 2}"#,
        )
        .unwrap();
        assert_eq!(stats.total_summaries, 1);
    }

    #[test]
    fn test_decode_reply_malformed_body() {
        let result: Result<StatsSnapshot, ApiError> = decode_reply("<!doctype html>");
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }
}
