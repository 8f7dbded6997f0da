//! Wire types for the summarization server's HTTP API.
//!
//! The server speaks two distinct record shapes: the immediate response of
//! `POST /summarize` and the persisted rows returned by the history
//! endpoints. Both convert into the canonical [`SummaryRecord`] the UI works
//! with, so the rest of the client never deals with shape differences.

use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summarization style recognized by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryType {
    /// Very concise three-sentence summary.
    Brief,
    /// Five clear bullet points.
    #[default]
    Standard,
    /// Comprehensive eight-point summary.
    Detailed,
    /// Structured bullets with main topics and sub-points.
    Bullet,
    /// Academic style: introduction, findings, methodology, conclusion.
    Academic,
}

impl SummaryType {
    /// All styles, in the order the selector displays them.
    pub const ALL: [SummaryType; 5] = [
        SummaryType::Brief,
        SummaryType::Standard,
        SummaryType::Detailed,
        SummaryType::Bullet,
        SummaryType::Academic,
    ];

    /// Wire form sent in the `summary_type` multipart field.
    pub fn as_str(self) -> &'static str {
        match self {
            SummaryType::Brief => "brief",
            SummaryType::Standard => "standard",
            SummaryType::Detailed => "detailed",
            SummaryType::Bullet => "bullet",
            SummaryType::Academic => "academic",
        }
    }

    /// Human-readable label for the style selector.
    pub fn label(self) -> &'static str {
        match self {
            SummaryType::Brief => "Brief",
            SummaryType::Standard => "Standard",
            SummaryType::Detailed => "Detailed",
            SummaryType::Bullet => "Bullet Points",
            SummaryType::Academic => "Academic",
        }
    }
}

impl fmt::Display for SummaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical client-side summary record.
///
/// `id` is absent until the server has persisted the summary; a rating can
/// only be submitted once an identifier exists.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRecord {
    pub id: Option<i64>,
    pub filename: String,
    pub page_count: u32,
    pub word_count: u32,
    pub summary_type: SummaryType,
    pub summary: String,
    /// 1-5 when rated, `None` otherwise.
    pub rating: Option<u8>,
}

/// Response body of `POST /summarize`.
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeResponse {
    #[serde(default)]
    pub success: bool,
    pub summary: String,
    pub filename: String,
    pub page_count: u32,
    pub word_count: u32,
    pub summary_type: SummaryType,
    /// Identifier of the freshly persisted history row.
    pub history_id: Option<i64>,
}

impl From<SummarizeResponse> for SummaryRecord {
    fn from(response: SummarizeResponse) -> Self {
        SummaryRecord {
            id: response.history_id,
            filename: response.filename,
            page_count: response.page_count,
            word_count: response.word_count,
            summary_type: response.summary_type,
            summary: response.summary,
            rating: None,
        }
    }
}

/// One persisted history row (`GET /history`, `GET /history/{id}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub filename: String,
    pub summary_text: String,
    pub summary_type: SummaryType,
    pub page_count: u32,
    pub word_count: u32,
    /// Raw wire value; the server stores 0 for "unrated".
    #[serde(default)]
    pub rating: u8,
    /// Creation timestamp, formatted per [`crate::config::CREATED_AT_FORMAT`].
    pub created_at: String,
}

impl HistoryEntry {
    /// The rating as the client models it: 1-5 or absent.
    pub fn rating(&self) -> Option<u8> {
        (crate::config::MIN_RATING..=crate::config::MAX_RATING)
            .contains(&self.rating)
            .then_some(self.rating)
    }
}

impl From<HistoryEntry> for SummaryRecord {
    fn from(entry: HistoryEntry) -> Self {
        let rating = entry.rating();
        SummaryRecord {
            id: Some(entry.id),
            filename: entry.filename,
            page_count: entry.page_count,
            word_count: entry.word_count,
            summary_type: entry.summary_type,
            summary: entry.summary_text,
            rating,
        }
    }
}

/// Server error envelope. Any response carrying this shape is a
/// server-reported failure regardless of HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorReply {
    pub error: String,
}

/// Aggregate statistics (`GET /stats`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct StatsSnapshot {
    pub total_summaries: u64,
    /// 0.0 when no ratings exist.
    pub avg_rating: f64,
    pub total_pages_processed: u64,
}

/// Body of `POST /history/{id}/rate`.
#[derive(Debug, Clone, Serialize)]
pub struct RatePayload {
    pub rating: u8,
}

/// Body of `POST /theme`.
#[derive(Debug, Clone, Serialize)]
pub struct ThemePayload {
    pub theme: Theme,
}

/// Export format of `GET /download/{format}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadFormat {
    Txt,
    Pdf,
    Docx,
}

impl DownloadFormat {
    /// Path segment and file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "txt",
            DownloadFormat::Pdf => "pdf",
            DownloadFormat::Docx => "docx",
        }
    }

    /// Label shown on the download button.
    pub fn label(self) -> &'static str {
        match self {
            DownloadFormat::Txt => "TXT",
            DownloadFormat::Pdf => "PDF",
            DownloadFormat::Docx => "DOCX",
        }
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_summarize_response() {
        // Shape the server returns on success.
        let body = r#"{
            "success": true,
            "summary": "- point one\npoint two",
            "filename": "a.pdf",
            "page_count": 2,
            "word_count": 500,
            "summary_type": "detailed",
            "history_id": 7
        }"#;
        let response: SummarizeResponse = serde_json::from_str(body).unwrap();
        let record = SummaryRecord::from(response);
        assert_eq!(record.id, Some(7));
        assert_eq!(record.filename, "a.pdf");
        assert_eq!(record.page_count, 2);
        assert_eq!(record.word_count, 500);
        assert_eq!(record.summary_type, SummaryType::Detailed);
        assert_eq!(record.rating, None);
    }

    #[test]
    fn test_decode_history_entry() {
        let body = r#"{
            "id": 3,
            "filename": "report.pdf",
            "summary_text": "A summary.",
            "summary_type": "standard",
            "page_count": 12,
            "word_count": 4200,
            "rating": 4,
            "created_at": "2026-08-01 09:30:00"
        }"#;
        let entry: HistoryEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.rating(), Some(4));
        let record = SummaryRecord::from(entry);
        assert_eq!(record.id, Some(3));
        assert_eq!(record.summary, "A summary.");
        assert_eq!(record.rating, Some(4));
    }

    #[test]
    fn test_unrated_history_entry_maps_to_none() {
        // The server's database defaults ratings to 0, meaning unrated.
        let body = r#"{
            "id": 1,
            "filename": "x.pdf",
            "summary_text": "s",
            "summary_type": "brief",
            "page_count": 1,
            "word_count": 10,
            "rating": 0,
            "created_at": "2026-08-01 09:30:00"
        }"#;
        let entry: HistoryEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.rating(), None);
        assert_eq!(SummaryRecord::from(entry).rating, None);
    }

    #[test]
    fn test_decode_error_envelope() {
        let reply: ErrorReply =
            serde_json::from_str(r#"{"error": "Invalid file type. Only PDF allowed"}"#).unwrap();
        assert_eq!(reply.error, "Invalid file type. Only PDF allowed");
        // A success body must not decode as the envelope.
        assert!(serde_json::from_str::<ErrorReply>(r#"{"success": true}"#).is_err());
    }

    #[test]
    fn test_decode_stats() {
        let stats: StatsSnapshot = serde_json::from_str(
            r#"{"total_summaries": 14, "avg_rating": 4.25, "total_pages_processed": 310}"#,
        )
        .unwrap();
        assert_eq!(stats.total_summaries, 14);
        assert!((stats.avg_rating - 4.25).abs() < f64::EPSILON);
        assert_eq!(stats.total_pages_processed, 310);
    }

    #[test]
    fn test_summary_type_wire_form() {
        for ty in SummaryType::ALL {
            let encoded = serde_json::to_string(&ty).unwrap();
            assert_eq!(encoded, format!("\"{}\"", ty.as_str()));
        }
        assert_eq!(SummaryType::default(), SummaryType::Standard);
    }

    #[test]
    fn test_payload_encoding() {
        assert_eq!(
            serde_json::to_string(&RatePayload { rating: 5 }).unwrap(),
            r#"{"rating":5}"#
        );
        assert_eq!(
            serde_json::to_string(&ThemePayload { theme: Theme::Dark }).unwrap(),
            r#"{"theme":"dark"}"#
        );
    }
}
