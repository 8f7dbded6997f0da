//! Formatting utilities for human-readable output.
//!
//! This module provides consistent formatting for file sizes, timestamps,
//! and summary bodies across the UI.

use crate::config::CREATED_AT_FORMAT;
use chrono::{NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count as a human-readable size.
///
/// Zero renders as `"0 Bytes"`; otherwise the largest unit with a scaled
/// value ≥ 1 is chosen and the value is rounded to two decimals with
/// insignificant zeros dropped.
///
/// # Examples
///
/// ```
/// use precis_core::format::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 Bytes");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// assert_eq!(format_file_size(1048576), "1 MB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((bytes as f64).log2() / 10.0).floor() as usize;
    let exponent = exponent.min(SIZE_UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{} {}", rounded, SIZE_UNITS[exponent])
}

/// Renders how long ago `created` was, relative to `now`.
///
/// Minutes under an hour, hours under a day, days under a week, otherwise an
/// absolute date. Each bracket floors its quotient and the upper bounds are
/// exclusive, so exactly 60 minutes renders as `"1h ago"`.
pub fn format_relative_time(created: NaiveDateTime, now: NaiveDateTime) -> String {
    let elapsed = now.signed_duration_since(created);
    let minutes = elapsed.num_minutes();
    if minutes < 60 {
        return format!("{}m ago", minutes.max(0));
    }
    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    let days = elapsed.num_days();
    if days < 7 {
        return format!("{}d ago", days);
    }
    created.format("%-m/%-d/%Y").to_string()
}

/// Parses a server `created_at` timestamp and renders it relative to now.
/// Unparseable input is returned verbatim rather than dropped.
pub fn format_created_at(created_at: &str) -> String {
    match NaiveDateTime::parse_from_str(created_at, CREATED_AT_FORMAT) {
        Ok(created) => format_relative_time(created, Utc::now().naive_utc()),
        Err(_) => created_at.to_string(),
    }
}

/// One rendered line of a summary body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    /// Plain prose line.
    Paragraph(String),
    /// List item; the leading marker has been stripped.
    Bullet(String),
}

static NUMBERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid marker regex"));

/// Splits a raw summary body into renderable blocks.
///
/// Lines starting with `-`, `•`, or a `N.` numeric marker become bullets
/// with the whole marker stripped; other non-empty lines are paragraphs;
/// empty lines are dropped. This is a one-way transform with no round-trip
/// guarantee, and it is idempotent on marker-free paragraphs.
pub fn summary_blocks(text: &str) -> Vec<SummaryBlock> {
    text.lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
                return Some(SummaryBlock::Bullet(rest.trim_start().to_string()));
            }
            if let Some(marker) = NUMBERED_MARKER.find(line) {
                return Some(SummaryBlock::Bullet(line[marker.end()..].to_string()));
            }
            Some(SummaryBlock::Paragraph(line.to_string()))
        })
        .collect()
}

/// Plain-text rendition of the displayed summary, matching what the user
/// sees on screen. Used by the clipboard action and the download buttons.
pub fn blocks_to_text(blocks: &[SummaryBlock]) -> String {
    blocks
        .iter()
        .map(|block| match block {
            SummaryBlock::Paragraph(text) => text.clone(),
            SummaryBlock::Bullet(text) => format!("✓ {}", text),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_file_size_zero() {
        assert_eq!(format_file_size(0), "0 Bytes");
    }

    #[test]
    fn test_file_size_units() {
        assert_eq!(format_file_size(1), "1 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1023), "1023 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1048576), "1 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    #[test]
    fn test_file_size_caps_at_gb() {
        // Terabyte-scale inputs still render in GB rather than overflowing
        // the unit table.
        assert_eq!(format_file_size(2 * 1024u64.pow(4)), "2048 GB");
    }

    #[test]
    fn test_file_size_round_trips_within_tolerance() {
        // The numeric part times the unit scale must recover the input to
        // within rounding error of the two-decimal display.
        for bytes in [1u64, 999, 1024, 1536, 10_240, 123_456, 5_242_880, 3_221_225_472] {
            let rendered = format_file_size(bytes);
            let mut parts = rendered.split_whitespace();
            let value: f64 = parts.next().unwrap().parse().unwrap();
            let unit = parts.next().unwrap();
            let scale = match unit {
                "Bytes" => 1f64,
                "KB" => 1024f64,
                "MB" => 1024f64 * 1024.0,
                "GB" => 1024f64 * 1024.0 * 1024.0,
                other => panic!("unexpected unit {}", other),
            };
            let recovered = value * scale;
            // Two-decimal rounding permits half a hundredth of a unit.
            assert!(
                (recovered - bytes as f64).abs() <= scale * 0.005 + 0.5,
                "{} rendered as {} recovers {}",
                bytes,
                rendered,
                recovered
            );
        }
    }

    fn at(now: NaiveDateTime, ago: Duration) -> String {
        format_relative_time(now - ago, now)
    }

    #[test]
    fn test_relative_time_brackets() {
        let now = NaiveDateTime::parse_from_str("2026-08-06 12:00:00", CREATED_AT_FORMAT).unwrap();
        assert_eq!(at(now, Duration::minutes(0)), "0m ago");
        assert_eq!(at(now, Duration::minutes(5)), "5m ago");
        assert_eq!(at(now, Duration::minutes(59)), "59m ago");
        // Upper bounds are exclusive: exactly 60 minutes is the hours bracket.
        assert_eq!(at(now, Duration::minutes(60)), "1h ago");
        assert_eq!(at(now, Duration::hours(23)), "23h ago");
        assert_eq!(at(now, Duration::hours(24)), "1d ago");
        assert_eq!(at(now, Duration::days(6)), "6d ago");
        // A week or more falls back to the absolute date.
        assert_eq!(at(now, Duration::days(7)), "7/30/2026");
    }

    #[test]
    fn test_relative_time_future_clamps_to_zero() {
        let now = NaiveDateTime::parse_from_str("2026-08-06 12:00:00", CREATED_AT_FORMAT).unwrap();
        assert_eq!(format_relative_time(now + Duration::minutes(3), now), "0m ago");
    }

    #[test]
    fn test_created_at_passthrough_on_parse_failure() {
        assert_eq!(format_created_at("yesterday-ish"), "yesterday-ish");
    }

    #[test]
    fn test_summary_blocks_markers_stripped() {
        let blocks = summary_blocks("- dash item\n• glyph item\n1. first\n12. twelfth\nplain line\n\n");
        assert_eq!(
            blocks,
            vec![
                SummaryBlock::Bullet("dash item".to_string()),
                SummaryBlock::Bullet("glyph item".to_string()),
                SummaryBlock::Bullet("first".to_string()),
                // The whole numeric marker goes, not just its first character.
                SummaryBlock::Bullet("twelfth".to_string()),
                SummaryBlock::Paragraph("plain line".to_string()),
            ]
        );
    }

    #[test]
    fn test_summary_blocks_drop_empty_lines() {
        let blocks = summary_blocks("\n\n  \nonly line\n\n");
        assert_eq!(blocks, vec![SummaryBlock::Paragraph("only line".to_string())]);
    }

    #[test]
    fn test_summary_blocks_idempotent_on_paragraphs() {
        let text = "First paragraph.\nSecond paragraph.";
        let first = summary_blocks(text);
        let rejoined = first
            .iter()
            .map(|b| match b {
                SummaryBlock::Paragraph(t) => t.clone(),
                SummaryBlock::Bullet(t) => t.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(summary_blocks(&rejoined), first);
    }

    #[test]
    fn test_blocks_to_text() {
        let blocks = summary_blocks("- point one\npoint two");
        assert_eq!(blocks_to_text(&blocks), "✓ point one\npoint two");
    }
}
