//! End-to-end tests for the submit flow: stage a PDF, submit it, decode the
//! server's response, and render the resulting summary body — everything the
//! UI does minus the actual network and DOM.

use precis_core::api::{SummarizeResponse, SummaryRecord, SummaryType};
use precis_core::format::{blocks_to_text, summary_blocks, SummaryBlock};
use precis_core::session::{Effect, SessionPhase, SessionState};

/// The canonical happy path: a 2-page PDF summarized with the "detailed"
/// style, answered with one bulleted and one plain line.
#[test]
fn submit_flow_end_to_end() {
    let mut session = SessionState::new();

    // Stage a small PDF and pick the style.
    session
        .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.7 tiny".to_vec())
        .expect("valid PDF should stage");
    session.select_summary_type(SummaryType::Detailed);
    assert!(session.can_submit());

    // Submit: the job carries the staged bytes and the chosen style.
    let job = session.begin_submit().expect("submit should start");
    assert_eq!(job.filename, "a.pdf");
    assert_eq!(job.summary_type, SummaryType::Detailed);
    assert_eq!(job.bytes, b"%PDF-1.7 tiny");
    assert_eq!(session.phase(), SessionPhase::Submitting);
    assert!(!session.can_submit());

    // The server's reply, exactly as the wire carries it.
    let body = r#"{
        "success": true,
        "filename": "a.pdf",
        "page_count": 2,
        "word_count": 500,
        "summary_type": "detailed",
        "summary": "- point one\npoint two",
        "history_id": 42
    }"#;
    let response: SummarizeResponse = serde_json::from_str(body).expect("response should decode");
    let record = SummaryRecord::from(response);

    let effects = session.submit_succeeded(record);
    assert_eq!(effects, vec![Effect::RefreshHistory, Effect::RefreshStats]);

    // The summary panel's data: counts, style, and the two rendered lines.
    let current = session.current_summary().expect("summary is displayed");
    assert_eq!(format!("{} pages", current.page_count), "2 pages");
    assert_eq!(format!("{} words", current.word_count), "500 words");
    assert_eq!(current.summary_type.as_str(), "detailed");

    let blocks = summary_blocks(&current.summary);
    assert_eq!(
        blocks,
        vec![
            SummaryBlock::Bullet("point one".to_string()),
            SummaryBlock::Paragraph("point two".to_string()),
        ]
    );
    assert_eq!(blocks_to_text(&blocks), "✓ point one\npoint two");

    // The freshly persisted summary can be rated.
    assert_eq!(session.rating_target(), Some(42));

    // Terminating path: progress hidden, submit re-enabled.
    assert_eq!(session.phase(), SessionPhase::FileStaged);
    assert!(session.can_submit());
}

/// A server-reported error reverts the session so the same file can be
/// resubmitted without re-staging.
#[test]
fn submit_flow_server_error_reverts() {
    let mut session = SessionState::new();
    session
        .stage_file("b.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
        .unwrap();
    session.begin_submit().unwrap();

    // `{"error": ...}` replies never reach submit_succeeded.
    session.submit_failed();

    assert_eq!(session.phase(), SessionPhase::FileStaged);
    assert!(session.can_submit());
    assert!(session.current_summary().is_none());
    assert_eq!(session.rating_target(), None);
}
