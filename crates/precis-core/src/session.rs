//! Upload/session state machine.
//!
//! Owns the staged file, the selected summary style, and the currently
//! displayed summary. The machine is UI-free: components translate DOM
//! events into the operations below, and transitions return follow-up
//! [`Effect`]s for the controller to perform, so the whole submit flow is
//! testable without a rendering environment.
//!
//! Phases: `Idle` (nothing staged) → `FileStaged` (valid PDF staged) →
//! `Submitting` (single request in flight, submit disabled) → back to
//! `FileStaged` on any terminating path. The displayed summary is a separate
//! state slice: it survives re-staging and is also populated when a history
//! entry is opened.

use crate::api::{SummaryRecord, SummaryType};
use crate::config::{MAX_RATING, MIN_RATING, PDF_MAGIC, PDF_MIME_TYPE};
use crate::error::SessionError;
use tracing::debug;

/// A file selected or dropped by the user but not yet submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    /// Size in bytes, shown next to the filename.
    pub size: u64,
    pub bytes: Vec<u8>,
}

/// Phase of the upload flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    FileStaged,
    Submitting,
}

/// Follow-up work a transition asks the controller to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    RefreshHistory,
    RefreshStats,
}

/// Everything the transport needs for one summarize request.
#[derive(Debug, Clone)]
pub struct SubmitJob {
    pub filename: String,
    pub summary_type: SummaryType,
    pub bytes: Vec<u8>,
}

/// The session's complete mutable state. One live instance, owned by the
/// top-level controller and mutated only from the UI task.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: SessionPhase,
    staged: Option<StagedFile>,
    summary_type: SummaryType,
    current: Option<SummaryRecord>,
}

impl SessionState {
    pub fn new() -> SessionState {
        SessionState::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    pub fn summary_type(&self) -> SummaryType {
        self.summary_type
    }

    pub fn current_summary(&self) -> Option<&SummaryRecord> {
        self.current.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    /// Submit is available once a file is staged and no job is in flight.
    pub fn can_submit(&self) -> bool {
        self.staged.is_some() && self.phase != SessionPhase::Submitting
    }

    /// Stages a file from the picker or a drop event.
    ///
    /// Only PDF payloads are accepted; rejection leaves the state unchanged.
    /// A declared `content_type` is authoritative when present, otherwise the
    /// `.pdf` extension or the `%PDF-` magic prefix is accepted.
    pub fn stage_file(
        &mut self,
        name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<(), SessionError> {
        if !is_pdf_payload(name, content_type, &bytes) {
            return Err(SessionError::NotAPdf);
        }
        debug!(file = name, size = bytes.len(), "staged file");
        self.staged = Some(StagedFile {
            name: name.to_string(),
            size: bytes.len() as u64,
            bytes,
        });
        if self.phase == SessionPhase::Idle {
            self.phase = SessionPhase::FileStaged;
        }
        Ok(())
    }

    pub fn select_summary_type(&mut self, summary_type: SummaryType) {
        self.summary_type = summary_type;
    }

    /// Starts a submission. Single-flight is enforced here: a second submit
    /// while one is in flight is an error, not a queued request.
    pub fn begin_submit(&mut self) -> Result<SubmitJob, SessionError> {
        if self.phase == SessionPhase::Submitting {
            return Err(SessionError::AlreadySubmitting);
        }
        let staged = self.staged.as_ref().ok_or(SessionError::NoFileStaged)?;
        let job = SubmitJob {
            filename: staged.name.clone(),
            summary_type: self.summary_type,
            bytes: staged.bytes.clone(),
        };
        self.phase = SessionPhase::Submitting;
        debug!(file = %job.filename, summary_type = %job.summary_type, "submitting");
        Ok(job)
    }

    /// Installs the result of a successful submission and asks the
    /// controller to refresh the history list and the stats snapshot,
    /// exactly once each.
    pub fn submit_succeeded(&mut self, record: SummaryRecord) -> Vec<Effect> {
        self.current = Some(record);
        self.finish_submission();
        vec![Effect::RefreshHistory, Effect::RefreshStats]
    }

    /// Reverts a failed submission; the staged file survives so the user can
    /// retry without re-selecting it.
    pub fn submit_failed(&mut self) {
        self.finish_submission();
    }

    fn finish_submission(&mut self) {
        self.phase = if self.staged.is_some() {
            SessionPhase::FileStaged
        } else {
            SessionPhase::Idle
        };
    }

    /// Replaces the displayed summary with a past result. The staged file
    /// and phase are untouched.
    pub fn open_history_entry(&mut self, record: SummaryRecord) {
        self.current = Some(record);
    }

    /// The identifier a rating would be keyed by. `None` means rating is not
    /// permitted and no network call may be issued.
    pub fn rating_target(&self) -> Option<i64> {
        self.current.as_ref()?.id
    }

    /// Records a confirmed rating on the displayed summary.
    pub fn apply_rating(&mut self, rating: u8) -> Result<(), SessionError> {
        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(SessionError::RatingOutOfRange);
        }
        if let Some(current) = self.current.as_mut() {
            current.rating = Some(rating);
        }
        Ok(())
    }
}

/// PDF detection for staging: declared MIME wins; otherwise fall back to the
/// `.pdf` extension or the `%PDF-` magic prefix.
pub fn is_pdf_payload(name: &str, content_type: Option<&str>, bytes: &[u8]) -> bool {
    match content_type {
        Some(mime) if !mime.is_empty() => mime == PDF_MIME_TYPE,
        _ => name.to_ascii_lowercase().ends_with(".pdf") || bytes.starts_with(PDF_MAGIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Option<i64>) -> SummaryRecord {
        SummaryRecord {
            id,
            filename: "a.pdf".to_string(),
            page_count: 2,
            word_count: 500,
            summary_type: SummaryType::Detailed,
            summary: "- point one\npoint two".to_string(),
            rating: None,
        }
    }

    #[test]
    fn test_non_pdf_is_rejected() {
        let mut session = SessionState::new();
        // Declared MIME that is not PDF: rejected even with a .pdf name.
        let err = session
            .stage_file("notes.pdf", Some("text/plain"), b"hello".to_vec())
            .unwrap_err();
        assert_eq!(err, SessionError::NotAPdf);
        // No MIME, no extension, no magic: rejected.
        assert!(session
            .stage_file("notes.txt", None, b"hello".to_vec())
            .is_err());
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(!session.can_submit());
        assert!(session.staged_file().is_none());
    }

    #[test]
    fn test_pdf_detection_fallbacks() {
        assert!(is_pdf_payload("a.pdf", Some("application/pdf"), b""));
        assert!(is_pdf_payload("Report.PDF", None, b""));
        assert!(is_pdf_payload("download", None, b"%PDF-1.7 rest"));
        assert!(!is_pdf_payload("a.docx", None, b"PK\x03\x04"));
        assert!(!is_pdf_payload("a.pdf", Some("application/zip"), b"%PDF-"));
    }

    #[test]
    fn test_staging_enables_submit() {
        let mut session = SessionState::new();
        session
            .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::FileStaged);
        assert!(session.can_submit());
        let staged = session.staged_file().unwrap();
        assert_eq!(staged.name, "a.pdf");
        assert_eq!(staged.size, 8);
    }

    #[test]
    fn test_submit_requires_staged_file() {
        let mut session = SessionState::new();
        assert_eq!(
            session.begin_submit().unwrap_err(),
            SessionError::NoFileStaged
        );
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_single_flight_is_enforced() {
        let mut session = SessionState::new();
        session
            .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
            .unwrap();
        session.select_summary_type(SummaryType::Detailed);

        let job = session.begin_submit().unwrap();
        assert_eq!(job.filename, "a.pdf");
        assert_eq!(job.summary_type, SummaryType::Detailed);
        assert!(session.is_submitting());
        assert!(!session.can_submit());
        assert_eq!(
            session.begin_submit().unwrap_err(),
            SessionError::AlreadySubmitting
        );
    }

    #[test]
    fn test_success_yields_each_refresh_exactly_once() {
        let mut session = SessionState::new();
        session
            .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
            .unwrap();
        session.begin_submit().unwrap();

        let effects = session.submit_succeeded(record(Some(9)));
        assert_eq!(
            effects
                .iter()
                .filter(|e| **e == Effect::RefreshHistory)
                .count(),
            1
        );
        assert_eq!(
            effects
                .iter()
                .filter(|e| **e == Effect::RefreshStats)
                .count(),
            1
        );
        assert_eq!(effects.len(), 2);

        // Result displayed, submit re-enabled, file still staged.
        assert_eq!(session.current_summary().unwrap().id, Some(9));
        assert_eq!(session.phase(), SessionPhase::FileStaged);
        assert!(session.can_submit());
    }

    #[test]
    fn test_failure_reverts_to_staged() {
        let mut session = SessionState::new();
        session
            .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
            .unwrap();
        session.begin_submit().unwrap();
        session.submit_failed();
        assert_eq!(session.phase(), SessionPhase::FileStaged);
        assert!(session.can_submit());
        assert!(session.current_summary().is_none());
    }

    #[test]
    fn test_rating_requires_identifier() {
        let mut session = SessionState::new();
        // No summary at all: no target.
        assert_eq!(session.rating_target(), None);
        // Summary without a persisted id: still no target.
        session.open_history_entry(record(None));
        assert_eq!(session.rating_target(), None);
        // Persisted summary: rating allowed and recorded.
        session.open_history_entry(record(Some(4)));
        assert_eq!(session.rating_target(), Some(4));
        session.apply_rating(5).unwrap();
        assert_eq!(session.current_summary().unwrap().rating, Some(5));
    }

    #[test]
    fn test_rating_bounds() {
        let mut session = SessionState::new();
        session.open_history_entry(record(Some(1)));
        assert_eq!(
            session.apply_rating(0).unwrap_err(),
            SessionError::RatingOutOfRange
        );
        assert_eq!(
            session.apply_rating(6).unwrap_err(),
            SessionError::RatingOutOfRange
        );
        assert_eq!(session.current_summary().unwrap().rating, None);
    }

    #[test]
    fn test_open_history_entry_keeps_staging() {
        let mut session = SessionState::new();
        session
            .stage_file("a.pdf", Some("application/pdf"), b"%PDF-1.4".to_vec())
            .unwrap();
        session.open_history_entry(record(Some(2)));
        assert_eq!(session.phase(), SessionPhase::FileStaged);
        assert_eq!(session.current_summary().unwrap().id, Some(2));
    }
}
