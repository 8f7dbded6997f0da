//! Client configuration constants.
//!
//! These values define the contract with the summarization server and the
//! client's own behavior. They are referenced throughout the codebase and in
//! tests to ensure consistency.

/// MIME type accepted for upload.
///
/// The server rejects anything that is not a PDF, so the client enforces the
/// same constraint before any network call is made.
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Magic prefix of a PDF file.
///
/// Used as a fallback check when the file source does not supply a declared
/// MIME type (drag-drop on some platforms, native file dialogs).
pub const PDF_MAGIC: &[u8] = b"%PDF-";

/// Key under which the theme preference is persisted locally.
pub const THEME_STORAGE_KEY: &str = "theme";

/// Timestamp format of the `created_at` field on history entries.
///
/// The server formats creation times with strftime in UTC.
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How long a transient notification stays visible, in milliseconds.
pub const TOAST_DISMISS_MS: u64 = 3000;

/// Inclusive rating bounds accepted by the server.
pub const MIN_RATING: u8 = 1;
/// See [`MIN_RATING`].
pub const MAX_RATING: u8 = 5;

/// Path of the realtime progress channel on the server.
pub const WS_PATH: &str = "/ws";

/// Default server base URL for native builds.
///
/// The web build always talks to its own origin; native builds read
/// `PRECIS_SERVER_URL` and fall back to this development server address.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds_are_ordered() {
        assert!(MIN_RATING <= MAX_RATING);
        assert_eq!(MIN_RATING, 1);
        assert_eq!(MAX_RATING, 5);
    }

    #[test]
    fn test_pdf_magic_is_ascii() {
        assert!(PDF_MAGIC.is_ascii());
        assert!(PDF_MAGIC.starts_with(b"%PDF"));
    }
}
