//! Error types for the Précis client.

use thiserror::Error;

/// Errors that can occur while talking to the summarization server.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced a usable response (network failure,
    /// connection refused, body read failure).
    #[error("Request failed: {0}")]
    Transport(String),
    /// The server answered with its error envelope; the message is shown
    /// to the user verbatim.
    #[error("{0}")]
    Server(String),
    /// The response arrived but did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Errors that can occur on the realtime progress channel.
#[derive(Debug, Clone, Error)]
pub enum ChannelError {
    /// The connection could not be established.
    #[error("Failed to connect: {0}")]
    Connect(String),
    /// An inbound frame was not valid JSON or was missing its event name.
    #[error("Malformed frame: {0}")]
    Decode(String),
}

/// Errors produced by the upload/session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The staged payload is not a PDF.
    #[error("Please select a PDF file")]
    NotAPdf,
    /// Submit was requested with nothing staged.
    #[error("Please select a file first")]
    NoFileStaged,
    /// Submit was requested while a job is already in flight.
    #[error("A summarization is already in progress")]
    AlreadySubmitting,
    /// A rating outside the accepted 1-5 range was supplied.
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
}

/// Errors from the local preference store (theme persistence).
#[derive(Debug, Clone, Error)]
pub enum PrefsError {
    /// The backing store is unavailable (no browser storage, no config dir).
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),
    /// Reading the stored value failed.
    #[error("Failed to read preference: {0}")]
    Read(String),
    /// Persisting the value failed.
    #[error("Failed to persist preference: {0}")]
    Write(String),
}

/// Convert to String where the UI only needs displayable text.
impl From<ApiError> for String {
    fn from(err: ApiError) -> String {
        err.to_string()
    }
}

impl From<ChannelError> for String {
    fn from(err: ChannelError) -> String {
        err.to_string()
    }
}
