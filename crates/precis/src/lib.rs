//! Précis — client for a PDF summarization service.
//!
//! The user stages a PDF (picker or drag-drop), submits it with a chosen
//! summary style, watches live progress over a persistent realtime channel,
//! and gets back a summary that can be rated, copied, downloaded, and
//! revisited from history.
//!
//! # Architecture
//!
//! - **State machine**: the upload/session flow lives in `precis-core` and
//!   is UI-free; components translate DOM events into machine operations.
//! - **Transport**: HTTP via reqwest (browser `fetch()` on web), plus one
//!   persistent WebSocket for progress events.
//! - **Rendering**: Dioxus components with signals and coroutines.
//!
//! # Platform Support
//!
//! - **Web (WASM)**: same-origin server, localStorage persistence
//! - **Desktop**: server from `PRECIS_SERVER_URL`, config-dir persistence

// Enforce memory safety: forbid all unsafe code
#![forbid(unsafe_code)]

pub mod api;
pub mod channel;
pub mod components;
pub mod storage;
