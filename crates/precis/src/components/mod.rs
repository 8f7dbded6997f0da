//! UI components for the Précis application.
//!
//! This module contains all Dioxus components plus the top-level controller:
//! the [`App`] component owns every piece of shared state as a signal,
//! provides them through context, and runs the action coroutine that drives
//! the session state machine.
//!
//! # Context Providers
//!
//! Components use Dioxus context for shared state:
//!
//! ```ignore
//! // Read the session from any component
//! let session = use_session();
//! if session.read().can_submit() { /* ... */ }
//!
//! // Dispatch a typed action to the controller
//! let actions = use_actions();
//! actions.send(Action::Submit);
//! ```

mod app_shell;
mod history;
mod stats;
mod summary;
pub mod toast;
mod upload;

pub use app_shell::{AppBar, Footer};
pub use history::HistorySidebar;
pub use stats::StatsStrip;
pub use summary::SummaryCard;
pub use toast::{Toast, ToastHost, ToastLevel};
pub use upload::UploadCard;

use crate::api::ApiClient;
use crate::channel::ProgressChannel;
use crate::storage;
use dioxus::logger::tracing::{debug, info, warn};
use dioxus::prelude::*;
use futures_channel::mpsc::UnboundedReceiver;
use futures_util::StreamExt;
use precis_core::api::{HistoryEntry, StatsSnapshot, SummaryRecord, SummaryType};
use precis_core::error::ApiError;
use precis_core::progress::ProgressDisplay;
use precis_core::session::{Effect, SessionState};
use precis_core::theme::Theme;
use toast::push_toast;

/// Typed UI events. Components never touch the session machine directly;
/// they dispatch one of these to the controller coroutine.
pub enum Action {
    /// A file arrived from the picker or a drop event.
    StageFile {
        name: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
    SelectSummaryType(SummaryType),
    /// Submit the staged file with the selected style.
    Submit,
    /// Rate the displayed summary (1-5).
    RateCurrent(u8),
    RefreshHistory,
    RefreshStats,
    /// Load a past summary into the main view.
    OpenHistoryEntry(i64),
    ToggleTheme,
}

// ============================================================================
// Context providers
// ============================================================================

/// Session state machine (staged file, style, displayed summary).
pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

/// The full history list, replaced wholesale on each refresh.
pub fn use_history() -> Signal<Vec<HistoryEntry>> {
    use_context::<Signal<Vec<HistoryEntry>>>()
}

/// Latest stats snapshot; `None` until the first fetch lands.
pub fn use_stats() -> Signal<Option<StatsSnapshot>> {
    use_context::<Signal<Option<StatsSnapshot>>>()
}

/// Progress display fed by the realtime channel.
pub fn use_progress() -> Signal<ProgressDisplay> {
    use_context::<Signal<ProgressDisplay>>()
}

/// Active theme.
pub fn use_theme() -> Signal<Theme> {
    use_context::<Signal<Theme>>()
}

/// Active notifications.
pub fn use_toasts() -> Signal<Vec<Toast>> {
    use_context::<Signal<Vec<Toast>>>()
}

/// Shared HTTP client.
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>()
}

/// Handle for dispatching [`Action`]s to the controller.
pub fn use_actions() -> Coroutine<Action> {
    use_context::<Coroutine<Action>>()
}

// ============================================================================
// Controller
// ============================================================================

#[component]
pub fn App() -> Element {
    // Shared state, one signal per slice. Responses to concurrent requests
    // may land in any order; each task writes only the slice it owns.
    let session = use_signal(SessionState::new);
    use_context_provider(|| session);

    let history = use_signal(Vec::<HistoryEntry>::new);
    use_context_provider(|| history);

    let stats = use_signal(|| None::<StatsSnapshot>);
    use_context_provider(|| stats);

    let progress = use_signal(ProgressDisplay::default);
    use_context_provider(|| progress);

    let toasts = use_signal(Vec::<Toast>::new);
    use_context_provider(|| toasts);

    let theme = use_signal(storage::load_theme);
    use_context_provider(|| theme);

    let api = ApiClient::from_env();
    use_context_provider(|| api.clone());

    // History panel visibility is plain component state, passed down.
    let mut history_open = use_signal(|| false);

    // Action coroutine: translates typed UI events into state-machine
    // operations. Network work is spawned so actions keep draining while
    // requests are in flight.
    let actions = use_coroutine({
        let api = api.clone();
        move |mut rx: UnboundedReceiver<Action>| {
            let api = api.clone();
            async move {
                while let Some(action) = rx.next().await {
                    handle_action(
                        action,
                        &api,
                        session,
                        history,
                        stats,
                        progress,
                        toasts,
                        theme,
                        history_open,
                    );
                }
            }
        }
    });
    use_context_provider(|| actions);

    // Connect the realtime progress channel once at startup. It outlives
    // every job; correlation is positional because only one job is ever in
    // flight (enforced by the session machine).
    let ws_url = api.ws_url();
    use_effect(move || {
        let url = ws_url.clone();
        spawn(run_progress_channel(url, progress));
    });

    // Initial loads: theme is already applied; fetch history and stats.
    use_effect(move || {
        actions.send(Action::RefreshHistory);
        actions.send(Action::RefreshStats);
    });

    let current_theme = theme.read().as_str();

    rsx! {
        div { class: "pc-app", "data-theme": "{current_theme}",
            AppBar {
                on_history_toggle: move |_| {
                    history_open.set(!history_open());
                },
                on_theme_toggle: move |_| actions.send(Action::ToggleTheme),
            }

            main { class: "pc-main",
                StatsStrip {}
                UploadCard {}
                SummaryCard {}
            }

            Footer {}

            HistorySidebar {
                open: history_open,
                on_close: move |_| history_open.set(false),
            }

            ToastHost {}
        }
    }
}

/// Dispatches one action. Synchronous transitions happen inline; anything
/// that needs the network is spawned onto the UI task pool.
#[allow(clippy::too_many_arguments)]
fn handle_action(
    action: Action,
    api: &ApiClient,
    mut session: Signal<SessionState>,
    history: Signal<Vec<HistoryEntry>>,
    stats: Signal<Option<StatsSnapshot>>,
    mut progress: Signal<ProgressDisplay>,
    toasts: Signal<Vec<Toast>>,
    mut theme: Signal<Theme>,
    mut history_open: Signal<bool>,
) {
    match action {
        Action::StageFile {
            name,
            content_type,
            bytes,
        } => {
            let result =
                session.with_mut(|s| s.stage_file(&name, content_type.as_deref(), bytes));
            if let Err(e) = result {
                push_toast(toasts, ToastLevel::Error, e.to_string());
            }
        }

        Action::SelectSummaryType(summary_type) => {
            session.with_mut(|s| s.select_summary_type(summary_type));
        }

        Action::Submit => {
            let job = match session.with_mut(|s| s.begin_submit()) {
                Ok(job) => job,
                Err(e) => {
                    push_toast(toasts, ToastLevel::Error, e.to_string());
                    return;
                }
            };
            progress.set(ProgressDisplay::reset("Starting…"));

            let api = api.clone();
            spawn(async move {
                match api.summarize(&job).await {
                    Ok(record) => {
                        let effects = session.with_mut(|s| s.submit_succeeded(record));
                        for effect in effects {
                            match effect {
                                Effect::RefreshHistory => {
                                    spawn(refresh_history(api.clone(), history));
                                }
                                Effect::RefreshStats => {
                                    spawn(refresh_stats(api.clone(), stats));
                                }
                            }
                        }
                        push_toast(
                            toasts,
                            ToastLevel::Success,
                            "Summary generated successfully!",
                        );
                    }
                    Err(ApiError::Server(message)) => {
                        session.with_mut(|s| s.submit_failed());
                        push_toast(toasts, ToastLevel::Error, message);
                    }
                    Err(e) => {
                        session.with_mut(|s| s.submit_failed());
                        push_toast(toasts, ToastLevel::Error, format!("An error occurred: {}", e));
                    }
                }
            });
        }

        Action::RateCurrent(rating) => {
            // No identifier, no network call.
            let Some(target) = session.read().rating_target() else {
                debug!("rating ignored: summary has no identifier");
                return;
            };
            let api = api.clone();
            spawn(async move {
                match api.rate(target, rating).await {
                    Ok(()) => {
                        if let Err(e) = session.with_mut(|s| s.apply_rating(rating)) {
                            warn!("rating not recorded: {}", e);
                        }
                        push_toast(toasts, ToastLevel::Success, "Rating saved!");
                    }
                    Err(e) => {
                        push_toast(
                            toasts,
                            ToastLevel::Error,
                            format!("Failed to save rating: {}", e),
                        );
                    }
                }
            });
        }

        Action::RefreshHistory => {
            spawn(refresh_history(api.clone(), history));
        }

        Action::RefreshStats => {
            spawn(refresh_stats(api.clone(), stats));
        }

        Action::OpenHistoryEntry(id) => {
            let api = api.clone();
            spawn(async move {
                match api.history_item(id).await {
                    Ok(entry) => {
                        session.with_mut(|s| s.open_history_entry(SummaryRecord::from(entry)));
                        history_open.set(false);
                    }
                    Err(e) => {
                        push_toast(
                            toasts,
                            ToastLevel::Error,
                            format!("Failed to load history item: {}", e),
                        );
                    }
                }
            });
        }

        Action::ToggleTheme => {
            let next = theme.read().toggle();
            theme.set(next);
            // Local persistence is authoritative; the server mirror is
            // fire-and-forget and never surfaced.
            if let Err(e) = storage::save_theme_local(next) {
                warn!("theme not persisted locally: {}", e);
            }
            let api = api.clone();
            spawn(async move {
                if let Err(e) = api.save_theme(next).await {
                    debug!("theme mirror failed: {}", e);
                }
            });
        }
    }
}

async fn refresh_history(api: ApiClient, mut history: Signal<Vec<HistoryEntry>>) {
    match api.history().await {
        Ok(entries) => {
            debug!(count = entries.len(), "history refreshed");
            history.set(entries);
        }
        Err(e) => warn!("failed to load history: {}", e),
    }
}

async fn refresh_stats(api: ApiClient, mut stats: Signal<Option<StatsSnapshot>>) {
    match api.stats().await {
        Ok(snapshot) => stats.set(Some(snapshot)),
        Err(e) => warn!("failed to load stats: {}", e),
    }
}

/// Consumes the realtime channel for the lifetime of the app, folding every
/// event into the progress display. No reconnect: a dead channel only costs
/// live progress, never correctness.
async fn run_progress_channel(url: String, mut progress: Signal<ProgressDisplay>) {
    match ProgressChannel::connect(&url).await {
        Ok(mut channel) => {
            info!(url = %url, "progress channel up");
            while let Some(event) = channel.next_event().await {
                progress.with_mut(|display| display.apply(&event));
            }
            warn!("progress channel closed");
        }
        Err(e) => warn!("progress channel unavailable: {}", e),
    }
}
