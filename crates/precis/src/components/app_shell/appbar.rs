use dioxus::prelude::*;

use crate::components::{use_history, use_session, use_theme};

/// Global app bar with brand, session status pill, history toggle, and the
/// theme toggle.
#[component]
pub fn AppBar(on_history_toggle: EventHandler<()>, on_theme_toggle: EventHandler<()>) -> Element {
    let theme = use_theme();
    let session = use_session();
    let history = use_history();

    let history_count = history.read().len();
    let theme_icon = theme.read().icon();

    // Session status pill mirrors the upload flow.
    let status_pill = {
        let session = session.read();
        if session.is_submitting() {
            rsx! {
                span { class: "pc-status-pill pc-status-pill--warn",
                    span { class: "pc-status-dot pc-status-dot--warn" }
                    "Summarizing…"
                }
            }
        } else if let Some(staged) = session.staged_file() {
            rsx! {
                span { class: "pc-status-pill pc-status-pill--ok",
                    span { class: "pc-status-dot pc-status-dot--ok" }
                    "Ready: {staged.name}"
                }
            }
        } else {
            rsx! {
                span { class: "pc-status-pill pc-status-pill--muted",
                    span { class: "pc-status-dot pc-status-dot--muted" }
                    "No file staged"
                }
            }
        }
    };

    rsx! {
        header { class: "pc-appbar",
            div { class: "pc-appbar-brand",
                span { class: "pc-appbar-logo", "📄" }
                h1 { class: "pc-appbar-title", "Précis" }
                span { class: "pc-appbar-subtitle", "PDF summarization" }
            }

            div { class: "pc-appbar-actions",
                {status_pill}
                button {
                    class: "pc-appbar-button",
                    "aria-label": "Toggle history panel",
                    onclick: move |_| on_history_toggle.call(()),
                    "🕘 History"
                    if history_count > 0 {
                        span { class: "pc-appbar-badge", "{history_count}" }
                    }
                }
                button {
                    class: "pc-appbar-button pc-appbar-button--icon",
                    "aria-label": "Toggle theme",
                    onclick: move |_| on_theme_toggle.call(()),
                    "{theme_icon}"
                }
            }
        }
    }
}
