//! History sidebar: past summaries, newest first.

use dioxus::prelude::*;
use precis_core::api::HistoryEntry;
use precis_core::format::format_created_at;

use super::{use_actions, use_history, Action};

/// Slide-in panel listing every persisted summary. Clicking an item loads
/// the full record into the main view and closes the panel.
#[component]
pub fn HistorySidebar(open: ReadSignal<bool>, on_close: EventHandler<()>) -> Element {
    let history = use_history();
    let entries = history.read();

    let panel_class = if open() {
        "pc-history pc-history--open"
    } else {
        "pc-history"
    };

    rsx! {
        aside { class: panel_class, "data-role": "history-panel",
            header { class: "pc-history-header",
                h2 { class: "pc-history-title", "History" }
                button {
                    class: "pc-history-close",
                    "aria-label": "Close history panel",
                    onclick: move |_| on_close.call(()),
                    "✕"
                }
            }

            if entries.is_empty() {
                div { class: "pc-history-empty",
                    "No summaries yet. Upload a PDF to get started."
                }
            } else {
                div { class: "pc-history-list",
                    for entry in entries.iter() {
                        HistoryItem { key: "{entry.id}", entry: entry.clone() }
                    }
                }
            }
        }
    }
}

/// One history row: filename, relative age, and the counts that matter.
#[component]
fn HistoryItem(entry: HistoryEntry) -> Element {
    let actions = use_actions();
    let created = format_created_at(&entry.created_at);
    let id = entry.id;

    let rating_badge = match entry.rating() {
        Some(rating) => rsx! {
            span { class: "pc-history-item-rating", "★ {rating}" }
        },
        None => rsx! {},
    };

    rsx! {
        article {
            class: "pc-history-item",
            onclick: move |_| actions.send(Action::OpenHistoryEntry(id)),

            div { class: "pc-history-item-header",
                span { class: "pc-history-item-title", "📄 {entry.filename}" }
                span { class: "pc-history-item-date", "{created}" }
            }
            div { class: "pc-history-item-meta",
                span { "{entry.page_count} pages" }
                span { "{entry.word_count} words" }
                span { "{entry.summary_type.label()}" }
                {rating_badge}
            }
        }
    }
}
