//! Aggregate statistics strip.

use dioxus::prelude::*;

use super::use_stats;

/// Three counters from the server's stats snapshot. Overwritten wholesale on
/// every refresh; re-fetched after each successful summarization.
#[component]
pub fn StatsStrip() -> Element {
    let stats = use_stats();
    let snapshot = stats().unwrap_or_default();

    // Average rating renders to one decimal place.
    let avg_rating = format!("{:.1}", snapshot.avg_rating);

    rsx! {
        section { class: "pc-stats-strip",
            div { class: "pc-metric-card",
                div { class: "pc-metric-label", "Summaries" }
                div { class: "pc-metric-value", "{snapshot.total_summaries}" }
            }
            div { class: "pc-metric-card",
                div { class: "pc-metric-label", "Avg Rating" }
                div { class: "pc-metric-value", "{avg_rating}" }
            }
            div { class: "pc-metric-card",
                div { class: "pc-metric-label", "Pages Processed" }
                div { class: "pc-metric-value", "{snapshot.total_pages_processed}" }
            }
        }
    }
}
