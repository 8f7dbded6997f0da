use dioxus::prelude::*;

/// Footer with a one-line description of where the work happens.
#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "pc-footer",
            span { class: "pc-footer-text",
                "Summaries are generated and stored by the server. Ratings help tune future output."
            }
        }
    }
}
