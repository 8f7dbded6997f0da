//! Summary result card: metadata, rendered body, rating stars, and the
//! copy/download actions.

use dioxus::logger::tracing::warn;
use dioxus::prelude::*;
use precis_core::api::DownloadFormat;
use precis_core::format::{blocks_to_text, summary_blocks, SummaryBlock};

use super::toast::{push_toast, ToastLevel};
use super::{use_actions, use_api, use_session, use_toasts, Action};

const DOWNLOAD_FORMATS: [DownloadFormat; 3] =
    [DownloadFormat::Txt, DownloadFormat::Pdf, DownloadFormat::Docx];

/// The currently displayed summary. Hidden until the first successful
/// summarization or history load.
#[component]
pub fn SummaryCard() -> Element {
    let session = use_session();
    let toasts = use_toasts();

    let Some(record) = session.read().current_summary().cloned() else {
        return rsx! { div {} };
    };

    let blocks = summary_blocks(&record.summary);
    let plain_text = blocks_to_text(&blocks);

    let copy_text = plain_text.clone();
    let handle_copy = move |_| {
        copy_to_clipboard(copy_text.clone(), toasts);
    };

    let rendered_blocks = blocks.iter().enumerate().map(|(idx, block)| match block {
        SummaryBlock::Bullet(text) => rsx! {
            p { key: "{idx}", class: "pc-summary-bullet", "✓ {text}" }
        },
        SummaryBlock::Paragraph(text) => rsx! {
            p { key: "{idx}", class: "pc-summary-paragraph", "{text}" }
        },
    });

    rsx! {
        section { class: "pc-summary-card", "data-role": "summary-panel",
            header { class: "pc-summary-header",
                h2 { class: "pc-summary-filename", "{record.filename}" }
                div { class: "pc-summary-meta",
                    span { class: "pc-tag", "{record.page_count} pages" }
                    span { class: "pc-tag", "{record.word_count} words" }
                    span { class: "pc-tag pc-tag--type", "{record.summary_type.as_str()}" }
                }
            }

            div { class: "pc-summary-body",
                {rendered_blocks}
            }

            footer { class: "pc-summary-actions",
                RatingStars { rating: record.rating, ratable: record.id.is_some() }

                div { class: "pc-summary-buttons",
                    button {
                        class: "pc-btn pc-btn--secondary",
                        onclick: handle_copy,
                        "Copy"
                    }
                    for format in DOWNLOAD_FORMATS {
                        DownloadButton {
                            format,
                            summary: plain_text.clone(),
                            filename: record.filename.clone(),
                        }
                    }
                }
            }
        }
    }
}

/// Five-star rating row with hover preview. Stars are inert until the
/// displayed summary has a persisted identifier.
#[component]
fn RatingStars(rating: Option<u8>, ratable: bool) -> Element {
    let actions = use_actions();
    let mut hover = use_signal(|| None::<u8>);

    // Hover preview wins; otherwise show the stored rating.
    let displayed = hover().or(rating).unwrap_or(0);

    let row_class = if ratable {
        "pc-rating-stars"
    } else {
        "pc-rating-stars pc-rating-stars--disabled"
    };

    rsx! {
        div {
            class: row_class,
            title: if ratable { "Rate this summary" } else { "This summary has not been saved yet" },
            onmouseleave: move |_| hover.set(None),

            for position in 1u8..=5 {
                button {
                    key: "{position}",
                    class: if position <= displayed { "pc-star pc-star--active" } else { "pc-star" },
                    "aria-label": "Rate {position} of 5",
                    onmouseenter: move |_| hover.set(Some(position)),
                    onclick: move |_| actions.send(Action::RateCurrent(position)),
                    "★"
                }
            }
        }
    }
}

/// One export button. Web navigates straight to the download URL; desktop
/// fetches the bytes and hands them to a native save dialog.
#[component]
fn DownloadButton(format: DownloadFormat, summary: String, filename: String) -> Element {
    let api = use_api();
    let toasts = use_toasts();

    // The server appends its own `_summary.<ext>` suffix to this stem.
    let stem = filename
        .strip_suffix(".pdf")
        .unwrap_or(filename.as_str())
        .to_string();

    let handle_download = move |_| {
        let api = api.clone();
        let summary = summary.clone();
        let stem = stem.clone();

        #[cfg(target_arch = "wasm32")]
        {
            let url = api.download_url(format, &summary, &stem);
            if let Some(window) = web_sys::window() {
                if let Err(e) = window.location().set_href(&url) {
                    warn!("download navigation failed: {:?}", e);
                    push_toast(toasts, ToastLevel::Error, "Download failed");
                }
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            spawn(async move {
                match api.download(format, &summary, &stem).await {
                    Ok(bytes) => {
                        let picked = rfd::AsyncFileDialog::new()
                            .set_file_name(format!("{}_summary.{}", stem, format.as_str()))
                            .save_file()
                            .await;
                        if let Some(handle) = picked {
                            match handle.write(&bytes).await {
                                Ok(()) => push_toast(
                                    toasts,
                                    ToastLevel::Success,
                                    "Summary downloaded",
                                ),
                                Err(e) => {
                                    warn!("failed to write download: {}", e);
                                    push_toast(toasts, ToastLevel::Error, "Download failed");
                                }
                            }
                        }
                    }
                    Err(e) => {
                        warn!("download failed: {}", e);
                        push_toast(toasts, ToastLevel::Error, format!("Download failed: {}", e));
                    }
                }
            });
        }
    };

    rsx! {
        button {
            class: "pc-btn pc-btn--secondary",
            onclick: handle_download,
            "{format.label()}"
        }
    }
}

/// Copies the displayed summary text, platform-appropriately.
fn copy_to_clipboard(text: String, toasts: Signal<Vec<super::toast::Toast>>) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let promise = window.navigator().clipboard().write_text(&text);
        spawn(async move {
            match wasm_bindgen_futures::JsFuture::from(promise).await {
                Ok(_) => push_toast(toasts, ToastLevel::Success, "Copied to clipboard!"),
                Err(e) => {
                    warn!("clipboard write failed: {:?}", e);
                    push_toast(toasts, ToastLevel::Error, "Copy failed");
                }
            }
        });
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => push_toast(toasts, ToastLevel::Success, "Copied to clipboard!"),
            Err(e) => {
                warn!("clipboard write failed: {}", e);
                push_toast(toasts, ToastLevel::Error, "Copy failed");
            }
        }
    }
}
