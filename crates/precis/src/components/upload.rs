//! Upload card: file staging (picker + drag-drop), summary style selection,
//! the submit button, and the in-flight progress display.
//!
//! File acquisition is platform-specific (hidden inputs on web, native rfd
//! dialog on desktop); everything downstream of "we have a named byte
//! buffer" goes through the same [`Action::StageFile`] path and the session
//! machine's PDF validation.

use dioxus::prelude::*;
use precis_core::api::SummaryType;
use precis_core::format::format_file_size;

use super::{use_actions, use_progress, use_session, Action};

/// Upload card composed of the platform picker, staged-file info, style
/// selector, and submit row.
#[component]
pub fn UploadCard() -> Element {
    let session = use_session();

    // Name and size only; the staged bytes stay in the session.
    let staged = session
        .read()
        .staged_file()
        .map(|file| (file.name.clone(), file.size));
    let submitting = session.read().is_submitting();
    let can_submit = session.read().can_submit();
    let actions = use_actions();

    let file_info = match &staged {
        Some((name, size)) => {
            let size = format_file_size(*size);
            rsx! {
                div { class: "pc-file-info pc-file-info--active",
                    span { class: "pc-file-name", "{name}" }
                    span { class: "pc-file-size", "{size}" }
                }
            }
        }
        None => rsx! {},
    };

    rsx! {
        section { class: "pc-upload-card",
            if cfg!(target_arch = "wasm32") {
                WebDropzone {}
            } else {
                DesktopPicker {}
            }

            {file_info}

            SummaryTypeSelector {}

            div { class: "pc-submit-row",
                button {
                    class: "pc-btn pc-btn--primary pc-submit-button",
                    disabled: !can_submit,
                    onclick: move |_| actions.send(Action::Submit),
                    if submitting { "Summarizing…" } else { "Summarize" }
                }
            }

            if submitting {
                ProgressBar {}
            }
        }
    }
}

/// Summary style selector: one active button out of the five styles.
#[component]
fn SummaryTypeSelector() -> Element {
    let session = use_session();
    let actions = use_actions();
    let selected = session.read().summary_type();

    rsx! {
        div { class: "pc-type-selector",
            for ty in SummaryType::ALL {
                button {
                    key: "{ty.as_str()}",
                    class: if ty == selected { "pc-type-button pc-type-button--active" } else { "pc-type-button" },
                    onclick: move |_| actions.send(Action::SelectSummaryType(ty)),
                    "{ty.label()}"
                }
            }
        }
    }
}

/// Progress bar fed by the realtime channel while a job is in flight.
#[component]
fn ProgressBar() -> Element {
    let progress = use_progress();
    let display = progress.read();

    rsx! {
        div { class: "pc-progress pc-progress--active",
            div { class: "pc-progress-track",
                div {
                    class: "pc-progress-bar",
                    style: "width: {display.percent}%",
                }
            }
            div { class: "pc-progress-status", "{display.status}" }
        }
    }
}

// =============================================================================
// Web implementation (hidden file input + drag-drop zone)
// =============================================================================

#[cfg(target_arch = "wasm32")]
#[component]
fn WebDropzone() -> Element {
    use dioxus::logger::tracing::error;
    use wasm_bindgen::JsCast;

    let actions = use_actions();
    let mut drag_active = use_signal(|| false);

    // Click the hidden file input
    let trigger_file_input = move |_| {
        if let Some(window) = web_sys::window() {
            if let Some(document) = window.document() {
                if let Some(input) = document.get_element_by_id("pc-file-input") {
                    if let Some(el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                        el.click();
                    }
                }
            }
        }
    };

    // Only the first file of a multi-selection is used; the session machine
    // enforces the PDF constraint on whatever arrives.
    let handle_change = move |evt: FormEvent| {
        spawn(async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let name = file.name().to_string();
            match file.read_bytes().await {
                Ok(bytes) => actions.send(Action::StageFile {
                    name,
                    content_type: None,
                    bytes: bytes.to_vec(),
                }),
                Err(e) => error!("Failed to read {}: {}", name, e),
            }
        });
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        drag_active.set(false);
        spawn(async move {
            let Some(file) = evt.files().into_iter().next() else {
                return;
            };
            let name = file.name().to_string();
            match file.read_bytes().await {
                Ok(bytes) => actions.send(Action::StageFile {
                    name,
                    content_type: None,
                    bytes: bytes.to_vec(),
                }),
                Err(e) => error!("Failed to read {}: {}", name, e),
            }
        });
    };

    let dropzone_class = if drag_active() {
        "pc-dropzone pc-dropzone--drag-over"
    } else {
        "pc-dropzone"
    };

    rsx! {
        // Hidden file input
        input {
            id: "pc-file-input",
            r#type: "file",
            class: "pc-hidden-input",
            accept: ".pdf,application/pdf",
            onchange: handle_change,
        }

        div {
            class: dropzone_class,
            onclick: trigger_file_input,
            ondragover: move |evt| {
                evt.prevent_default();
                drag_active.set(true);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                drag_active.set(false);
            },
            ondrop: handle_drop,

            div { class: "pc-dropzone-icon", "📄" }
            div { class: "pc-dropzone-title", "Drop a PDF here" }
            div { class: "pc-dropzone-subtitle", "or click to choose a file" }
        }
    }
}

// Stub for non-WASM compilation (never actually called)
#[cfg(not(target_arch = "wasm32"))]
#[component]
fn WebDropzone() -> Element {
    rsx! {}
}

// =============================================================================
// Desktop implementation (native rfd dialog)
// =============================================================================

#[cfg(not(target_arch = "wasm32"))]
#[component]
fn DesktopPicker() -> Element {
    use dioxus::logger::tracing::error;

    let actions = use_actions();
    let mut is_loading = use_signal(|| false);

    let handle_select_file = move |_| {
        spawn(async move {
            use rfd::AsyncFileDialog;

            is_loading.set(true);

            let picked = AsyncFileDialog::new()
                .set_title("Select a PDF to summarize")
                .add_filter("PDF documents", &["pdf"])
                .pick_file()
                .await;

            if let Some(file) = picked {
                let path = file.path().to_path_buf();
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("document.pdf")
                    .to_string();

                match tokio::fs::read(&path).await {
                    Ok(bytes) => actions.send(Action::StageFile {
                        name: file_name,
                        content_type: None,
                        bytes,
                    }),
                    Err(e) => error!("Failed to read {}: {}", file_name, e),
                }
            }

            is_loading.set(false);
        });
    };

    rsx! {
        div { class: "pc-dropzone",
            div { class: "pc-dropzone-icon", "📄" }
            div { class: "pc-dropzone-title", "Choose a PDF to summarize" }
            button {
                class: "pc-btn pc-btn--secondary",
                disabled: is_loading(),
                onclick: handle_select_file,
                if is_loading() { "Loading…" } else { "Select File" }
            }
        }
    }
}

// Stub for WASM compilation (never actually called)
#[cfg(target_arch = "wasm32")]
#[component]
fn DesktopPicker() -> Element {
    rsx! {}
}
