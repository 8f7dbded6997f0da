//! Transient, auto-dismissing notifications.
//!
//! Every user-initiated action that fails surfaces here; severity only
//! changes the styling. Toasts dismiss themselves after a fixed delay.

use dioxus::prelude::*;
use precis_core::config::TOAST_DISMISS_MS;
use std::sync::atomic::{AtomicU64, Ordering};

use super::use_toasts;

static TOAST_SEQ: AtomicU64 = AtomicU64::new(1);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn class(self) -> &'static str {
        match self {
            ToastLevel::Info => "pc-toast--info",
            ToastLevel::Success => "pc-toast--success",
            ToastLevel::Error => "pc-toast--error",
        }
    }
}

/// One visible notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
}

/// Shows a notification and schedules its dismissal.
pub fn push_toast(mut toasts: Signal<Vec<Toast>>, level: ToastLevel, message: impl Into<String>) {
    let id = TOAST_SEQ.fetch_add(1, Ordering::Relaxed);
    toasts.with_mut(|list| {
        list.push(Toast {
            id,
            level,
            message: message.into(),
        })
    });

    spawn(async move {
        sleep_ms(TOAST_DISMISS_MS).await;
        toasts.with_mut(|list| list.retain(|toast| toast.id != id));
    });
}

/// Cross-platform timer used for toast dismissal.
pub(crate) async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Fixed stack of active notifications.
#[component]
pub fn ToastHost() -> Element {
    let toasts = use_toasts();
    let list = toasts.read();

    if list.is_empty() {
        return rsx! { div {} };
    }

    rsx! {
        div { class: "pc-toast-stack",
            for toast in list.iter() {
                div {
                    key: "{toast.id}",
                    class: "pc-toast {toast.level.class()}",
                    "{toast.message}"
                }
            }
        }
    }
}
