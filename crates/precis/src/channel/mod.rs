//! Realtime progress channel.
//!
//! One persistent WebSocket, established at startup and independent of any
//! in-flight job, delivering the server's progress events as they happen.
//! The connection is receive-only at the application level; decoded events
//! are forwarded into an unbounded channel the UI consumes. There is no
//! client-side retry or reconnect logic — transport defaults apply, and a
//! dead channel only costs live progress display.
//!
//! Platform split:
//! - Web: `web_sys::WebSocket` with a `Closure` message handler
//! - Desktop: `tokio-tungstenite` read loop on the shared runtime

use dioxus::logger::tracing::{debug, warn};
use futures_channel::mpsc::{self, UnboundedReceiver};
use futures_util::StreamExt;
use precis_core::error::ChannelError;
use precis_core::progress::ProgressEvent;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

/// Handle to the live progress feed.
///
/// Dropping the handle tears the connection down; the component task that
/// owns it keeps it alive for the whole session.
pub struct ProgressChannel {
    receiver: UnboundedReceiver<ProgressEvent>,
    #[cfg(target_arch = "wasm32")]
    socket: web_sys::WebSocket,
    #[cfg(target_arch = "wasm32")]
    _on_message: Closure<dyn FnMut(web_sys::MessageEvent)>,
    #[cfg(target_arch = "wasm32")]
    _on_error: Closure<dyn FnMut(web_sys::ErrorEvent)>,
}

impl ProgressChannel {
    /// Connects to the server's progress endpoint.
    #[cfg(target_arch = "wasm32")]
    pub async fn connect(url: &str) -> Result<ProgressChannel, ChannelError> {
        let socket = web_sys::WebSocket::new(url)
            .map_err(|e| ChannelError::Connect(format!("{:?}", e)))?;

        let (sender, receiver) = mpsc::unbounded();

        let on_message = Closure::wrap(Box::new(move |event: web_sys::MessageEvent| {
            // Only text frames carry events; anything else is dropped.
            let Some(text) = event.data().as_string() else {
                return;
            };
            match ProgressEvent::from_frame(&text) {
                Ok(Some(event)) => {
                    let _ = sender.unbounded_send(event);
                }
                Ok(None) => {}
                Err(e) => warn!("progress channel frame error: {}", e),
            }
        }) as Box<dyn FnMut(web_sys::MessageEvent)>);
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_error = Closure::wrap(Box::new(move |_event: web_sys::ErrorEvent| {
            warn!("progress channel transport error");
        }) as Box<dyn FnMut(web_sys::ErrorEvent)>);
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        debug!(url, "progress channel connecting");
        Ok(ProgressChannel {
            receiver,
            socket,
            _on_message: on_message,
            _on_error: on_error,
        })
    }

    /// Connects to the server's progress endpoint.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn connect(url: &str) -> Result<ProgressChannel, ChannelError> {
        use tokio_tungstenite::tungstenite::Message;

        let (stream, _response) = tokio_tungstenite::connect_async(url)
            .await
            .map_err(|e| ChannelError::Connect(e.to_string()))?;
        debug!(url, "progress channel connected");

        let (sender, receiver) = mpsc::unbounded();
        tokio::spawn(async move {
            let (_write, mut read) = stream.split();
            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => match ProgressEvent::from_frame(&text) {
                        Ok(Some(event)) => {
                            if sender.unbounded_send(event).is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => warn!("progress channel frame error: {}", e),
                    },
                    Ok(Message::Close(_)) => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!("progress channel read error: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(ProgressChannel { receiver })
    }

    /// Next decoded event; `None` once the connection is gone.
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.receiver.next().await
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ProgressChannel {
    fn drop(&mut self) {
        let _ = self.socket.close();
    }
}
