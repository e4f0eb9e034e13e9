//! `/ws` endpoint backed by the simulated device

use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

use crate::device::Device;

#[derive(Clone)]
pub struct AppState {
    pub device: Arc<Mutex<Device>>,
}

impl AppState {
    pub fn new(device: Device) -> Self {
        Self {
            device: Arc::new(Mutex::new(device)),
        }
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(stream: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = stream.split();
    tracing::info!("client connected");

    while let Some(msg) = receiver.next().await {
        let text = match msg {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("receive failed: {}", e);
                break;
            }
        };

        let reply = match state.device.lock() {
            Ok(mut device) => device.handle(text.as_str()),
            Err(_) => {
                tracing::warn!("device state poisoned");
                break;
            }
        };

        if let Some(reply) = reply {
            tracing::debug!("reply {}", reply);
            if sender
                .send(Message::Text(Utf8Bytes::from(reply)))
                .await
                .is_err()
            {
                break;
            }
        }
    }

    tracing::info!("client disconnected");
}
