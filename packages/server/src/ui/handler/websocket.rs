//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::{mpsc, oneshot};

use crate::{
    domain::{ChannelId, ChannelIdFactory, PusherChannel},
    infrastructure::dto::websocket::ServerMessage,
    ui::state::AppState,
};

use super::router::dispatch;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// Every frame for this channel, direct replies included, goes through the
/// same queue, so the channel observes events in the order they were pushed.
///
/// # Arguments
///
/// * `rx` - Outbound queue of this channel
/// * `sender` - WebSocket sink to send messages to this client
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let channel = ChannelIdFactory::generate();
    let (sender, mut receiver) = socket.split();

    // Register the outbound queue before reading anything from the client
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_channel(channel.clone(), tx.clone())
        .await;
    tracing::info!("Channel '{}' connected", channel);

    // Stops the receive loop between frames, never in the middle of a request
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let recv_state = state.clone();
    let recv_channel = channel.clone();
    let mut recv_task = tokio::spawn(async move {
        loop {
            let frame = tokio::select! {
                frame = receiver.next() => frame,
                _ = &mut stop_rx => break,
            };
            let Some(frame) = frame else {
                break;
            };
            let msg = match frame {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("Channel '{}' transport error: {}", recv_channel, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Channel '{}' sent: {}", recv_channel, text.as_str());
                    if let Some(reply) = dispatch(&recv_state, &recv_channel, text.as_str()).await
                    {
                        reply_to(&tx, &recv_channel, &reply);
                    }
                }
                Message::Binary(_) => {
                    tracing::debug!("Ignoring binary frame from '{}'", recv_channel);
                }
                Message::Close(_) => {
                    tracing::info!("Channel '{}' requested close", recv_channel);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If the receive side ends, the outbound queue has nobody to deliver to.
    // If the send side ends, let the request in flight finish before cleanup.
    let recv_finished = tokio::select! {
        _ = &mut recv_task => true,
        _ = &mut send_task => false,
    };
    if recv_finished {
        send_task.abort();
    } else {
        let _ = stop_tx.send(());
        if let Err(e) = recv_task.await {
            tracing::error!("Receive task for '{}' failed: {}", channel, e);
        }
    }

    if let Some(participant) = state
        .disconnect_participant_usecase
        .execute(&channel)
        .await
    {
        tracing::info!(
            "Channel '{}' closed, participant '{}' ({}) removed",
            channel,
            participant.display_name,
            participant.id
        );
    } else {
        tracing::info!("Channel '{}' closed before joining", channel);
    }
}

fn reply_to(tx: &PusherChannel, channel: &ChannelId, reply: &ServerMessage) {
    let json = match serde_json::to_string(reply) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to serialize reply for '{}': {}", channel, e);
            return;
        }
    };
    if tx.send(json).is_err() {
        tracing::debug!("Channel '{}' closed before the reply was sent", channel);
    }
}
