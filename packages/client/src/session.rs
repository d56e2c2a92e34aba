//! WebSocket client session management.

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tsudoi_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};
use tsudoi_shared::time::get_timestamp_millis;

use crate::{
    domain::parse_input,
    error::ClientError,
    formatter::MessageFormatter,
    state::{JOIN_REQUEST_ID, Outgoing, SessionState},
    ui::redisplay_prompt,
};

/// Run one WebSocket client session: connect, join, then chat until the
/// user quits or the connection drops
pub async fn run_client_session(
    url: &str,
    display_name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    // Join handshake
    let join = ClientMessage::Join {
        request_id: Some(JOIN_REQUEST_ID.to_string()),
        display_name: Some(display_name.to_string()),
    };
    write
        .send(Message::text(serde_json::to_string(&join)?))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    // Events for other participants may arrive before the ack
    let mut early_events = Vec::new();
    let joined = loop {
        let message = match read.next().await {
            Some(Ok(Message::Text(text))) => text,
            Some(Ok(Message::Close(_))) | None => {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection closed before join completed".to_string(),
                )));
            }
            Some(Err(e)) => return Err(Box::new(ClientError::ConnectionError(e.to_string()))),
            Some(Ok(_)) => continue,
        };
        match serde_json::from_str::<ServerMessage>(message.as_str()) {
            Ok(ServerMessage::Ack {
                request_id,
                error,
                joined,
            }) if request_id == JOIN_REQUEST_ID => {
                if let Some(error) = error {
                    return Err(Box::new(ClientError::NameRejected(error)));
                }
                match joined {
                    Some(joined) => break joined,
                    None => {
                        return Err(Box::new(ClientError::ConnectionError(
                            "Join acknowledgment without participant data".to_string(),
                        )));
                    }
                }
            }
            Ok(ServerMessage::Error { message }) => {
                return Err(Box::new(ClientError::ConnectionError(message)));
            }
            Ok(event) => early_events.push(event),
            Err(e) => tracing::warn!("Unrecognized message during join: {}", e),
        }
    };

    let mut state = SessionState::from_joined(joined);
    println!(
        "\nYou are '{}'. Type messages and press Enter to send. /msg <name> <text>, /nick <name>, /who, /quit.",
        state.display_name
    );
    print!("{}", state.format_roster());
    for event in early_events {
        if let Some(shown) = state.apply(event) {
            print!("{}", shown);
        }
    }

    let (prompt_tx, prompt_rx) = watch::channel(state.display_name.clone());
    let state = Arc::new(Mutex::new(state));

    // Spawn a task to handle incoming messages
    let read_state = state.clone();
    let read_prompt = prompt_tx;
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let mut state = read_state.lock().await;
                    let shown = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => state.apply(message),
                        Err(_) => Some(MessageFormatter::format_raw_message(text.as_str())),
                    };
                    if *read_prompt.borrow() != state.display_name {
                        read_prompt.send_replace(state.display_name.clone());
                    }
                    if let Some(shown) = shown {
                        print!("{}", shown);
                        redisplay_prompt(&state.display_name);
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            let prompt = format!("{}> ", *prompt_rx.borrow());
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into requests
    let write_state = state.clone();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let Some(command) = parse_input(&line) else {
                continue;
            };

            let outgoing = write_state
                .lock()
                .await
                .prepare(command, get_timestamp_millis());
            let request = match outgoing {
                Outgoing::Send(request) => request,
                Outgoing::Print(text) => {
                    print!("{}", text);
                    redisplay_prompt(&write_state.lock().await.display_name);
                    continue;
                }
                Outgoing::Quit => break,
            };

            let json = match serde_json::to_string(&request) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::text(json)).await {
                tracing::warn!("Failed to send message: {}", e);
                write_error = true;
                break;
            }
        }

        if !write_error {
            write.close().await.ok();
        }
        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}
