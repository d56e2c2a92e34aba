//! Join handshake against a real server bound to an ephemeral port.

use std::{net::SocketAddr, sync::Arc};

use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tsudoi_client::{error::ClientError, session::run_client_session};
use tsudoi_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantRepository, InMemorySessionRepository},
    },
    ui::{AppState, Server},
};
use tsudoi_shared::time::SystemClock;

async fn start_server() -> SocketAddr {
    let state = AppState::new(
        Arc::new(InMemoryParticipantRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(WebSocketMessagePusher::default()),
        Arc::new(SystemClock),
    );
    let app = Server::new(state).router();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_taken_name_is_rejected() {
    // テスト項目: 使用中の名前で接続すると NameRejected で終了する
    // given (前提条件):
    let addr = start_server().await;
    let url = format!("ws://{}/ws", addr);
    let (mut alice, _) = connect_async(url.as_str()).await.unwrap();
    alice
        .send(Message::text(
            r#"{"type":"join","request_id":"1","display_name":"alice"}"#,
        ))
        .await
        .unwrap();
    alice.next().await.unwrap().unwrap();

    // when (操作):
    let result = run_client_session(&url, "alice").await;

    // then (期待する結果):
    let error = result.unwrap_err().downcast::<ClientError>().unwrap();
    assert!(matches!(*error, ClientError::NameRejected(_)));
}

#[tokio::test]
async fn test_blank_name_is_rejected() {
    // テスト項目: 空白だけの名前は NameRejected で終了する
    // given (前提条件):
    let addr = start_server().await;
    let url = format!("ws://{}/ws", addr);

    // when (操作):
    let result = run_client_session(&url, "   ").await;

    // then (期待する結果):
    let error = result.unwrap_err().downcast::<ClientError>().unwrap();
    assert!(matches!(*error, ClientError::NameRejected(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    // テスト項目: 接続できないサーバーは ConnectionError になる（再接続の対象）
    // given (前提条件):
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    // when (操作):
    let result = run_client_session(&format!("ws://{}/ws", addr), "alice").await;

    // then (期待する結果):
    let error = result.unwrap_err().downcast::<ClientError>().unwrap();
    assert!(matches!(*error, ClientError::ConnectionError(_)));
}
