//! End-to-end tests over a real socket.
//!
//! Each test binds the server to an ephemeral port and talks to it with
//! `tokio-tungstenite` and `reqwest`.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::{net::TcpStream, time::timeout};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tsudoi_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryParticipantRepository, InMemorySessionRepository},
    },
    ui::{AppState, Server},
};
use tsudoi_shared::time::SystemClock;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const WAIT: Duration = Duration::from_secs(5);

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

async fn connect(addr: SocketAddr) -> Socket {
    let (socket, _) = connect_async(format!("ws://{}/ws", addr)).await.unwrap();
    socket
}

async fn send(socket: &mut Socket, frame: Value) {
    socket
        .send(Message::text(frame.to_string()))
        .await
        .unwrap();
}

async fn recv(socket: &mut Socket) -> Value {
    loop {
        let msg = timeout(WAIT, socket.next())
            .await
            .expect("timed out waiting for a frame")
            .expect("socket closed")
            .unwrap();
        if msg.is_text() {
            return serde_json::from_str(msg.to_text().unwrap()).unwrap();
        }
    }
}

async fn join(socket: &mut Socket, name: &str) -> String {
    send(
        socket,
        json!({"type": "join", "request_id": "join", "display_name": name}),
    )
    .await;
    let ack = recv(socket).await;
    assert_eq!(ack["type"], "ack");
    ack["joined"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    // テスト項目: /api/health が status ok を返す
    // given (前提条件):
    let addr = start_server().await;

    // when (操作):
    let body: Value = reqwest::get(format!("http://{}/api/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_join_and_public_message_over_websocket() {
    // テスト項目: 2 つの接続で参加し、全体メッセージが両方に届く
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;
    let alice_id = join(&mut alice, "alice").await;

    // when (操作):
    send(
        &mut bob,
        json!({"type": "join", "request_id": "b1", "display_name": "bob"}),
    )
    .await;
    let bob_ack = recv(&mut bob).await;
    let joined = recv(&mut alice).await;

    // then (期待する結果):
    assert_eq!(bob_ack["request_id"], "b1");
    assert_eq!(bob_ack["joined"]["display_name"], "bob");
    assert_eq!(
        bob_ack["joined"]["snapshot"].as_array().unwrap().len(),
        2
    );
    assert_eq!(joined["type"], "participant-joined");
    assert_eq!(joined["display_name"], "bob");

    // when (操作):
    send(
        &mut alice,
        json!({"type": "public-message", "text": "hello", "timestamp": 1_700_000_000_000_i64}),
    )
    .await;

    // then (期待する結果):
    for socket in [&mut alice, &mut bob] {
        let msg = recv(socket).await;
        assert_eq!(msg["type"], "public-message");
        assert_eq!(msg["sender_id"], alice_id.as_str());
        assert_eq!(msg["text"], "hello");
        assert_eq!(msg["timestamp"], 1_700_000_000_000_i64);
    }
}

#[tokio::test]
async fn test_participants_endpoint_and_disconnect() {
    // テスト項目: /api/participants に参加者が並び、切断すると participant-left が届いて一覧から消える
    // given (前提条件):
    let addr = start_server().await;
    let mut alice = connect(addr).await;
    let mut bob = connect(addr).await;
    join(&mut alice, "alice").await;
    let bob_id = join(&mut bob, "bob").await;
    recv(&mut alice).await;

    // when (操作):
    let before: Value = reqwest::get(format!("http://{}/api/participants", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    bob.close(None).await.unwrap();
    let left = recv(&mut alice).await;
    let after: Value = reqwest::get(format!("http://{}/api/participants", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    // then (期待する結果):
    assert_eq!(before["count"], 2);
    assert_eq!(before["participants"][0]["display_name"], "alice");
    assert_eq!(before["participants"][1]["display_name"], "bob");
    assert_eq!(left, json!({"type": "participant-left", "id": bob_id}));
    assert_eq!(after["count"], 1);
}

#[tokio::test]
async fn test_malformed_frame_gets_error_event() {
    // テスト項目: 解釈できないフレームには error イベントが返り、接続は維持される
    // given (前提条件):
    let addr = start_server().await;
    let mut socket = connect(addr).await;

    // when (操作):
    socket.send(Message::text("not json")).await.unwrap();
    let error = recv(&mut socket).await;
    let id = join(&mut socket, "still-here").await;

    // then (期待する結果):
    assert_eq!(error["type"], "error");
    assert_eq!(id.len(), 32);
}
