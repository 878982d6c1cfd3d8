//! Common test utilities for booster-client integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use booster_client::{Dashboard, MockApi};
use booster_core::{MemorySessionStore, Session};
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

/// Test harness wiring a [`MockApi`] and an in-memory session store into a
/// [`Dashboard`].
pub struct TestHarness {
    /// Scripted backend
    pub api: Arc<MockApi>,
    /// Session store shared with the dashboard
    pub sessions: Arc<MemorySessionStore>,
    /// Service under test
    pub dashboard: Dashboard,
}

impl TestHarness {
    /// Logged out, with no scripted replies.
    pub fn new() -> Self {
        Self::with_api(MockApi::new())
    }

    /// Logged out, with a scripted backend.
    pub fn with_api(api: MockApi) -> Self {
        Self::build(api, MemorySessionStore::new())
    }

    /// Logged in as chat `42`.
    pub fn logged_in(api: MockApi) -> Self {
        Self::build(api, MemorySessionStore::with_session(Session::for_chat("42")))
    }

    fn build(api: MockApi, sessions: MemorySessionStore) -> Self {
        let api = Arc::new(api);
        let sessions = Arc::new(sessions);
        let dashboard = Dashboard::new(api.clone(), sessions.clone());
        Self {
            api,
            sessions,
            dashboard,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Serve `router` under `/api` on an ephemeral port; returns the API base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = axum::Router::new().nest("/api", router);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

/// Listener for a one-connection push server.
pub async fn push_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Accept one WebSocket client.
pub async fn accept_socket(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    tokio_tungstenite::accept_async(stream).await.unwrap()
}

/// Send one text frame.
pub async fn send_text(socket: &mut WebSocketStream<TcpStream>, text: &str) {
    socket.send(Message::text(text)).await.unwrap();
}

/// Next text frame, `None` once the client has gone.
pub async fn recv_text(socket: &mut WebSocketStream<TcpStream>) -> Option<String> {
    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(text)) => return Some(text.as_str().to_string()),
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => {}
        }
    }
    None
}

/// Engine open packet as a Socket.IO v4 server sends it.
pub const OPEN_PACKET: &str =
    r#"0{"sid":"eng-1","upgrades":[],"pingInterval":25000,"pingTimeout":20000,"maxPayload":1000000}"#;

/// Server-side handshake: open, expect a connect, acknowledge it and return
/// the client's connect frame.
pub async fn server_handshake(socket: &mut WebSocketStream<TcpStream>) -> String {
    send_text(socket, OPEN_PACKET).await;
    let connect = recv_text(socket).await.unwrap();
    send_text(socket, r#"40{"sid":"sock-1"}"#).await;
    connect
}
