//! Common test utilities for booster-cli integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use booster_cli::cli::Command;
use booster_cli::{Cli, Console};
use booster_client::{Dashboard, MockApi, PushChannel};
use booster_core::{MemorySessionStore, Session};
use clap::Parser;
use futures::{SinkExt, StreamExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;

/// Console wired to a [`MockApi`] and an in-memory session.
pub struct TestHarness {
    /// Scripted backend
    pub api: Arc<MockApi>,
    /// Session store
    pub sessions: Arc<MemorySessionStore>,
    /// Console under test
    pub console: Console,
}

impl TestHarness {
    /// Logged out; the push server is unreachable.
    pub fn new(api: MockApi) -> Self {
        Self::build(api, MemorySessionStore::new(), "http://127.0.0.1:1")
    }

    /// Logged in as chat `42`; the push server is unreachable.
    pub fn logged_in(api: MockApi) -> Self {
        Self::logged_in_with_push(api, "http://127.0.0.1:1")
    }

    /// Logged in as chat `42` with a push server at `push_url`.
    pub fn logged_in_with_push(api: MockApi, push_url: &str) -> Self {
        Self::build(
            api,
            MemorySessionStore::with_session(Session::for_chat("42")),
            push_url,
        )
    }

    fn build(api: MockApi, sessions: MemorySessionStore, push_url: &str) -> Self {
        let api = Arc::new(api);
        let sessions = Arc::new(sessions);
        let dashboard = Dashboard::new(api.clone(), sessions.clone());
        let push = PushChannel::new(push_url, Duration::from_secs(2));
        Self {
            api,
            sessions,
            console: Console::new(dashboard, push),
        }
    }

    /// Run `booster <args>` and return what it printed.
    pub async fn run(&self, args: &[&str]) -> (booster_cli::Result<()>, String) {
        let command = parse(args);
        let mut out = Vec::new();
        let result = self.console.run(&command, &mut out).await;
        (result, String::from_utf8(out).unwrap())
    }
}

/// Parse `booster <args>` into a command.
pub fn parse(args: &[&str]) -> Command {
    let argv = std::iter::once("booster").chain(args.iter().copied());
    Cli::try_parse_from(argv).unwrap().command
}

/// Listener for a one-connection push server.
pub async fn push_listener() -> (TcpListener, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    (listener, addr)
}

/// Accept one client and complete the Socket.IO handshake and room join.
pub async fn accept_and_join(listener: &TcpListener) -> WebSocketStream<TcpStream> {
    let (stream, _) = listener.accept().await.unwrap();
    let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();
    send(&mut socket, r#"0{"sid":"eng-1","pingInterval":25000,"pingTimeout":20000}"#).await;
    let _connect = recv(&mut socket).await;
    send(&mut socket, r#"40{"sid":"sock-1"}"#).await;
    let join = recv(&mut socket).await.unwrap();
    assert_eq!(join, r#"42["join","42"]"#);
    socket
}

/// Send one text frame.
pub async fn send(socket: &mut WebSocketStream<TcpStream>, text: &str) {
    socket.send(Message::text(text)).await.unwrap();
}

/// Next text frame, `None` once the client has gone.
pub async fn recv(socket: &mut WebSocketStream<TcpStream>) -> Option<String> {
    while let Some(message) = socket.next().await {
        match message {
            Ok(Message::Text(text)) => return Some(text.as_str().to_string()),
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => {}
        }
    }
    None
}
