//! Socket.IO client over a WebSocket.
//!
//! [`PushChannel::subscribe`] performs the Engine.IO handshake, connects to
//! the default namespace, joins the chat-id room and only then returns, so a
//! REST call issued afterwards cannot race ahead of the join. A spawned task
//! then answers pings and forwards decoded events until either side closes.
//! There is no reconnect.

use std::time::Duration;

use booster_core::{ChatId, PushEvent};
use futures::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::{Error, Result};
use crate::push::packet::{EnginePacket, SocketPacket};
use crate::push::state::{ChannelHandle, ChannelState};

/// Event name used to join a room.
pub const JOIN_EVENT: &str = "join";

/// Default handshake timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const EVENT_BUFFER: usize = 256;

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Factory for push subscriptions against one server.
#[derive(Debug, Clone)]
pub struct PushChannel {
    url: String,
    connect_timeout: Duration,
}

impl PushChannel {
    /// Channel for the server at `url` (e.g. `http://localhost:5080`).
    pub fn new(url: impl Into<String>, connect_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            connect_timeout,
        }
    }

    /// WebSocket endpoint derived from the server URL.
    pub fn endpoint(&self) -> Result<reqwest::Url> {
        websocket_url(&self.url)
    }

    /// Connect, join `room` and start forwarding events.
    pub async fn subscribe(&self, room: &ChatId, token: Option<&str>) -> Result<Subscription> {
        let endpoint = self.endpoint()?;
        let handle = ChannelHandle::new(room.as_str());
        handle.set_state(ChannelState::Connecting);

        let auth = token.filter(|t| !t.is_empty()).map(|t| json!({ "token": t }));
        let connected = tokio::time::timeout(
            self.connect_timeout,
            handshake(endpoint.as_str(), room, auth),
        )
        .await;

        let socket = match connected {
            Ok(Ok(socket)) => socket,
            Ok(Err(e)) => {
                handle.set_state(ChannelState::Failed(e.to_string()));
                return Err(e);
            }
            Err(_) => {
                let e = Error::push(format!(
                    "handshake with {endpoint} timed out after {:?}",
                    self.connect_timeout
                ));
                handle.set_state(ChannelState::Failed(e.to_string()));
                return Err(e);
            }
        };

        handle.set_state(ChannelState::Connected);
        tracing::info!(room = %room, endpoint = %endpoint, "Joined push room");

        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = tokio::spawn(read_loop(socket, handle.clone(), events_tx, shutdown_rx));

        Ok(Subscription {
            handle,
            events: events_rx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        })
    }
}

/// A live room subscription.
///
/// Dropping it closes the connection.
#[derive(Debug)]
pub struct Subscription {
    handle: ChannelHandle,
    events: mpsc::Receiver<PushEvent>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Next event, `None` once the connection has ended.
    pub async fn next(&mut self) -> Option<PushEvent> {
        self.events.recv().await
    }

    /// Connection state.
    pub fn handle(&self) -> &ChannelHandle {
        &self.handle
    }

    /// Disconnect and wait for the reader to finish.
    pub async fn close(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::debug!(error = %e, "Push reader ended abnormally");
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// `http(s)://host[/]` → `ws(s)://host/socket.io/?EIO=4&transport=websocket`
pub fn websocket_url(server: &str) -> Result<reqwest::Url> {
    let mut url = reqwest::Url::parse(server).map_err(|e| {
        booster_core::Error::config(format!("Invalid push URL '{server}': {e}"))
    })?;
    let scheme = match url.scheme() {
        "http" | "ws" => "ws",
        "https" | "wss" => "wss",
        other => {
            return Err(booster_core::Error::config(format!(
                "Unsupported push URL scheme '{other}'"
            ))
            .into());
        }
    };
    url.set_scheme(scheme)
        .map_err(|()| booster_core::Error::config(format!("Cannot use scheme {scheme}")))?;
    url.set_path("/socket.io/");
    url.set_query(None);
    url.query_pairs_mut()
        .append_pair("EIO", "4")
        .append_pair("transport", "websocket");
    Ok(url)
}

async fn send_packet(socket: &mut Socket, packet: &EnginePacket) -> Result<()> {
    let text = packet.encode()?;
    tracing::trace!(frame = %text, "Push frame out");
    socket.send(Message::text(text)).await?;
    Ok(())
}

/// Read the next Engine.IO packet, answering pings on the way.
async fn next_packet(socket: &mut Socket) -> Result<Option<EnginePacket>> {
    while let Some(message) = socket.next().await {
        match message? {
            Message::Text(text) => {
                tracing::trace!(frame = %text.as_str(), "Push frame in");
                match EnginePacket::decode(text.as_str())? {
                    EnginePacket::Ping(probe) => {
                        send_packet(socket, &EnginePacket::Pong(probe)).await?;
                    }
                    EnginePacket::Noop => {}
                    packet => return Ok(Some(packet)),
                }
            }
            Message::Close(_) => return Ok(None),
            Message::Binary(_) => {
                tracing::debug!("Ignoring binary push frame");
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
        }
    }
    Ok(None)
}

async fn handshake(endpoint: &str, room: &ChatId, auth: Option<Value>) -> Result<Socket> {
    let (mut socket, _response) = tokio_tungstenite::connect_async(endpoint).await?;

    match next_packet(&mut socket).await? {
        Some(EnginePacket::Open(open)) => {
            tracing::debug!(sid = %open.sid, ping_interval = open.ping_interval, "Engine open");
        }
        Some(other) => return Err(Error::push(format!("expected open packet, got {other:?}"))),
        None => return Err(Error::push("closed before open packet")),
    }

    send_packet(&mut socket, &EnginePacket::Message(SocketPacket::connect(auth))).await?;

    loop {
        match next_packet(&mut socket).await? {
            Some(EnginePacket::Message(SocketPacket::Connect { .. })) => break,
            Some(EnginePacket::Message(SocketPacket::ConnectError { data, .. })) => {
                return Err(Error::push(format!(
                    "connection refused: {}",
                    SocketPacket::error_message(&data)
                )));
            }
            Some(EnginePacket::Close) | None => {
                return Err(Error::push("closed before namespace connect"));
            }
            Some(other) => tracing::debug!(packet = ?other, "Ignoring packet during connect"),
        }
    }

    let join = SocketPacket::event(JOIN_EVENT, vec![Value::String(room.to_string())]);
    send_packet(&mut socket, &EnginePacket::Message(join)).await?;
    Ok(socket)
}

async fn read_loop(
    mut socket: Socket,
    handle: ChannelHandle,
    events: mpsc::Sender<PushEvent>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let outcome = loop {
        let packet = tokio::select! {
            _ = &mut shutdown => {
                let _ = send_packet(
                    &mut socket,
                    &EnginePacket::Message(SocketPacket::Disconnect {
                        namespace: crate::push::packet::DEFAULT_NAMESPACE.to_string(),
                    }),
                )
                .await;
                let _ = socket.close(None).await;
                break ChannelState::Closed;
            }
            packet = next_packet(&mut socket) => packet,
        };

        match packet {
            Ok(Some(EnginePacket::Message(SocketPacket::Event { name, args, .. }))) => {
                let payload = args.into_iter().next().unwrap_or(Value::Null);
                match PushEvent::decode(&name, payload) {
                    Ok(event) => {
                        if events.send(event).await.is_err() {
                            break ChannelState::Closed;
                        }
                    }
                    Err(e) => tracing::warn!(event = %name, error = %e, "Dropping malformed event"),
                }
            }
            Ok(Some(EnginePacket::Message(SocketPacket::Disconnect { .. })))
            | Ok(Some(EnginePacket::Close))
            | Ok(None) => break ChannelState::Closed,
            Ok(Some(other)) => tracing::debug!(packet = ?other, "Ignoring push packet"),
            Err(e) => {
                tracing::warn!(room = %handle.room(), error = %e, "Push channel dropped");
                break ChannelState::Failed(e.to_string());
            }
        }
    };
    handle.set_state(outcome);
}
