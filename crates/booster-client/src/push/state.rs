//! Push channel connection state.
//!
//! [`ChannelHandle`] is shared between the reader task and whoever holds the
//! subscription; state changes are broadcast over a watch channel.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::error::{Error, Result};

/// Lifecycle of a push connection.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelState {
    /// Not started.
    Disconnected,
    /// WebSocket open, handshake in progress.
    Connecting,
    /// Namespace joined, events flowing.
    Connected,
    /// Closed by either side.
    Closed,
    /// Gave up; the reason is kept for display.
    Failed(String),
}

impl ChannelState {
    /// Returns `true` once events can arrive.
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }

    /// Returns `true` if no further events will arrive.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed | Self::Failed(_))
    }
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Closed => write!(f, "closed"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Cloneable view of a connection's state.
#[derive(Clone)]
pub struct ChannelHandle {
    inner: Arc<Inner>,
}

struct Inner {
    room: String,
    tx: watch::Sender<ChannelState>,
}

impl ChannelHandle {
    /// A handle for the room `room`, starting [`ChannelState::Disconnected`].
    pub fn new(room: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(ChannelState::Disconnected);
        Self {
            inner: Arc::new(Inner {
                room: room.into(),
                tx,
            }),
        }
    }

    /// Room (chat id) this connection joined.
    pub fn room(&self) -> &str {
        &self.inner.room
    }

    /// Current state.
    pub fn state(&self) -> ChannelState {
        self.inner.tx.borrow().clone()
    }

    /// Update the state and notify subscribers.
    pub fn set_state(&self, state: ChannelState) {
        tracing::debug!(room = %self.inner.room, state = %state, "Push channel state");
        self.inner.tx.send_replace(state);
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<ChannelState> {
        self.inner.tx.subscribe()
    }

    /// Wait until connected, failed, closed or `timeout` elapses.
    pub async fn wait_connected(&self, timeout: Duration) -> Result<()> {
        let mut rx = self.subscribe();
        let outcome = tokio::time::timeout(timeout, async {
            loop {
                let state = rx.borrow_and_update().clone();
                match state {
                    ChannelState::Connected => return Ok(()),
                    ChannelState::Failed(reason) => return Err(Error::push(reason)),
                    ChannelState::Closed => {
                        return Err(Error::push("connection closed before joining"));
                    }
                    ChannelState::Disconnected | ChannelState::Connecting => {}
                }
                if rx.changed().await.is_err() {
                    return Err(Error::push("state channel closed"));
                }
            }
        })
        .await;

        outcome.unwrap_or_else(|_| {
            Err(Error::push(format!(
                "not connected after {timeout:?} (state: {})",
                self.state()
            )))
        })
    }
}

impl fmt::Debug for ChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelHandle")
            .field("room", &self.inner.room)
            .field("state", &self.state())
            .finish()
    }
}
