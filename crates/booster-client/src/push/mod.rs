//! Live progress over the backend's Socket.IO push channel.

mod channel;
pub mod packet;
mod state;

pub use channel::{
    DEFAULT_CONNECT_TIMEOUT, JOIN_EVENT, PushChannel, Subscription, websocket_url,
};
pub use state::{ChannelHandle, ChannelState};
