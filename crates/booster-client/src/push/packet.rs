//! Engine.IO v4 / Socket.IO v5 text packet codec.
//!
//! Only the text framing used over a WebSocket transport is supported;
//! binary attachments are rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Default namespace.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Handshake payload of the Engine.IO `open` packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenPayload {
    /// Engine session id
    pub sid: String,
    /// Server ping period, in milliseconds
    #[serde(default)]
    pub ping_interval: u64,
    /// Time the server waits for a pong, in milliseconds
    #[serde(default)]
    pub ping_timeout: u64,
    /// Largest payload the server accepts
    #[serde(default)]
    pub max_payload: u64,
}

/// An Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    /// `0{...}`
    Open(OpenPayload),
    /// `1`
    Close,
    /// `2[probe]`
    Ping(String),
    /// `3[probe]`
    Pong(String),
    /// `4...`
    Message(SocketPacket),
    /// `5`
    Upgrade,
    /// `6`
    Noop,
}

/// A Socket.IO packet carried in an Engine.IO message.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    /// `0[/nsp,][{auth}]`
    Connect {
        /// Namespace
        namespace: String,
        /// Auth payload (client) or `{sid}` (server)
        data: Option<Value>,
    },
    /// `1[/nsp,]`
    Disconnect {
        /// Namespace
        namespace: String,
    },
    /// `2[/nsp,][id]["name",...args]`
    Event {
        /// Namespace
        namespace: String,
        /// Acknowledgement id
        id: Option<u64>,
        /// Event name
        name: String,
        /// Arguments after the name
        args: Vec<Value>,
    },
    /// `3[/nsp,]id[...args]`
    Ack {
        /// Namespace
        namespace: String,
        /// Acknowledged id
        id: u64,
        /// Reply arguments
        args: Vec<Value>,
    },
    /// `4[/nsp,]{...}`
    ConnectError {
        /// Namespace
        namespace: String,
        /// Error payload (`{"message": ...}`)
        data: Value,
    },
}

impl SocketPacket {
    /// Connect to the default namespace, with optional auth.
    pub fn connect(auth: Option<Value>) -> Self {
        SocketPacket::Connect {
            namespace: DEFAULT_NAMESPACE.to_string(),
            data: auth,
        }
    }

    /// Emit `name` with arguments on the default namespace.
    pub fn event(name: impl Into<String>, args: Vec<Value>) -> Self {
        SocketPacket::Event {
            namespace: DEFAULT_NAMESPACE.to_string(),
            id: None,
            name: name.into(),
            args,
        }
    }

    /// Text of a connect error, if it carries one.
    pub fn error_message(data: &Value) -> String {
        data.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| data.to_string())
    }
}

impl EnginePacket {
    /// Encode to the text frame sent over the WebSocket.
    pub fn encode(&self) -> Result<String> {
        let text = match self {
            EnginePacket::Open(open) => format!("0{}", to_json(open)?),
            EnginePacket::Close => "1".to_string(),
            EnginePacket::Ping(probe) => format!("2{probe}"),
            EnginePacket::Pong(probe) => format!("3{probe}"),
            EnginePacket::Message(packet) => format!("4{}", encode_socket(packet)?),
            EnginePacket::Upgrade => "5".to_string(),
            EnginePacket::Noop => "6".to_string(),
        };
        Ok(text)
    }

    /// Decode one text frame.
    pub fn decode(text: &str) -> Result<EnginePacket> {
        let mut chars = text.chars();
        let kind = chars
            .next()
            .ok_or_else(|| Error::push("empty engine packet"))?;
        let rest = chars.as_str();
        let packet = match kind {
            '0' => EnginePacket::Open(
                serde_json::from_str(rest)
                    .map_err(|e| Error::push(format!("bad open packet: {e}")))?,
            ),
            '1' => EnginePacket::Close,
            '2' => EnginePacket::Ping(rest.to_string()),
            '3' => EnginePacket::Pong(rest.to_string()),
            '4' => EnginePacket::Message(decode_socket(rest)?),
            '5' => EnginePacket::Upgrade,
            '6' => EnginePacket::Noop,
            other => return Err(Error::push(format!("unknown engine packet type '{other}'"))),
        };
        Ok(packet)
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::push(e.to_string()))
}

fn namespace_prefix(namespace: &str) -> String {
    if namespace == DEFAULT_NAMESPACE {
        String::new()
    } else {
        format!("{namespace},")
    }
}

fn encode_socket(packet: &SocketPacket) -> Result<String> {
    let text = match packet {
        SocketPacket::Connect { namespace, data } => {
            let data = data.as_ref().map(to_json).transpose()?.unwrap_or_default();
            format!("0{}{data}", namespace_prefix(namespace))
        }
        SocketPacket::Disconnect { namespace } => format!("1{}", namespace_prefix(namespace)),
        SocketPacket::Event {
            namespace,
            id,
            name,
            args,
        } => {
            let mut array = Vec::with_capacity(args.len() + 1);
            array.push(Value::String(name.clone()));
            array.extend(args.iter().cloned());
            let id = id.map(|i| i.to_string()).unwrap_or_default();
            format!("2{}{id}{}", namespace_prefix(namespace), to_json(&array)?)
        }
        SocketPacket::Ack {
            namespace,
            id,
            args,
        } => format!("3{}{id}{}", namespace_prefix(namespace), to_json(args)?),
        SocketPacket::ConnectError { namespace, data } => {
            format!("4{}{}", namespace_prefix(namespace), to_json(data)?)
        }
    };
    Ok(text)
}

fn decode_socket(text: &str) -> Result<SocketPacket> {
    let mut chars = text.chars();
    let kind = chars
        .next()
        .ok_or_else(|| Error::push("empty socket packet"))?;
    let mut rest = chars.as_str();

    let mut namespace = DEFAULT_NAMESPACE.to_string();
    if rest.starts_with('/') {
        let end = rest.find(',').unwrap_or(rest.len());
        namespace = rest[..end].to_string();
        rest = rest.get(end + 1..).unwrap_or_default();
    }

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    let id = if digits > 0 {
        Some(
            rest[..digits]
                .parse::<u64>()
                .map_err(|e| Error::push(format!("bad ack id: {e}")))?,
        )
    } else {
        None
    };
    let payload = &rest[digits..];

    let json = |what: &str| -> Result<Value> {
        serde_json::from_str(payload).map_err(|e| Error::push(format!("bad {what} payload: {e}")))
    };

    let packet = match kind {
        '0' => SocketPacket::Connect {
            namespace,
            data: if payload.is_empty() {
                None
            } else {
                Some(json("connect")?)
            },
        },
        '1' => SocketPacket::Disconnect { namespace },
        '2' => {
            let Value::Array(mut items) = json("event")? else {
                return Err(Error::push("event payload is not an array"));
            };
            if items.is_empty() {
                return Err(Error::push("event without a name"));
            }
            let Value::String(name) = items.remove(0) else {
                return Err(Error::push("event name is not a string"));
            };
            SocketPacket::Event {
                namespace,
                id,
                name,
                args: items,
            }
        }
        '3' => {
            let Value::Array(args) = json("ack")? else {
                return Err(Error::push("ack payload is not an array"));
            };
            SocketPacket::Ack {
                namespace,
                id: id.ok_or_else(|| Error::push("ack without id"))?,
                args,
            }
        }
        '4' => SocketPacket::ConnectError {
            namespace,
            data: json("connect error")?,
        },
        '5' | '6' => return Err(Error::push("binary packets are not supported")),
        other => return Err(Error::push(format!("unknown socket packet type '{other}'"))),
    };
    Ok(packet)
}
