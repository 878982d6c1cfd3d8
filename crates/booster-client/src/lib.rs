//! Booster Client: REST client, push channel and dashboard service.
//!
//! # Modules
//!
//! - [`api`]: The [`BoosterApi`] trait
//! - [`http`]: reqwest implementation
//! - `mock`: Scripted implementation for tests (`test-util` feature)
//! - [`push`]: Socket.IO subscription for live progress
//! - [`dashboard`]: Session-aware operations

#![doc = include_str!("../README.md")]

pub mod api;
pub mod dashboard;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod push;
pub mod wire;

pub use api::BoosterApi;
pub use dashboard::{Dashboard, HomeView, TradeStarted};
pub use error::{Action, Error, Result};
pub use http::HttpApi;
#[cfg(any(test, feature = "test-util"))]
pub use mock::{MockApi, MockReply};
pub use push::{ChannelState, PushChannel, Subscription};
