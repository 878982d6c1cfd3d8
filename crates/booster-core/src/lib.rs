//! Booster Core: session, domain types, validation and live-update reducers.
//!
//! This crate has no internal Booster dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`session`]: Session record and stores
//! - [`routes`]: Views and the authentication guard
//! - [`validation`]: Form checks
//! - [`events`], [`progress`], [`feed`]: Push events and their reducers

#![doc = include_str!("../README.md")]

pub mod error;
pub mod events;
pub mod feed;
pub mod ids;
pub mod progress;
pub mod routes;
pub mod session;
pub mod traits;
pub mod types;
pub mod validation;

mod proptests;

pub use error::{Error, Result};
pub use events::PushEvent;
pub use feed::ActionFeed;
pub use ids::{ChatId, GroupId, TokenId};
pub use progress::TransactionState;
pub use routes::{Navigation, Route};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
pub use traits::ConfigManager;
pub use types::{
    ActionAck, BurnResult, CollectResult, OrderDetail, ProcessKind, ProcessSummary, ResumeResult,
    Token, TradeSide, TxStatus, TxUpdate, Wallet, WalletGroup,
};
