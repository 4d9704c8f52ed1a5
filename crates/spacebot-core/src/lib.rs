//! Core domain + application logic for the space news bot.
//!
//! This crate is framework-agnostic. Telegram lives behind the messaging port
//! (implemented in `spacebot-telegram`); the feed and the subscriber store are
//! traits with concrete reqwest/SQLite implementations here.

pub mod broadcast;
pub mod config;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod formatting;
pub mod interactions;
pub mod logging;
pub mod messaging;
pub mod scheduler;
pub mod store;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
