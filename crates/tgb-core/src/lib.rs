//! Core of the long-polling command bot.
//!
//! Framework-agnostic: the HTTP exchange lives behind the `Transport` port,
//! implemented in an adapter crate. Everything here is driven sequentially by
//! the `Poller`.

pub mod api;
pub mod checkpoint;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod polling;
pub mod ports;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
