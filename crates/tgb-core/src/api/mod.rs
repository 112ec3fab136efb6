//! Bot API client: request building, status checking and response decoding.

pub mod client;
pub mod wire;

pub use client::ApiClient;
