/// Core error type for the bot.
///
/// Adapter crates map their specific failures into this type so the polling
/// loop can report every recoverable failure the same way. The `/crash` fault
/// path is not an error (see [`crate::domain::Flow::Crash`]).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    /// The remote API answered with a non-2xx status.
    ///
    /// `details` is the remote `description` when the error body has one,
    /// otherwise [`Error::GENERIC_API_DETAILS`].
    #[error("api error: code={status} details={details}")]
    Api { status: u16, details: String },

    /// No status was obtained (connect, DNS, TLS, body read).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Details string used when the remote body carries no `description`.
    pub const GENERIC_API_DETAILS: &'static str = "server error";

    pub fn api(status: u16, details: impl Into<String>) -> Self {
        Self::Api {
            status,
            details: details.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
