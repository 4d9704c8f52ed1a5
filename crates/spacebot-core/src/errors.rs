use crate::messaging::types::DeliveryError;

/// Core error type for the bot.
///
/// Adapter crates map their specific errors into this type so the handlers and
/// the broadcast job can decide what is user-facing and what is fatal.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("subscriber store error: {0}")]
    Store(String),

    #[error("delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("external error: {0}")]
    External(String),
}

impl From<sqlx::Error> for Error {
    fn from(e: sqlx::Error) -> Self {
        Error::Store(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
