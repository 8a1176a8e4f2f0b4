use thiserror::Error;

/// Errors surfaced by the non-game parts of the crate (config, logging, ranking input).
///
/// Game event handlers never fail; invalid events are ignored instead.
#[derive(Debug, Error)]
pub enum ReflexError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid player name {0:?}: must be 1 to {max} characters after trimming", max = crate::ranking::MAX_NAME_LEN)]
    InvalidName(String),

    #[error("logging already initialized")]
    LoggingInit,
}

pub type Result<T> = std::result::Result<T, ReflexError>;
