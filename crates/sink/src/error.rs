use std::path::PathBuf;

use cukelog_messages::MessageError;
use cukelog_results::MapError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("output stream is not initialized")]
    NotInitialized,

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode failed: {0}")]
    Encode(#[from] MessageError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("sink for {} could not be initialized", .path.display())]
    SinkUnavailable { path: PathBuf },

    #[error("result mapping failed: {0}")]
    Map(#[from] MapError),

    #[error("invalid result: {0}")]
    InvalidResult(#[from] MessageError),

    #[error("sink write failed: {0}")]
    Write(#[from] SinkError),
}
