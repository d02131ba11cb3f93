//! Startup errors.

use thiserror::Error;

use crate::domain::ValueObjectError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid category in configuration: {0}")]
    InvalidCategory(#[from] ValueObjectError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
