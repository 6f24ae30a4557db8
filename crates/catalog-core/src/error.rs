use std::path::PathBuf;

use thiserror::Error;

use crate::types::ItemId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog item '{id}': {reason}")]
    InvalidItem { id: ItemId, reason: String },

    #[error("Duplicate catalog item id: {0}")]
    DuplicateId(ItemId),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
