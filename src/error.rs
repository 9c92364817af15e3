use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PigglyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid profile {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Unknown procedure: {0}")]
    UnknownProcedure(String),

    #[error("{path} would be written for both {first} and {second}")]
    DuplicateOutput {
        path: PathBuf,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, PigglyError>;
