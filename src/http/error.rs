use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error(transparent)]
    IO(#[from] tokio::io::Error),
    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
    #[error("Download failed with status code: {0}")]
    Status(String),
    #[error("Hash mismatch for {path:?}: expected {expected}, got {actual}")]
    Integrity {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}
