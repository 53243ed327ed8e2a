use std::path::PathBuf;

use thiserror::Error;

use crate::{
    http::{downloader::BatchError, error::HttpError},
    util::error::UtilError,
};

#[derive(Error, Debug)]
pub enum MinecraftError {
    #[error("Version {0} not found in the version index")]
    VersionNotFound(String),
    #[error("Malformed manifest: {0}")]
    ManifestParse(#[from] serde_json::Error),
    #[error("Integrity check failed for {name}: expected {expected}, got {actual}")]
    Integrity {
        name: String,
        expected: String,
        actual: String,
    },
    #[error("Manifest has no {0} download")]
    MissingDownload(String),
    #[error("Failed to extract {} native archive(s)", .0.len())]
    Extraction(Vec<ExtractionFailure>),
    #[error(transparent)]
    Downloads(#[from] BatchError),
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error(transparent)]
    Util(#[from] UtilError),
    #[error(transparent)]
    IO(#[from] tokio::io::Error),
}

#[derive(Debug)]
pub struct ExtractionFailure {
    pub archive: PathBuf,
    pub error: UtilError,
}
