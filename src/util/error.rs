use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilError {
    #[error(transparent)]
    IO(#[from] tokio::io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),
}
