use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    fs::{create_dir_all, File},
    io::{AsyncReadExt, AsyncWriteExt},
};

use super::error::UtilError;

/// Reads a JSON file and deserializes it into `T`.
pub async fn read_json<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<T, UtilError> {
    let mut file = File::open(file_path).await?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Serializes `value` and writes it to `file_path`, creating parent
/// directories as needed.
pub async fn write_json<T: Serialize, P: AsRef<Path>>(
    file_path: P,
    value: &T,
) -> Result<(), UtilError> {
    let json_string = serde_json::to_string(value)?;
    if let Some(parent) = file_path.as_ref().parent() {
        if !parent.is_dir() {
            create_dir_all(parent).await?;
        }
    }
    let mut file = File::create(file_path).await?;
    file.write_all(json_string.as_bytes()).await?;
    Ok(())
}
