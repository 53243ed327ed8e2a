use std::{
    io::{Cursor, Read},
    path::Path,
};

use tokio::{
    fs::{self, File},
    io::AsyncWriteExt,
    task::block_in_place,
};
use zip::ZipArchive;

use super::error::UtilError;

/// Extracts every entry of a zip archive into `output_dir`, keeping only each
/// entry's base name. Directory structure inside the archive is flattened;
/// a later entry with the same base name overwrites an earlier one.
pub async fn extract_flat(archive_path: &Path, output_dir: &Path) -> Result<(), UtilError> {
    let data = fs::read(archive_path).await?;
    let cursor = Cursor::new(data);

    let mut archive = block_in_place(|| ZipArchive::new(cursor))?;

    if !output_dir.is_dir() {
        fs::create_dir_all(output_dir).await?;
    }

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        if file.name().ends_with('/') {
            continue;
        }
        let base_name = match Path::new(file.name()).file_name() {
            Some(name) => name.to_owned(),
            None => continue,
        };

        let mut output_file = File::create(output_dir.join(base_name)).await?;

        let mut buffer = vec![0; 4096];
        loop {
            let n = block_in_place(|| file.read(&mut buffer))?;
            if n == 0 {
                break;
            }
            output_file.write_all(&buffer[..n]).await?;
        }
        output_file.flush().await?;
    }

    Ok(())
}
