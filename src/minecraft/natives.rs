use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio::fs::create_dir_all;

use crate::util::extract::extract_flat;

use super::error::{ExtractionFailure, MinecraftError};

/// Extracts every downloaded native archive flat into the natives directory.
///
/// Must only run after the download batch for the version has fully
/// completed. One bad archive does not stop the others: all failures are
/// aggregated and reported together, and the caller decides whether the
/// partial install is still usable.
pub async fn install_natives(
    archives: &[PathBuf],
    natives_dir: &Path,
) -> Result<(), MinecraftError> {
    if archives.is_empty() {
        return Ok(());
    }

    create_dir_all(natives_dir).await?;
    info!("Extracting {} native archive(s)", archives.len());

    let mut failures = Vec::new();
    for archive in archives {
        if let Err(error) = extract_flat(archive, natives_dir).await {
            warn!("Failed to extract {}: {}", archive.display(), error);
            failures.push(ExtractionFailure {
                archive: archive.clone(),
                error,
            });
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(MinecraftError::Extraction(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn write_archive(path: &Path, entries: &[(&str, &[u8])]) {
        let file = std::fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, contents) in entries {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap();
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failures_are_aggregated_and_good_archives_still_extract() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.jar");
        write_archive(&good, &[("liblwjgl.so", b"elf".as_slice())]);
        let bad = dir.path().join("bad.jar");
        std::fs::write(&bad, b"not a zip").unwrap();

        let natives_dir = dir.path().join("natives");
        let error = install_natives(&[bad.clone(), good], &natives_dir)
            .await
            .unwrap_err();

        match error {
            MinecraftError::Extraction(failures) => {
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].archive, bad);
            }
            other => panic!("expected extraction error, got {other}"),
        }
        assert_eq!(
            std::fs::read(natives_dir.join("liblwjgl.so")).unwrap(),
            b"elf"
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_archive_list_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let natives_dir = dir.path().join("natives");
        install_natives(&[], &natives_dir).await.unwrap();
        assert!(!natives_dir.exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn re_extraction_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("natives.jar");
        write_archive(&archive, &[("liblwjgl.so", b"elf".as_slice())]);

        let natives_dir = dir.path().join("natives");
        let archives = vec![archive];
        install_natives(&archives, &natives_dir).await.unwrap();
        install_natives(&archives, &natives_dir).await.unwrap();
        assert_eq!(
            std::fs::read(natives_dir.join("liblwjgl.so")).unwrap(),
            b"elf"
        );
    }
}
