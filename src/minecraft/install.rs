use std::path::Path;

use log::info;
use tokio::fs;

use crate::{
    http::downloader::{download, download_all, DownloadJob},
    json::meta::VersionMeta,
};

use super::{
    error::MinecraftError, natives::install_natives, paths::Paths, plan,
    resolve::resolve_version,
};

/// Installs a version into the shared internal directory: manifest chain,
/// libraries, assets, and extracted natives. The version is ready to launch
/// afterwards.
pub async fn install(version: &str, paths: &Paths) -> Result<VersionMeta, MinecraftError> {
    let meta = resolve_version(version, paths).await?;
    let plan = plan::build(&meta, paths).await?;

    // Kept for old versions that resolve assets through the virtual tree.
    fs::create_dir_all(paths.asset_virtual_dir()).await?;

    info!(
        "Downloading {} file(s) for {}",
        plan.jobs.len(),
        version
    );
    download_all(plan.jobs).await?;

    // Natives only get touched once the whole batch has landed.
    install_natives(&plan.native_archives, &paths.natives_dir(&meta.id)).await?;

    Ok(meta)
}

/// Finishes a client instance: shared install plus the instance's own client
/// jar, verified against the manifest digest.
pub async fn install_client(
    version: &str,
    paths: &Paths,
    instance_dir: &Path,
) -> Result<VersionMeta, MinecraftError> {
    let meta = install(version, paths).await?;

    let client = meta
        .downloads
        .get("client")
        .ok_or_else(|| MinecraftError::MissingDownload("client".to_string()))?;

    fs::create_dir_all(instance_dir).await?;
    info!("Downloading client jar for {version}");
    download(&DownloadJob {
        url: client.url.clone(),
        path: instance_dir.join("client.jar"),
        sha1: client.sha1.clone(),
    })
    .await?;

    Ok(meta)
}

/// Finishes a server instance: the server jar plus an accepted eula file.
/// Servers need none of the client library or asset set.
pub async fn install_server(
    version: &str,
    paths: &Paths,
    instance_dir: &Path,
) -> Result<VersionMeta, MinecraftError> {
    let meta = resolve_version(version, paths).await?;

    let server = meta
        .downloads
        .get("server")
        .ok_or_else(|| MinecraftError::MissingDownload("server".to_string()))?;

    let server_dir = instance_dir.join("server");
    fs::create_dir_all(&server_dir).await?;
    info!("Downloading server jar for {version}");
    download(&DownloadJob {
        url: server.url.clone(),
        path: server_dir.join("server.jar"),
        sha1: server.sha1.clone(),
    })
    .await?;

    write_eula(&server_dir).await?;

    Ok(meta)
}

/// The server refuses to start until the eula is accepted.
pub async fn write_eula(server_dir: &Path) -> Result<(), MinecraftError> {
    fs::write(server_dir.join("eula.txt"), "eula = true\n").await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn eula_is_accepted_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_eula(dir.path()).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("eula.txt")).unwrap(),
            "eula = true\n"
        );
    }
}
