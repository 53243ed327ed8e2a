use log::info;
use tokio::fs;

use crate::{
    http::fetch::{fetch_bytes, fetch_text},
    json::{
        manifest::{Version, VersionManifest},
        meta::VersionMeta,
    },
    util::hash::sha1_hex,
};

use super::{error::MinecraftError, paths::Paths};

pub const VERSION_MANIFEST_ENDPOINT: &str =
    "https://piston-meta.mojang.com/mc/game/version_manifest_v2.json";

/// Fetches the global version index.
///
/// The index changes as versions release, so it is re-fetched on every call;
/// the on-disk copy is kept for external tooling, never read back here.
pub async fn fetch_version_index(paths: &Paths) -> Result<VersionManifest, MinecraftError> {
    let text = fetch_text(VERSION_MANIFEST_ENDPOINT).await?;
    fs::create_dir_all(paths.versions_dir()).await?;
    fs::write(paths.version_index_path(), &text).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Exact, case-sensitive id lookup in the index.
pub fn find_version<'a>(
    manifest: &'a VersionManifest,
    version: &str,
) -> Result<&'a Version, MinecraftError> {
    manifest
        .versions
        .iter()
        .find(|entry| entry.id == version)
        .ok_or_else(|| MinecraftError::VersionNotFound(version.to_string()))
}

/// Ordered list of known version ids, oldest first.
pub fn version_ids(manifest: &VersionManifest) -> Vec<String> {
    let mut ids: Vec<String> = manifest
        .versions
        .iter()
        .map(|entry| entry.id.clone())
        .collect();
    ids.reverse();
    ids
}

/// Resolves a version id to its detailed manifest.
///
/// The manifest bytes are verified against the index entry's sha1 before
/// anything trusts or caches them.
pub async fn resolve_version(version: &str, paths: &Paths) -> Result<VersionMeta, MinecraftError> {
    let index = fetch_version_index(paths).await?;
    let entry = find_version(&index, version)?;

    info!("Fetching manifest for {version}");
    let bytes = fetch_bytes(&entry.url).await?;
    verify_manifest(version, &entry.sha1, &bytes)?;

    fs::write(paths.version_json_path(version), &bytes).await?;

    Ok(serde_json::from_slice(&bytes)?)
}

fn verify_manifest(version: &str, expected: &str, bytes: &[u8]) -> Result<(), MinecraftError> {
    let actual = sha1_hex(bytes);
    if actual != expected {
        return Err(MinecraftError::Integrity {
            name: version.to_string(),
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
