use std::{
    collections::HashSet,
    path::{PathBuf, MAIN_SEPARATOR_STR},
};

use log::{debug, warn};

use crate::{
    http::{downloader::DownloadJob, fetch::fetch},
    json::{asset_index::AssetIndex, meta::VersionMeta},
    util::json::{read_json, write_json},
};

use super::{error::MinecraftError, paths::Paths, rule::rules_allow};

pub const RESOURCES_ENDPOINT: &str = "http://resources.download.minecraft.net";

/// Everything the install phase has to do for one version: the download batch
/// plus the native archives to extract once the batch has landed.
#[derive(Debug, Default)]
pub struct InstallPlan {
    pub jobs: Vec<DownloadJob>,
    pub native_archives: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl InstallPlan {
    /// Appends a job unless one already targets the same destination. Every
    /// job in a batch owns its destination path exclusively, which is what
    /// makes the concurrent batch safe without locking.
    fn push_job(&mut self, job: DownloadJob) {
        if self.seen.insert(job.path.clone()) {
            self.jobs.push(job);
        }
    }
}

/// Walks the manifest's library list and asset index into an [`InstallPlan`].
pub async fn build(meta: &VersionMeta, paths: &Paths) -> Result<InstallPlan, MinecraftError> {
    let mut plan = InstallPlan::default();
    plan_libraries(meta, paths, &mut plan);

    let index = fetch_asset_index(meta, paths).await?;
    plan_assets(&index, paths, &mut plan);

    Ok(plan)
}

pub fn plan_libraries(meta: &VersionMeta, paths: &Paths, plan: &mut InstallPlan) {
    let libraries_dir = paths.libraries_dir();
    let natives_dir = paths.natives_dir(&meta.id);

    for lib in &meta.libraries {
        if !rules_allow(&lib.rules) {
            debug!("Library {} is disallowed on this platform", lib.name);
            continue;
        }

        // Metadata-only entries carry no artifact and nothing to fetch.
        let Some(artifact) = lib.downloads.as_ref().and_then(|d| d.artifact.as_ref()) else {
            continue;
        };
        let Some(rel_path) = &artifact.path else {
            continue;
        };
        let rel_path = rel_path.replace('/', MAIN_SEPARATOR_STR);

        let destination = if lib.natives.is_some() {
            natives_dir.join(&rel_path)
        } else {
            libraries_dir.join(&rel_path)
        };

        if lib.natives.is_some() {
            // Re-extraction is idempotent, so an already downloaded archive
            // still goes on the extraction list.
            plan.native_archives.push(destination.clone());
        }

        if destination.exists() {
            continue;
        }

        plan.push_job(DownloadJob {
            url: artifact.url.clone(),
            path: destination,
            sha1: artifact.sha1.clone(),
        });
    }
}

/// Fetches the asset index for a version, trusting an existing cached copy.
/// Unlike the version manifest, a cache hit here is not re-verified.
pub async fn fetch_asset_index(
    meta: &VersionMeta,
    paths: &Paths,
) -> Result<AssetIndex, MinecraftError> {
    let index_path = paths.asset_index_path(&meta.asset_index.id);
    if index_path.exists() {
        Ok(read_json(&index_path).await?)
    } else {
        let index: AssetIndex = fetch(&meta.asset_index.url).await?;
        write_json(&index_path, &index).await?;
        Ok(index)
    }
}

pub fn plan_assets(index: &AssetIndex, paths: &Paths, plan: &mut InstallPlan) {
    let objects_dir = paths.asset_objects_dir();

    for (name, object) in &index.objects {
        let hash = &object.hash;
        // Hashes come from a remote index; a truncated one must not panic.
        let Some(prefix) = hash.get(..2) else {
            warn!("Asset {name} has a malformed hash {hash:?}, skipping");
            continue;
        };
        let destination = objects_dir.join(prefix).join(hash);
        if destination.exists() {
            continue;
        }

        plan.push_job(DownloadJob {
            url: format!("{RESOURCES_ENDPOINT}/{prefix}/{hash}"),
            path: destination,
            sha1: Some(hash.clone()),
        });
    }
}
