use std::path::PathBuf;

use directories::ProjectDirs;

/// Layout of the shared internal data directory. Versions, libraries, and
/// assets are shared between instances; natives are per version.
#[derive(Debug, Clone)]
pub struct Paths {
    pub internal: PathBuf,
}

impl Paths {
    pub fn new(internal: impl Into<PathBuf>) -> Self {
        Self {
            internal: internal.into(),
        }
    }

    /// Default per-user data directory.
    pub fn from_project_dirs() -> Option<Self> {
        ProjectDirs::from("", "", "quarry").map(|dirs| Self::new(dirs.data_dir()))
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.internal.join("versions")
    }

    pub fn version_index_path(&self) -> PathBuf {
        self.versions_dir().join("version_manifest.json")
    }

    pub fn version_json_path(&self, version: &str) -> PathBuf {
        self.versions_dir().join(format!("{version}.json"))
    }

    pub fn natives_dir(&self, version: &str) -> PathBuf {
        self.versions_dir().join(version).join("natives")
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.internal.join("libraries")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.internal.join("assets")
    }

    pub fn asset_index_path(&self, index_id: &str) -> PathBuf {
        self.assets_dir().join("indexes").join(format!("{index_id}.json"))
    }

    pub fn asset_objects_dir(&self) -> PathBuf {
        self.assets_dir().join("objects")
    }

    pub fn asset_virtual_dir(&self) -> PathBuf {
        self.assets_dir().join("virtual")
    }
}
