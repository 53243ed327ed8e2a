use serde::{Deserialize, Serialize};

/// The global version index: every playable version with the location and
/// digest of its detailed manifest.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct VersionManifest {
    pub latest: Latest,
    pub versions: Vec<Version>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Latest {
    pub release: String,
    pub snapshot: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Version {
    pub id: String,

    #[serde(rename = "type")]
    pub version_type: String,

    pub url: String,

    /// Digest the detailed manifest has to match, 40 lowercase hex chars.
    pub sha1: String,

    pub time: String,

    #[serde(rename = "releaseTime")]
    pub release_time: String,
}
