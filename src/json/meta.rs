use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The detailed manifest of a single version.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct VersionMeta {
    pub id: String,

    #[serde(rename = "mainClass")]
    pub main_class: String,

    pub arguments: Arguments,

    #[serde(rename = "assetIndex")]
    pub asset_index: AssetIndexRef,

    /// Named top-level artifacts: `client`, `server`, mapping files.
    pub downloads: HashMap<String, Artifact>,

    pub libraries: Vec<Library>,

    #[serde(rename = "type", default)]
    pub version_type: String,
}

/// Pointer to the asset index document for a version.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AssetIndexRef {
    pub id: String,
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,
}

/// A downloadable artifact as the manifests describe it.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Artifact {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha1: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Relative path under the shared libraries directory. Only present on
    /// library artifacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Library {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<LibraryDownloads>,

    /// Present when the library ships platform natives. The artifact then
    /// gets extracted rather than put on the classpath.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natives: Option<HashMap<String, String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<Rule>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LibraryDownloads {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact: Option<Artifact>,
}

/// A platform/feature predicate on a library or argument node.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Rule {
    pub action: Action,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<OsRule>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Features>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    #[serde(rename = "allow")]
    Allow,
    #[serde(rename = "disallow")]
    Disallow,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct OsRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Features {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_demo_user: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_custom_resolution: Option<bool>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Arguments {
    pub game: Vec<Argument>,
    pub jvm: Vec<Argument>,
}

/// One node of the argument template tree, decoded once from the manifest.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(untagged)]
pub enum Argument {
    Plain(String),
    Conditional { rules: Vec<Rule>, value: Box<Argument> },
    List(Vec<Argument>),
}
