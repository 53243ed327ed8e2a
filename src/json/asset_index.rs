use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An asset index document: virtual path -> content-addressed object.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct AssetIndex {
    pub objects: HashMap<String, Object>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Object {
    pub hash: String,
    pub size: i64,
}
