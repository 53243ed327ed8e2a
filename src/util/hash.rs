use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha1::Digest;
use sha1::Sha1;

use super::error::UtilError;

/// Hex digest of a byte slice, lowercase.
pub fn sha1_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha1::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

pub fn calculate_sha1<P: AsRef<Path>>(path: P) -> Result<String, UtilError> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    Ok(sha1_hex(&buffer))
}
