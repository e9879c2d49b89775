//! Git blob hashing for patched files.
//!
//! The hash is the object id `git hash-object` would assign to the file:
//! SHA-1 over the header `blob <len>\0` followed by the raw content.

use crate::error::{ApiError, PatchError};
use crate::types::BlobHash;
use sha1::{Digest, Sha1};
use std::path::Path;

/// Compute the git blob hash for file bytes
pub fn compute_blob_hash(content: &[u8]) -> BlobHash {
    let mut hasher = Sha1::new();

    // Object header
    hasher.update(b"blob ");
    hasher.update(content.len().to_string().as_bytes());
    hasher.update([0u8]);

    hasher.update(content);
    hasher.finalize().into()
}

/// Read a file and compute its git blob hash.
pub fn hash_file(path: &Path) -> Result<BlobHash, PatchError> {
    let content = std::fs::read(path).map_err(|source| PatchError::Hash {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(compute_blob_hash(&content))
}

pub fn to_hex(hash: &BlobHash) -> String {
    hex::encode(hash)
}

/// Parse a 40-character hex object id.
pub fn parse_hex(s: &str) -> Result<BlobHash, ApiError> {
    let bytes = hex::decode(s.trim()).map_err(|e| ApiError::InvalidHash(format!("{}: {}", s, e)))?;
    bytes.try_into().map_err(|b: Vec<u8>| {
        ApiError::InvalidHash(format!("{}: expected 20 bytes, got {}", s, b.len()))
    })
}
