//! SHA-256 checksum utility for migration drift detection.

use sha2::{Digest, Sha256};

/// Compute the SHA256 checksum of a migration script, hex-encoded.
///
/// The hash covers the exact text as read from disk, before any whitespace
/// normalization, so any byte-for-byte change is detected.
pub fn compute_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
#[path = "checksum_test.rs"]
mod tests;
