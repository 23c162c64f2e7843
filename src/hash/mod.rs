//! Content hashing utilities

use crate::types::SyncError;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fixed chunk size for streaming a file through the hasher
pub const CHUNK_SIZE: usize = 4096;

/// Number of digest bytes (128-bit)
pub const DIGEST_LEN: usize = 16;

/// Compute the content hash of a file
///
/// The file is streamed through BLAKE3 in fixed 4096-byte chunks; the
/// extendable output is trimmed to 16 bytes and rendered as a lowercase hex
/// digest. Identical content always produces an identical digest, so digests
/// are directly comparable between source and destination files.
///
/// # Arguments
/// * `path` - Path to the file to hash
///
/// # Returns
/// * `Ok(String)` - 32-character lowercase hex digest
/// * `Err(SyncError::Fingerprint)` - the file was unreadable or vanished
///   mid-read; the caller must treat this as "fingerprint unavailable",
///   never as "unchanged"
pub fn hash_file(path: &Path) -> Result<String, SyncError> {
    let mut file = File::open(path).map_err(|e| SyncError::fingerprint(path, e))?;

    let mut hasher = blake3::Hasher::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = file
            .read(&mut buffer)
            .map_err(|e| SyncError::fingerprint(path, e))?;

        if bytes_read == 0 {
            break; // EOF
        }

        hasher.update(&buffer[0..bytes_read]);
    }

    let mut digest = [0u8; DIGEST_LEN];
    hasher.finalize_xof().fill(&mut digest);

    Ok(hex::encode(digest))
}
