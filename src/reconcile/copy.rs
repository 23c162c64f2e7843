//! Metadata-preserving file copy

use crate::types::SyncError;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

/// Copy a file's content and carry its modification time over to the
/// destination.
///
/// The content is streamed with a fixed buffer, then the source mtime is
/// stamped onto the destination so the copy compares equal on the next run.
/// Permissions and other attributes are not replicated.
///
/// # Arguments
/// * `src` - Source file path
/// * `dest` - Destination file path (parent directory must exist)
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(SyncError)` - IO failure on either side
pub fn copy_preserving(src: &Path, dest: &Path) -> Result<u64, SyncError> {
    let mut src_file = File::open(src)?;
    let mut dest_file = File::create(dest)?;

    let mut buffer = vec![0u8; 128 * 1024];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;

        if bytes_read == 0 {
            break; // EOF
        }

        dest_file.write_all(&buffer[0..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    drop(dest_file);

    let src_metadata = fs::metadata(src)?;
    let mtime = src_metadata.modified()?;
    filetime::set_file_mtime(dest, filetime::FileTime::from_system_time(mtime))?;

    Ok(total_bytes)
}
