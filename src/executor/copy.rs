//! Atomic file copy implementation

use crate::types::MirrorError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Suffix of the temporary sibling a copy is streamed into
pub const PART_SUFFIX: &str = ".treemirror.part";

const COPY_BUFFER_SIZE: usize = 128 * 1024;

/// Copy a file using the write-then-rename strategy
///
/// 1. Create missing parent directories
/// 2. Stream bytes into `<dest>.treemirror.part`
/// 3. Flush and sync to disk
/// 4. Copy permissions and the source modification time
/// 5. Rename over `dest`
///
/// Carrying the source mtime over is what makes a second pass see equal
/// timestamps and skip the file. On any failure the temporary file is removed
/// and `dest` is left as it was.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(MirrorError)` - `Access` on permission denial, `Copy` otherwise
///
/// # Example
/// ```no_run
/// use treemirror::executor::copy_file_atomic;
/// use std::path::Path;
///
/// let bytes = copy_file_atomic(Path::new("source.txt"), Path::new("mirror/source.txt"))?;
/// # Ok::<(), treemirror::types::MirrorError>(())
/// ```
pub fn copy_file_atomic(src: &Path, dest: &Path) -> Result<u64, MirrorError> {
    let part_path = part_path_for(dest);

    match write_part_and_commit(src, dest, &part_path) {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            let _ = fs::remove_file(&part_path);
            Err(MirrorError::from_copy(dest, e))
        }
    }
}

fn write_part_and_commit(src: &Path, dest: &Path, part_path: &Path) -> io::Result<u64> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut src_file = File::open(src)?;
    let mut part_file = File::create(part_path)?;

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = src_file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        part_file.write_all(&buffer[..bytes_read])?;
        total_bytes += bytes_read as u64;
    }

    part_file.sync_all()?;

    // Drop the file handle before rename (required on Windows)
    drop(part_file);

    let src_metadata = src_file.metadata()?;
    fs::set_permissions(part_path, src_metadata.permissions())?;

    let mtime = filetime::FileTime::from_last_modification_time(&src_metadata);
    filetime::set_file_mtime(part_path, mtime)?;

    fs::rename(part_path, dest)?;

    Ok(total_bytes)
}

fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(PART_SUFFIX);
    dest.with_file_name(name)
}
