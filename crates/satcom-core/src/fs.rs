//! Filesystem utilities for atomic datastore replacement.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Suffix appended to the datastore path for the in-progress write.
pub const TEMP_SUFFIX: &str = ".tmp";

/// Path of the temporary sibling used while saving `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Atomically replace `path` with `data`.
///
/// The bytes are written to the temporary sibling (owner read/write only),
/// flushed to disk, then renamed over the target. The previous file is never
/// truncated or partially overwritten.
///
/// # Errors
///
/// Returns the underlying I/O error. If the rename fails the temporary file
/// is removed before returning.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    write_atomic_with(path, data, |from, to| fs::rename(from, to))
}

/// [`write_atomic`] with the final rename step supplied by the caller.
pub(crate) fn write_atomic_with<F>(path: &Path, data: &[u8], rename: F) -> io::Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    let temp_path = temp_path_for(path);

    if let Err(err) = write_private(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }

    rename(&temp_path, path).map_err(|err| {
        // Clean up the temp file on failure
        let _ = fs::remove_file(&temp_path);
        io::Error::new(
            err.kind(),
            format!(
                "Atomic rename {} -> {} failed: {}",
                temp_path.display(),
                path.display(),
                err
            ),
        )
    })
}

fn write_private(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;
    // A leftover temp file from a crashed save keeps its old mode; tighten it.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(data)?;
    file.sync_all()
}
