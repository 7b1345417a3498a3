use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{ContextError, Result};

/// Replaces `path` with `contents` in one step.
///
/// The data goes to a temporary file next to the destination which is then
/// renamed over it, so readers never observe a half-written asset and a
/// failed write leaves any previous file untouched. An existing file keeps
/// its permissions; a new one gets the usual 0644 on unix. When `path` is a
/// symlink the file it points to is replaced and the link stays in place.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let write_err = |source: io::Error| ContextError::Write {
        path: path.to_path_buf(),
        source,
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(write_err(e)),
    };
    let target = match existing {
        Some(_) => fs::canonicalize(path).map_err(write_err)?,
        None => path.to_path_buf(),
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;

    match existing {
        Some(metadata) => {
            fs::set_permissions(tmp.path(), metadata.permissions()).map_err(write_err)?
        }
        None => set_default_permissions(tmp.path()).map_err(write_err)?,
    }

    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(unix)]
fn set_default_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
