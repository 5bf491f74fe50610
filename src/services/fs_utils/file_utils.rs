use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::types::errors::{AppError, AppResult};

/// Write a file atomically: temp file in the same directory, then rename over the target.
///
/// Readers never observe a half-written file, and a crash mid-write leaves the
/// previous version intact.
pub fn atomic_write(path: &Path, content: &str) -> AppResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .map_err(|e| AppError::Io(format!("Failed to create {}: {e}", parent.display())))?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| {
        AppError::Io(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;
    Ok(())
}

/// Atomic write restricted to the owner (0600 on Unix). Used for secrets.
pub fn write_private(path: &Path, content: &str) -> AppResult<()> {
    atomic_write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}

/// Delete a file, treating "already gone" as success. Returns whether a file was removed.
pub fn remove_if_exists(path: &Path) -> AppResult<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
