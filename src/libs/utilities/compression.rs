// This module unpacks the go.dev zip archives into the managed root.
//
// Archive contents are untrusted input: an entry named `../../evil.exe` or `/etc/profile`
// must never be written outside the destination ("zip-slip"). Every entry is therefore
// checked *before* anything touches the disk, and one bad entry rejects the whole archive.

use crate::libs::utilities::path_helpers::clean_path;
use crate::schemas::errors::{GoSwitchError, Result};
use crate::{log_debug, log_error};
use colored::Colorize;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Extracts the zip archive at `src` into `dest`.
///
/// Directories are created recursively, files are created (or truncated) with their parent
/// directories created on demand, and on Unix files receive the permission bits declared
/// in the archive.
///
/// # Arguments
/// * `src`: The downloaded archive.
/// * `dest`: The directory to populate. Created if missing.
///
/// # Returns
/// * `Ok(usize)` with the number of files written.
/// * `GoSwitchError::UnsafeArchiveEntry` when any entry resolves outside `dest`; in that case
///   nothing has been written.
/// * `GoSwitchError::Archive` / `GoSwitchError::Io` for corrupt archives and disk failures.
pub fn extract_zip(src: &Path, dest: &Path) -> Result<usize> {
    log_debug!(
        "[Extractor] Extracting {} into {}",
        src.display().to_string().blue(),
        dest.display().to_string().cyan()
    );

    let file = File::open(src)
        .map_err(|e| GoSwitchError::io(format!("failed to open archive {}", src.display()), e))?;
    let mut archive = ZipArchive::new(file)?;
    let root = clean_path(dest);

    // Pass one: resolve and validate every entry before writing anything.
    let mut plan: Vec<(usize, PathBuf, bool)> = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index)?;
        let is_dir = entry.is_dir();
        if let Some(target) = entry_destination(&root, entry.name(), is_dir)? {
            plan.push((index, target, is_dir));
        }
    }

    // Pass two: materialize.
    let mut written = 0;
    for (index, target, is_dir) in plan {
        if is_dir {
            fs::create_dir_all(&target).map_err(|e| {
                GoSwitchError::io(format!("failed to create directory {}", target.display()), e)
            })?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                GoSwitchError::io(format!("failed to create directory {}", parent.display()), e)
            })?;
        }

        let mut entry = archive.by_index(index)?;
        let mut out = File::create(&target)
            .map_err(|e| GoSwitchError::io(format!("failed to create {}", target.display()), e))?;
        io::copy(&mut entry, &mut out)
            .map_err(|e| GoSwitchError::io(format!("failed to extract {}", target.display()), e))?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777)).map_err(|e| {
                GoSwitchError::io(format!("failed to set permissions on {}", target.display()), e)
            })?;
        }

        written += 1;
    }

    log_debug!(
        "[Extractor] {} files extracted to {}",
        written,
        dest.display().to_string().green()
    );
    Ok(written)
}

/// Resolves where an archive entry would land and rejects it if that is outside `root`.
///
/// `root` must already be lexically cleaned. Returns `Ok(None)` for a directory entry that
/// resolves to `root` itself (such as `./`), which needs no work.
pub fn entry_destination(root: &Path, entry_name: &str, is_dir: bool) -> Result<Option<PathBuf>> {
    let target = clean_path(&root.join(entry_name));

    if target == root && is_dir {
        return Ok(None);
    }
    if target == root || !target.starts_with(root) {
        log_error!(
            "[Extractor] Refusing archive entry '{}': it resolves to {}",
            entry_name.red(),
            target.display()
        );
        return Err(GoSwitchError::UnsafeArchiveEntry {
            entry: entry_name.to_string(),
            dest: root.to_path_buf(),
        });
    }
    Ok(Some(target))
}
