// Path utilities shared by the inventory, the switcher, the uninstaller and the extractor.
//
// Two flavours of "normalization" live here:
// - `normalize_key` turns a path *string* into a comparison key (case-insensitive,
//   separator-agnostic). It is what decides whether two installs are the same and
//   whether an install is the current GOROOT.
// - `clean_path` is a purely lexical cleanup of a real `Path` (no lower-casing) used for
//   containment checks before anything is written or deleted.

use crate::log_warn;
use colored::Colorize;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Expands `~` at the start of a path into the user's home directory.
///
/// # Arguments
/// * `path`: A path that might start with `~`.
///
/// # Returns
/// * `PathBuf`: The expanded path, or the input unchanged when there is no `~` or no home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return PathBuf::from(path.replacen('~', &home.to_string_lossy(), 1));
        }
    }
    PathBuf::from(path)
}

/// Expands `~` and environment variables (`$HOME`, `${LOCALAPPDATA}`) inside a path coming
/// from a config file or an environment variable.
///
/// Unknown variables are not an error: the path is then only tilde-expanded and a warning
/// is logged, so a typo shows up in the logs instead of aborting startup.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(e) => {
            log_warn!(
                "[Paths] Could not expand variables in '{}': {}. Using it as-is.",
                raw.yellow(),
                e
            );
            expand_tilde(raw)
        }
    }
}

/// Builds the comparison key for a path string.
///
/// Trims whitespace, unifies `\` and `/`, collapses repeated separators, lexically resolves
/// `.` and `..`, drops any trailing separator and lower-cases the result. Windows paths are
/// case-insensitive, so `C:\Go\` and `c:/go` produce the same key.
pub fn normalize_key(raw: &str) -> String {
    let unified = raw.trim().replace('\\', "/");
    let absolute = unified.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in unified.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                if parts.last().is_some_and(|last| *last != "..") {
                    parts.pop();
                } else if !absolute {
                    parts.push("..");
                }
            }
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    let key = if absolute {
        format!("/{joined}")
    } else {
        joined
    };
    key.to_lowercase()
}

/// Builds the comparison key for a `Path`.
pub fn path_key(path: &Path) -> String {
    normalize_key(&path.to_string_lossy())
}

/// `true` when `key` is `root_key` itself or lies underneath it.
/// Both arguments must already be keys produced by [`normalize_key`].
pub fn key_is_within(key: &str, root_key: &str) -> bool {
    if root_key.is_empty() {
        return false;
    }
    if key == root_key {
        return true;
    }
    let prefix = if root_key.ends_with('/') {
        root_key.to_string()
    } else {
        format!("{root_key}/")
    };
    key.starts_with(&prefix)
}

/// Lexically cleans a path: drops `.` components and resolves `..` against the preceding
/// component. `..` never climbs above a root, mirroring how the OS resolves `/..`.
/// The filesystem is never touched, so symlinks are not followed.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(
                    cleaned.components().next_back(),
                    Some(Component::Normal(_))
                );
                if last_is_normal {
                    cleaned.pop();
                } else if !cleaned.has_root() {
                    cleaned.push("..");
                }
            }
            Component::Normal(part) => cleaned.push(part),
        }
    }
    cleaned
}

/// Anchors a relative path at the current directory and cleans it lexically.
///
/// Paths written into the machine environment are read by processes with other working
/// directories, so everything derived from the managed root has to be absolute.
pub fn make_absolute(path: &Path) -> io::Result<PathBuf> {
    Ok(clean_path(&std::path::absolute(path)?))
}

/// `true` when `path` is strictly inside `root` after lexical cleaning.
///
/// The comparison is component-wise, so `/sdk-evil` is not inside `/sdk`, and `root`
/// itself does not count as its own descendant.
pub fn is_strict_descendant(path: &Path, root: &Path) -> bool {
    let path = clean_path(path);
    let root = clean_path(root);
    path != root && path.starts_with(&root)
}

/// Resolves a version identifier to a directory: absolute identifiers are used as they are,
/// anything else is taken relative to the managed root.
pub fn resolve_identifier(sdk_root: &Path, identifier: &str) -> PathBuf {
    let candidate = Path::new(identifier);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        sdk_root.join(candidate)
    }
}
