//! # Version Inventory
//!
//! Discovers every Go installation this machine knows about and flags the active one.
//!
//! Three independent sources are reconciled:
//! 1. **Managed installs**: immediate `go*` subdirectories of the managed root.
//! 2. **System installs**: the well-known locations from [`ManagerConfig::system_locations`].
//! 3. **The live `GOROOT`**: whatever the current environment points at, when it is not
//!    already under the managed root.
//!
//! Entries are deduplicated by their normalized path key (see
//! [`path_helpers::normalize_key`]), so a system location that is also the current
//! `GOROOT` is only reported once.
//!
//! ## Ordering
//!
//! Managed installs come first, system installs second. Inside each group the order is
//! whatever the OS returns from its directory listing: it is not sorted and callers must
//! not rely on it being stable across platforms or filesystems.

use crate::libs::utilities::path_helpers::{self, key_is_within, normalize_key, path_key};
use crate::schemas::manager_config::ManagerConfig;
use crate::schemas::versions::InstalledVersion;
use crate::{log_debug, log_warn};
use colored::Colorize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory names that count as managed installs start with this prefix.
pub const MANAGED_DIR_PREFIX: &str = "go";
/// Folder that go.dev archives wrap the toolchain in.
pub const CANONICAL_LAYOUT_DIR: &str = "go";
/// Marker file at the root of every Go distribution (`go1.22.0` on its first line).
pub const VERSION_MARKER_FILE: &str = "VERSION";
/// Label for system installs whose version cannot be determined.
pub const SYSTEM_LABEL: &str = "System";

/// Lists every discoverable installation.
///
/// # Arguments
/// * `config`: Provides the managed root and the system locations to scan.
/// * `current_root`: The live `GOROOT` value, if any.
///
/// # Returns
/// * `Vec<InstalledVersion>`: Managed installs first, then system installs. At most one
///   entry per normalized path and at most one entry flagged `active`.
pub fn list_installed(config: &ManagerConfig, current_root: Option<&str>) -> Vec<InstalledVersion> {
    let current_key = current_root.map(normalize_key).filter(|k| !k.is_empty());
    log_debug!("[Inventory] Current GOROOT key: {:?}", current_key);

    let mut versions = scan_managed_root(&config.sdk_root, current_key.as_deref());
    let mut seen: HashSet<String> = versions.iter().map(|v| path_key(&v.path)).collect();

    let mut candidates = config.system_locations.clone();
    if let (Some(raw), Some(key)) = (current_root, current_key.as_deref()) {
        if !key_is_within(key, &path_key(&config.sdk_root)) {
            candidates.push(PathBuf::from(raw.trim()));
        }
    }

    for candidate in candidates {
        let key = path_key(&candidate);
        if seen.contains(&key) {
            continue;
        }
        if !candidate.exists() {
            log_debug!("[Inventory] System location {} not present", candidate.display());
            continue;
        }

        let active = current_key.as_deref() == Some(key.as_str());
        let name = detect_version_name(&candidate);
        log_debug!(
            "[Inventory] Found system install {} at {}",
            name.cyan(),
            candidate.display()
        );
        versions.push(InstalledVersion {
            name,
            path: candidate,
            active,
        });
        seen.insert(key);
    }

    versions
}

/// Returns the actual toolchain root for an install directory: the nested canonical
/// `go` folder when the archive wrapped its content in one, the directory itself otherwise.
pub fn install_root(dir: &Path) -> PathBuf {
    let nested = dir.join(CANONICAL_LAYOUT_DIR);
    if nested.is_dir() {
        nested
    } else {
        dir.to_path_buf()
    }
}

/// Works out a display name for a system install.
///
/// Resolution order: first line of the `VERSION` marker, then the directory base name if it
/// looks like a Go version (`go1.21.3`), then [`SYSTEM_LABEL`].
pub fn detect_version_name(dir: &Path) -> String {
    if let Ok(content) = fs::read_to_string(dir.join(VERSION_MARKER_FILE)) {
        // Newer distributions append build metadata (`time ...`) on later lines.
        if let Some(first) = content.lines().map(str::trim).find(|l| !l.is_empty()) {
            return first.to_string();
        }
    }

    dir.file_name()
        .map(|base| base.to_string_lossy().into_owned())
        .filter(|base| base.starts_with(MANAGED_DIR_PREFIX))
        .unwrap_or_else(|| SYSTEM_LABEL.to_string())
}

/// Scans the managed root. A root that cannot be listed yields no managed installs.
fn scan_managed_root(sdk_root: &Path, current_key: Option<&str>) -> Vec<InstalledVersion> {
    let entries = match fs::read_dir(sdk_root) {
        Ok(entries) => entries,
        Err(e) => {
            log_warn!(
                "[Inventory] Could not list managed root {}: {}",
                sdk_root.display().to_string().yellow(),
                e
            );
            return Vec::new();
        }
    };

    let mut versions = Vec::new();
    for entry in entries.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_dir || !name.starts_with(MANAGED_DIR_PREFIX) {
            continue;
        }

        let path = install_root(&entry.path());
        let active = current_key == Some(path_helpers::path_key(&path).as_str());
        log_debug!(
            "[Inventory] Managed install {} -> {} (active: {})",
            name.cyan(),
            path.display(),
            active
        );
        versions.push(InstalledVersion { name, path, active });
    }
    versions
}
