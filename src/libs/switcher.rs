//! # Environment Switcher
//!
//! Points the machine-wide `GOROOT` at a chosen installation and puts its `bin` directory
//! first on the machine `Path`.
//!
//! ## Switch Workflow
//!
//! 1. **Resolve** - absolute identifiers are used verbatim, anything else is looked up under
//!    the managed root, descending into the nested `go` folder when the archive had one
//! 2. **Validate** - the resolved directory must exist
//! 3. **Acquire** - open the machine environment for writing (needs elevation on Windows)
//! 4. **Mutate** - write `GOROOT`, then rebuild `Path` without any stale toolchain entries
//! 5. **Commit** - write `Path` back as an expandable string and mirror `GOROOT` into the
//!    running process
//!
//! `GOROOT` and `Path` are written separately. If the second write fails the machine is left
//! with the new `GOROOT` and the old `Path`; the error is surfaced and the caller can simply
//! switch again.

use crate::libs::env_store::{EnvironmentStore, SEARCH_PATH_VAR};
use crate::libs::inventory::install_root;
use crate::libs::utilities::path_helpers::{key_is_within, normalize_key, path_key, resolve_identifier};
use crate::schemas::errors::{GoSwitchError, Result};
use crate::schemas::manager_config::ManagerConfig;
use crate::{log_debug, log_info};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Separator between search path entries.
pub const SEARCH_PATH_SEPARATOR: char = ';';
/// Path fragments that mark a Go toolchain `bin` directory, in lower case.
const TOOLCHAIN_BIN_FRAGMENTS: [&str; 2] = [r"\go\bin", "go/bin"];
/// Path fragments of the default managed layout, in lower case.
const MANAGED_LAYOUT_FRAGMENTS: [&str; 2] = [r".goswitch\sdk", ".goswitch/sdk"];

/// Resolves `identifier` to the directory `GOROOT` should point at.
pub fn resolve_target(sdk_root: &Path, identifier: &str) -> PathBuf {
    install_root(&resolve_identifier(sdk_root, identifier.trim()))
}

/// Makes `identifier` the machine-wide Go toolchain.
///
/// # Arguments
/// * `config`: Supplies the managed root used for resolution and for pruning `Path`.
/// * `store`: The persistent environment to rewrite.
/// * `identifier`: A managed version name (`go1.22.0`) or an absolute install path.
///
/// # Returns
/// * `Ok(PathBuf)` with the new `GOROOT`.
/// * `GoSwitchError::VersionNotFound` when the resolved directory does not exist.
/// * `GoSwitchError::ElevationRequired` when the store refuses to open for writing.
pub fn switch(
    config: &ManagerConfig,
    store: &dyn EnvironmentStore,
    identifier: &str,
) -> Result<PathBuf> {
    let target = resolve_target(&config.sdk_root, identifier);
    log_debug!("[Switcher] '{}' resolved to {}", identifier, target.display());

    if !target.exists() {
        return Err(GoSwitchError::VersionNotFound(target));
    }

    let mut env = store.open_machine_environment()?;

    let root = target.to_string_lossy().into_owned();
    if let Ok(Some(previous)) = env.root() {
        log_debug!("[Switcher] Replacing GOROOT {}", previous);
    }
    env.set_root(&root)?;
    log_debug!("[Switcher] GOROOT set to {}", root);

    let current = env.search_path()?;
    let new_bin = target.join("bin").to_string_lossy().into_owned();
    let rewritten = rewrite_search_path(&current, &new_bin, &config.sdk_root);
    log_debug!("[Switcher] {} rewritten: {}", SEARCH_PATH_VAR, rewritten);
    env.set_search_path(&rewritten)?;

    store.mirror_process_root(&root);

    log_info!(
        "[Switcher] Switched to {} (open a new terminal to pick it up)",
        root.green().bold()
    );
    Ok(target)
}

/// Rebuilds a `;`-separated search path with `new_bin` first.
///
/// Existing entries are kept in their original order, duplicates included, except empty
/// entries and those caught by [`is_toolchain_bin_entry`] or [`is_managed_entry`].
pub fn rewrite_search_path(current: &str, new_bin: &str, sdk_root: &Path) -> String {
    let root_key = path_key(sdk_root);
    let mut entries = vec![new_bin];
    entries.extend(
        current
            .split(SEARCH_PATH_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
            .filter(|entry| !is_toolchain_bin_entry(entry) && !is_managed_entry(entry, &root_key)),
    );
    entries.join(&SEARCH_PATH_SEPARATOR.to_string())
}

/// `true` when `entry` looks like any Go toolchain's `bin` directory.
pub fn is_toolchain_bin_entry(entry: &str) -> bool {
    let lowered = entry.to_lowercase();
    TOOLCHAIN_BIN_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}

/// `true` when `entry` lives under the managed root (given as a [`normalize_key`] key) or
/// under the default managed layout.
pub fn is_managed_entry(entry: &str, sdk_root_key: &str) -> bool {
    if key_is_within(&normalize_key(entry), sdk_root_key) {
        return true;
    }
    let lowered = entry.to_lowercase();
    MANAGED_LAYOUT_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::env_store::MemoryEnvironment;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stale_go_bin_is_replaced_and_others_keep_their_order() {
        let current = r"C:\Windows\system32;C:\Old\Go\bin;C:\Tools;C:\Program Files\Git\cmd";
        let rewritten = rewrite_search_path(
            current,
            r"C:\Users\me\.goswitch\sdk\go1.22.0\go\bin",
            Path::new(r"C:\Users\me\.goswitch\sdk"),
        );
        assert_eq!(
            rewritten,
            r"C:\Users\me\.goswitch\sdk\go1.22.0\go\bin;C:\Windows\system32;C:\Tools;C:\Program Files\Git\cmd"
        );
    }

    #[test]
    fn empty_entries_are_dropped_and_duplicates_kept() {
        let rewritten = rewrite_search_path(";C:\\A;;C:\\A;", r"D:\go\bin", Path::new("/sdk"));
        assert_eq!(rewritten, r"D:\go\bin;C:\A;C:\A");
    }

    #[test]
    fn expandable_references_survive() {
        let rewritten =
            rewrite_search_path(r"%SystemRoot%\system32;%GOROOT%\bin", r"C:\Go\bin", Path::new("/sdk"));
        assert_eq!(rewritten, r"C:\Go\bin;%SystemRoot%\system32;%GOROOT%\bin");
    }

    #[test]
    fn toolchain_bin_detection_is_case_insensitive() {
        assert!(is_toolchain_bin_entry(r"C:\PROGRAM FILES\GO\BIN"));
        assert!(is_toolchain_bin_entry("/usr/local/go/bin"));
        assert!(!is_toolchain_bin_entry(r"C:\Users\me\go\pkg"));
        assert!(!is_toolchain_bin_entry(r"C:\Windows"));
    }

    #[test]
    fn managed_entries_match_root_or_layout() {
        let key = normalize_key(r"D:\toolchains");
        assert!(is_managed_entry(r"d:\Toolchains\go1.21.0\bin", &key));
        assert!(is_managed_entry(r"C:\Users\me\.goswitch\sdk\go1.20\bin", &key));
        assert!(!is_managed_entry(r"D:\toolchains-old\bin", &key));
    }

    fn managed_install(tmp: &TempDir, version: &str) -> ManagerConfig {
        let config = ManagerConfig::with_root(tmp.path().join("sdk")).unwrap();
        fs::create_dir_all(config.sdk_root.join(version).join("go").join("bin")).unwrap();
        config
    }

    #[test]
    fn switch_updates_store_and_process_view() {
        let tmp = TempDir::new().unwrap();
        let config = managed_install(&tmp, "go1.22.0");
        let env = MemoryEnvironment::with_search_path(r"C:\Windows;C:\Go\bin");

        let target = switch(&config, &env, "go1.22.0").unwrap();

        assert_eq!(target, config.sdk_root.join("go1.22.0").join("go"));
        let root = target.to_string_lossy().into_owned();
        assert_eq!(env.root().as_deref(), Some(root.as_str()));
        assert_eq!(env.process_root().as_deref(), Some(root.as_str()));

        let path = env.search_path();
        let entries: Vec<&str> = path.split(';').collect();
        assert_eq!(entries[0], target.join("bin").to_string_lossy());
        assert_eq!(&entries[1..], &[r"C:\Windows"]);
    }

    #[test]
    fn switching_again_replaces_the_previous_root() {
        let tmp = TempDir::new().unwrap();
        let config = managed_install(&tmp, "go1.21.0");
        fs::create_dir_all(config.sdk_root.join("go1.22.0").join("go").join("bin")).unwrap();
        let env = MemoryEnvironment::with_search_path(r"C:\Windows");

        let first = switch(&config, &env, "go1.21.0").unwrap();
        let second = switch(&config, &env, "go1.22.0").unwrap();

        assert!(second.is_absolute());
        let second_root = second.to_string_lossy().into_owned();
        assert_eq!(env.root().as_deref(), Some(second_root.as_str()));
        let path = env.search_path();
        assert!(!path.contains(&*first.to_string_lossy()));
        assert_eq!(path.split(';').count(), 2);
    }

    #[test]
    fn unknown_version_touches_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = ManagerConfig::with_root(tmp.path().join("sdk")).unwrap();
        let env = MemoryEnvironment::with_search_path(r"C:\Windows");

        let err = switch(&config, &env, "go9.9.9").unwrap_err();
        assert!(matches!(err, GoSwitchError::VersionNotFound(_)));
        assert_eq!(env.root(), None);
        assert_eq!(env.search_path(), r"C:\Windows");
    }

    #[test]
    fn refused_store_is_an_elevation_error() {
        let tmp = TempDir::new().unwrap();
        let config = managed_install(&tmp, "go1.22.0");
        let env = MemoryEnvironment::default().deny_access();

        let err = switch(&config, &env, "go1.22.0").unwrap_err();
        assert!(err.requires_elevation());
        assert_eq!(env.process_root(), None);
    }

    #[test]
    fn failed_path_write_leaves_new_root_behind() {
        let tmp = TempDir::new().unwrap();
        let config = managed_install(&tmp, "go1.22.0");
        let env = MemoryEnvironment::with_search_path(r"C:\Windows").fail_search_path_writes();

        assert!(switch(&config, &env, "go1.22.0").is_err());
        assert!(env.root().is_some());
        assert_eq!(env.search_path(), r"C:\Windows");
        assert_eq!(env.process_root(), None);
    }
}
