// Removes installed versions from the managed root.
//
// Deletion is scoped: only strict descendants of the managed root can be removed, whatever
// identifier the caller passes. System installs and the managed root itself are refused.
// The check is lexical (`..` is resolved, symlinks are not followed).

use crate::libs::utilities::path_helpers::{is_strict_descendant, resolve_identifier};
use crate::schemas::errors::{GoSwitchError, Result};
use crate::schemas::manager_config::ManagerConfig;
use crate::{log_info, log_warn};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Deletes the installation named by `identifier`.
///
/// # Returns
/// * `Ok(PathBuf)` with the directory that was removed, or that was already absent.
/// * `GoSwitchError::OutsideManagedRoot` when the target is not inside the managed root;
///   nothing is deleted in that case.
pub fn uninstall(config: &ManagerConfig, identifier: &str) -> Result<PathBuf> {
    let target = resolve_identifier(&config.sdk_root, identifier.trim());

    if !is_strict_descendant(&target, &config.sdk_root) {
        return Err(GoSwitchError::OutsideManagedRoot {
            path: target,
            root: config.sdk_root.clone(),
        });
    }

    if !target.exists() {
        log_warn!(
            "[Uninstaller] {} is not installed, nothing to remove",
            target.display().to_string().yellow()
        );
        return Ok(target);
    }

    fs::remove_dir_all(&target)
        .map_err(|e| GoSwitchError::io(format!("failed to remove {}", target.display()), e))?;
    log_info!(
        "[Uninstaller] Removed {}",
        target.display().to_string().green()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, ManagerConfig) {
        let tmp = TempDir::new().unwrap();
        let config = ManagerConfig::with_root(tmp.path().join("sdk")).unwrap();
        (tmp, config)
    }

    #[test]
    fn removes_a_managed_version() {
        let (_tmp, config) = setup();
        let dir = config.sdk_root.join("go1.21.0").join("go").join("bin");
        fs::create_dir_all(&dir).unwrap();

        let removed = uninstall(&config, "go1.21.0").unwrap();
        assert_eq!(removed, config.sdk_root.join("go1.21.0"));
        assert!(!removed.exists());
        assert!(config.sdk_root.exists());
    }

    #[test]
    fn absolute_path_outside_root_is_refused() {
        let (tmp, config) = setup();
        let outside = tmp.path().join("system-go");
        fs::create_dir_all(&outside).unwrap();

        let err = uninstall(&config, &outside.to_string_lossy()).unwrap_err();
        assert!(matches!(err, GoSwitchError::OutsideManagedRoot { .. }));
        assert!(outside.exists());
    }

    #[test]
    fn traversal_and_root_itself_are_refused() {
        let (tmp, config) = setup();
        let sibling = tmp.path().join("sdk-evil");
        fs::create_dir_all(&sibling).unwrap();

        for id in ["..", "../sdk-evil", "go1.21.0/../..", "."] {
            assert!(uninstall(&config, id).is_err(), "{id} should be refused");
        }
        assert!(sibling.exists());
        assert!(config.sdk_root.exists());
    }

    #[test]
    fn missing_version_is_a_no_op() {
        let (_tmp, config) = setup();
        assert!(uninstall(&config, "go1.0.0").is_ok());
    }
}
