// `goswitch uninstall <version>`: confirm, then remove a managed version.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use dialoguer::Confirm;
use goswitch::GoSwitch;
use goswitch::libs::utilities::path_helpers::{key_is_within, path_key, resolve_identifier};
use goswitch::log_warn;

pub fn run(manager: &GoSwitch, version: &str, yes: bool) -> Result<()> {
    let target = resolve_identifier(&manager.config().sdk_root, version.trim());

    let installed = manager.list_installed().unwrap_or_default();
    let target_key = path_key(&target);
    let is_active = installed
        .iter()
        .filter(|v| v.active)
        .any(|v| key_is_within(&path_key(&v.path), &target_key));
    check_active(version, is_active, yes)?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Remove {}?", target.display()))
            .default(false)
            .interact()
            .context("Failed to get confirmation")?;

        if !confirmed {
            println!("{}", "Cancelled.".yellow());
            return Ok(());
        }
    }

    manager
        .uninstall(version)
        .with_context(|| format!("Failed to uninstall {version}"))?;
    println!("{} Removed {}", "✓".green(), version.bold());
    Ok(())
}

/// The active toolchain is only removed when the user passed `--yes`.
fn check_active(version: &str, is_active: bool, yes: bool) -> Result<()> {
    if !is_active {
        return Ok(());
    }
    if !yes {
        bail!(
            "{version} is the active GOROOT. Switch to another version first, or pass --yes to remove it anyway."
        );
    }
    log_warn!(
        "{} is the active GOROOT. It will keep pointing at the removed directory until you switch.",
        version.yellow()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_version_needs_explicit_yes() {
        let err = check_active("go1.22.0", true, false).unwrap_err();
        assert!(err.to_string().contains("--yes"));
        assert!(check_active("go1.22.0", true, true).is_ok());
    }

    #[test]
    fn inactive_version_is_not_blocked() {
        assert!(check_active("go1.21.0", false, false).is_ok());
    }
}
