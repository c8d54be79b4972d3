// `goswitch remote`: the go.dev release catalog, optionally searched and filtered.

use anyhow::{Context, Result};
use colored::Colorize;
use goswitch::{GoSwitch, RemoteRelease};
use goswitch::log_warn;
use prettytable::{Table, format, row};

pub fn run(manager: &GoSwitch, stable_only: bool, filter: Option<String>) -> Result<()> {
    let releases = manager
        .fetch_remote_catalog()
        .context("Failed to fetch the go.dev release catalog")?;

    let shown = select(releases, stable_only, filter.as_deref());
    if shown.is_empty() {
        log_warn!("No releases match the given filter.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["VERSION", "CHANNEL"]);
    for release in &shown {
        let channel = if release.stable {
            "stable".green()
        } else {
            "pre-release".yellow()
        };
        table.add_row(row![release.version, channel]);
    }
    table.printstd();
    Ok(())
}

/// Applies the stable-only switch and a case-insensitive substring search, keeping catalog order.
fn select(releases: Vec<RemoteRelease>, stable_only: bool, filter: Option<&str>) -> Vec<RemoteRelease> {
    let needle = filter.map(|f| f.trim().to_lowercase()).unwrap_or_default();
    releases
        .into_iter()
        .filter(|r| !stable_only || r.stable)
        .filter(|r| needle.is_empty() || r.version.to_lowercase().contains(&needle))
        .collect()
}
