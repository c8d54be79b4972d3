// `goswitch list`: installed versions as a table, the active one highlighted.

use anyhow::{Context, Result};
use colored::Colorize;
use goswitch::GoSwitch;
use goswitch::log_info;
use prettytable::{Table, format, row};

pub fn run(manager: &GoSwitch) -> Result<()> {
    let versions = manager
        .list_installed()
        .context("Failed to list installed versions")?;

    if versions.is_empty() {
        log_info!(
            "No Go installations found. Try {}",
            "goswitch install <version>".bold()
        );
        return Ok(());
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    table.set_titles(row!["", "VERSION", "PATH"]);
    for version in &versions {
        let path = version.path.display().to_string();
        if version.active {
            table.add_row(row![
                "*".green().bold(),
                version.name.green().bold(),
                path.green()
            ]);
        } else {
            table.add_row(row!["", version.name, path]);
        }
    }
    table.printstd();

    if !versions.iter().any(|v| v.active) {
        log_info!("None of these is the active GOROOT.");
    }
    Ok(())
}
