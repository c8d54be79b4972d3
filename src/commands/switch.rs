// `goswitch use <version>`: rewrite the machine-wide GOROOT and Path.

use anyhow::{Result, anyhow};
use colored::Colorize;
use goswitch::{GoSwitch, GoSwitchError};
use goswitch::log_error;

pub fn run(manager: &GoSwitch, version: &str) -> Result<()> {
    match manager.switch(version) {
        Ok(root) => {
            println!("{} GOROOT is now {}", "✓".green(), root.display().to_string().bold());
            println!("Open a new terminal for the change to take effect.");
            Ok(())
        }
        Err(e) if e.requires_elevation() => {
            log_error!(
                "Changing the machine environment needs Administrator rights. Re-run from an elevated terminal."
            );
            Err(anyhow!(e))
        }
        Err(GoSwitchError::VersionNotFound(path)) => Err(anyhow!(
            "{} is not installed (looked in {}). See `goswitch list`.",
            version,
            path.display()
        )),
        Err(e) => Err(anyhow!(e).context(format!("Failed to switch to {version}"))),
    }
}
