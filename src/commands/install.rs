// `goswitch install <version>`: download with an inline percentage indicator.

use anyhow::{Context, Result};
use colored::Colorize;
use goswitch::GoSwitch;
use std::io::{self, Write};

pub fn run(manager: &GoSwitch, version: &str) -> Result<()> {
    let mut stderr = io::stderr();
    let dest = manager
        .install(version, |percent| {
            let _ = write!(stderr, "\r  {} {:>3}%", "Downloading".cyan(), percent);
            let _ = stderr.flush();
        })
        .with_context(|| format!("Failed to install {version}"));
    eprintln!();
    let dest = dest?;

    println!(
        "{} {} installed at {}",
        "✓".green(),
        version.bold(),
        dest.display()
    );
    println!("Run {} to activate it.", format!("goswitch use {version}").bold());
    Ok(())
}
