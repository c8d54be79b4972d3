use clap::{Parser, Subcommand};

/// Defines the command-line interface (CLI) for 'goswitch'.
/// `#[derive(Parser)]` automatically generates argument parsing code via `clap`.
#[derive(Parser)]
#[command(name = "goswitch")]
#[command(about = "Install Go toolchains from go.dev and switch the machine-wide GOROOT between them")]
pub struct Cli {
    /// Enables detailed debug output for troubleshooting.
    #[arg(short, long, global = true)]
    pub(crate) debug: bool,

    /// Managed root holding one directory per installed version (defaults to ~/.goswitch/sdk).
    #[arg(long, global = true, env = "GOSWITCH_SDK_ROOT")]
    pub(crate) root: Option<String>,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

/// Enumerates all supported subcommands with their specific arguments and options.
#[derive(Subcommand)]
pub enum Commands {
    /// Show the current version of goswitch.
    Version,
    /// List installed Go versions (managed and system installs), marking the active one.
    List,
    /// List Go releases available on go.dev.
    Remote {
        /// Only show stable releases (no rc or beta builds).
        #[arg(long)]
        stable: bool,
        /// Case-insensitive substring to search for, e.g. "1.22".
        #[arg(long)]
        filter: Option<String>,
    },
    /// Download and install a Go release into the managed root.
    Install {
        /// Release name as listed by `goswitch remote`, e.g. go1.22.0.
        version: String,
    },
    /// Point GOROOT and Path at an installed version. Needs Administrator rights.
    Use {
        /// Managed version name (go1.22.0) or absolute path of an install.
        version: String,
    },
    /// Remove a managed version.
    Uninstall {
        /// Managed version name, e.g. go1.21.0.
        version: String,
        /// Skip the confirmation prompt. Also required to remove the active version.
        #[arg(short, long)]
        yes: bool,
    },
}
