// Register application subcommands.
// Each module corresponds to a specific `goswitch` command-line action.

// Downloads and installs a release.
pub mod install;
// Shows installed versions.
pub mod list;
// Shows the go.dev catalog.
pub mod remote;
// Switches the machine-wide toolchain.
pub mod switch;
// Removes a managed version.
pub mod uninstall;
// Displays the version of goswitch.
pub mod version;
