// Core operations of `goswitch`. Each module owns one concern; `manager` ties them
// together behind the `GoSwitch` facade.

// Fetches and classifies the go.dev release index.
pub mod catalog;
// Persistent environment access (registry on Windows, in-memory fake everywhere).
pub mod env_store;
// Discovers managed and system installations.
pub mod inventory;
// The `GoSwitch` facade used by the CLI.
pub mod manager;
// Rewrites GOROOT and Path.
pub mod switcher;
// Scoped removal of managed versions.
pub mod uninstaller;
pub mod utilities;
