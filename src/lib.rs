//! # goswitch
//!
//! Installs Go toolchains from go.dev into a managed directory and switches the machine-wide
//! `GOROOT`/`Path` between them.
//!
//! ```no_run
//! use goswitch::{GoSwitch, ManagerConfig};
//!
//! # fn main() -> goswitch::Result<()> {
//! let manager = GoSwitch::new(ManagerConfig::load(None)?);
//! manager.install("go1.22.0", |percent| eprint!("\r{percent}%"))?;
//! manager.switch("go1.22.0")?;
//! # Ok(())
//! # }
//! ```

pub mod logger;

pub mod installers;
pub mod libs;
pub mod schemas;

pub use libs::env_store::{EnvironmentHandle, EnvironmentStore, MachineEnvironment, MemoryEnvironment};
pub use libs::manager::GoSwitch;
pub use schemas::errors::{GoSwitchError, Result};
pub use schemas::manager_config::ManagerConfig;
pub use schemas::versions::{InstalledVersion, RemoteRelease};
