//! # Persistent Environment Store
//!
//! The switcher never talks to the registry directly. It goes through the
//! [`EnvironmentStore`] capability, which has two implementations:
//!
//! - [`MachineEnvironment`]: the machine-wide environment of Windows
//!   (`HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment`). Opening it for
//!   writing needs Administrator rights. On other platforms it reports
//!   [`GoSwitchError::Unsupported`].
//! - [`MemoryEnvironment`]: an in-memory fake with the same behaviour, used by tests and by
//!   embedders that want a dry run.
//!
//! The store is global, process-external state. Nothing here locks it: two concurrent
//! switches race and the last writer wins.

use crate::schemas::errors::{GoSwitchError, Result};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// The toolchain root variable.
pub const ROOT_VAR: &str = "GOROOT";
/// The search path variable.
pub const SEARCH_PATH_VAR: &str = "Path";

/// Access to the persistent environment plus the running process's view of it.
pub trait EnvironmentStore {
    /// Opens the machine-wide store for reading and writing.
    ///
    /// Implementations report a refused open as [`GoSwitchError::ElevationRequired`].
    fn open_machine_environment(&self) -> Result<Box<dyn EnvironmentHandle + '_>>;

    /// The toolchain root as seen by the current process (not the persistent value).
    fn process_root(&self) -> Option<String>;

    /// Best-effort update of the current process's toolchain root. Does not touch the
    /// process search path.
    fn mirror_process_root(&self, value: &str);
}

/// An open, writable view of the persistent store.
pub trait EnvironmentHandle {
    fn root(&self) -> Result<Option<String>>;
    fn set_root(&mut self, value: &str) -> Result<()>;
    fn search_path(&self) -> Result<String>;
    /// Writes the search path as an expandable string so embedded `%VAR%` references keep
    /// working for the tools that read it.
    fn set_search_path(&mut self, value: &str) -> Result<()>;
}

fn environment_error(action: &str, source: io::Error) -> GoSwitchError {
    GoSwitchError::Environment {
        action: action.to_string(),
        source,
    }
}

// ============================================================================
// MACHINE ENVIRONMENT
// ============================================================================

/// The real machine-wide environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct MachineEnvironment;

#[cfg(windows)]
mod registry {
    use super::{EnvironmentHandle, ROOT_VAR, SEARCH_PATH_VAR, environment_error};
    use crate::schemas::errors::Result;
    use std::io;
    use winreg::RegKey;
    use winreg::enums::{HKEY_LOCAL_MACHINE, KEY_READ, KEY_WRITE, REG_EXPAND_SZ};
    use winreg::types::ToRegValue;

    pub(super) const ENVIRONMENT_KEY: &str =
        r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment";

    pub(super) fn open_environment_key() -> io::Result<RegKey> {
        RegKey::predef(HKEY_LOCAL_MACHINE)
            .open_subkey_with_flags(ENVIRONMENT_KEY, KEY_READ | KEY_WRITE)
    }

    pub(super) struct RegistryHandle {
        pub(super) key: RegKey,
    }

    impl EnvironmentHandle for RegistryHandle {
        fn root(&self) -> Result<Option<String>> {
            match self.key.get_value::<String, _>(ROOT_VAR) {
                Ok(value) => Ok(Some(value)),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(environment_error("read GOROOT", e)),
            }
        }

        fn set_root(&mut self, value: &str) -> Result<()> {
            self.key
                .set_value(ROOT_VAR, &value.to_string())
                .map_err(|e| environment_error("set GOROOT", e))
        }

        fn search_path(&self) -> Result<String> {
            self.key
                .get_value::<String, _>(SEARCH_PATH_VAR)
                .map_err(|e| environment_error("read Path", e))
        }

        fn set_search_path(&mut self, value: &str) -> Result<()> {
            let mut raw = value.to_string().to_reg_value();
            raw.vtype = REG_EXPAND_SZ;
            self.key
                .set_raw_value(SEARCH_PATH_VAR, &raw)
                .map_err(|e| environment_error("set Path", e))
        }
    }
}

impl EnvironmentStore for MachineEnvironment {
    #[cfg(windows)]
    fn open_machine_environment(&self) -> Result<Box<dyn EnvironmentHandle + '_>> {
        let key = registry::open_environment_key()
            .map_err(|source| GoSwitchError::ElevationRequired { source })?;
        Ok(Box::new(registry::RegistryHandle { key }))
    }

    #[cfg(not(windows))]
    fn open_machine_environment(&self) -> Result<Box<dyn EnvironmentHandle + '_>> {
        Err(GoSwitchError::Unsupported(
            "switching the machine-wide Go version is only supported on Windows".to_string(),
        ))
    }

    fn process_root(&self) -> Option<String> {
        std::env::var(ROOT_VAR).ok()
    }

    fn mirror_process_root(&self, value: &str) {
        // SAFETY: core operations run to completion on the caller's thread and the crate
        // spawns no threads of its own, so nothing else reads the environment concurrently.
        unsafe { std::env::set_var(ROOT_VAR, value) };
    }
}

// ============================================================================
// IN-MEMORY ENVIRONMENT
// ============================================================================

#[derive(Debug, Default)]
struct MemoryState {
    root: Option<String>,
    search_path: String,
    process_root: Option<String>,
    deny_open: bool,
    fail_search_path_write: bool,
}

/// In-memory stand-in for the machine environment.
///
/// Clones share the same state, so a test can hand one clone to the manager and inspect
/// the other afterwards.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnvironment {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryEnvironment {
    /// A store whose search path starts as `search_path`.
    pub fn with_search_path(search_path: &str) -> Self {
        let env = MemoryEnvironment::default();
        env.lock().search_path = search_path.to_string();
        env
    }

    /// Makes `open_machine_environment` fail the way a non-elevated process fails against the real store.
    pub fn deny_access(self) -> Self {
        self.lock().deny_open = true;
        self
    }

    /// Makes every search path write fail after the root was written.
    pub fn fail_search_path_writes(self) -> Self {
        self.lock().fail_search_path_write = true;
        self
    }

    /// Sets the process-level toolchain root (what a freshly started process would inherit).
    pub fn set_process_root(&self, value: Option<&str>) {
        self.lock().process_root = value.map(str::to_string);
    }

    /// The persistent toolchain root.
    pub fn root(&self) -> Option<String> {
        self.lock().root.clone()
    }

    /// The persistent search path.
    pub fn search_path(&self) -> String {
        self.lock().search_path.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

struct MemoryHandle<'a> {
    env: &'a MemoryEnvironment,
}

impl EnvironmentHandle for MemoryHandle<'_> {
    fn root(&self) -> Result<Option<String>> {
        Ok(self.env.lock().root.clone())
    }

    fn set_root(&mut self, value: &str) -> Result<()> {
        self.env.lock().root = Some(value.to_string());
        Ok(())
    }

    fn search_path(&self) -> Result<String> {
        Ok(self.env.lock().search_path.clone())
    }

    fn set_search_path(&mut self, value: &str) -> Result<()> {
        let mut state = self.env.lock();
        if state.fail_search_path_write {
            return Err(environment_error(
                "set Path",
                io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            ));
        }
        state.search_path = value.to_string();
        Ok(())
    }
}

impl EnvironmentStore for MemoryEnvironment {
    fn open_machine_environment(&self) -> Result<Box<dyn EnvironmentHandle + '_>> {
        if self.lock().deny_open {
            return Err(GoSwitchError::ElevationRequired {
                source: io::Error::new(io::ErrorKind::PermissionDenied, "Access is denied."),
            });
        }
        Ok(Box::new(MemoryHandle { env: self }))
    }

    fn process_root(&self) -> Option<String> {
        self.lock().process_root.clone()
    }

    fn mirror_process_root(&self, value: &str) {
        self.set_process_root(Some(value));
    }
}
