//! # GoSwitch Facade
//!
//! Bundles the configuration, the HTTP agent, the environment store and the download size
//! policy behind the handful of operations a front end needs. Every call runs to completion
//! on the caller's thread; the install progress callback runs inline in the download loop.

use crate::installers::archive::{self, HeadProbeEstimator, SizeEstimator};
use crate::libs::env_store::{EnvironmentStore, MachineEnvironment};
use crate::libs::{catalog, inventory, switcher, uninstaller};
use crate::schemas::errors::Result;
use crate::schemas::manager_config::ManagerConfig;
use crate::schemas::versions::{InstalledVersion, RemoteRelease};
use std::path::PathBuf;

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("goswitch/", env!("CARGO_PKG_VERSION"));

pub struct GoSwitch {
    config: ManagerConfig,
    agent: ureq::Agent,
    store: Box<dyn EnvironmentStore>,
    estimator: Box<dyn SizeEstimator>,
}

impl GoSwitch {
    /// A manager wired to the real machine environment and the network.
    pub fn new(config: ManagerConfig) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
        let estimator = HeadProbeEstimator::new(agent.clone(), config.fallback_download_size);
        GoSwitch::with_parts(
            config,
            agent,
            Box::new(MachineEnvironment),
            Box::new(estimator),
        )
    }

    /// A manager with explicit collaborators (tests, dry runs, embedding).
    pub fn with_parts(
        config: ManagerConfig,
        agent: ureq::Agent,
        store: Box<dyn EnvironmentStore>,
        estimator: Box<dyn SizeEstimator>,
    ) -> Self {
        GoSwitch {
            config,
            agent,
            store,
            estimator,
        }
    }

    /// Same as [`GoSwitch::new`] but with a different environment store.
    pub fn with_store(config: ManagerConfig, store: Box<dyn EnvironmentStore>) -> Self {
        GoSwitch {
            store,
            ..GoSwitch::new(config)
        }
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Managed and system installs, with the one matching the process `GOROOT` flagged active.
    pub fn list_installed(&self) -> Result<Vec<InstalledVersion>> {
        let current = self.store.process_root();
        Ok(inventory::list_installed(&self.config, current.as_deref()))
    }

    /// Full release history with locally computed stability.
    pub fn fetch_remote_catalog(&self) -> Result<Vec<RemoteRelease>> {
        catalog::fetch_remote_catalog(&self.agent, &self.config.catalog_url)
    }

    /// Downloads and extracts `version` into the managed root.
    pub fn install(&self, version: &str, on_progress: impl FnMut(u8)) -> Result<PathBuf> {
        archive::install(
            &self.config,
            &self.agent,
            self.estimator.as_ref(),
            version,
            on_progress,
        )
    }

    /// Makes `version` (a managed name or an absolute path) the machine-wide toolchain.
    pub fn switch(&self, version: &str) -> Result<PathBuf> {
        switcher::switch(&self.config, self.store.as_ref(), version)
    }

    /// Removes a managed version. Nothing outside the managed root is ever deleted.
    pub fn uninstall(&self, version: &str) -> Result<()> {
        uninstaller::uninstall(&self.config, version).map(|_| ())
    }
}
