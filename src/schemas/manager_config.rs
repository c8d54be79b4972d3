// =========================================================================== //
//                          STANDARD LIBRARY DEPENDENCIES                      //
// =========================================================================== //

use std::path::{Path, PathBuf};
use std::{env, fs};

// =========================================================================== //
//                             EXTERNAL DEPENDENCIES                           //
// =========================================================================== //

use colored::Colorize;
use serde::Deserialize;

// =========================================================================== //
//                              INTERNAL IMPORTS                               //
// =========================================================================== //

use crate::libs::utilities::path_helpers::{expand_path, make_absolute};
use crate::libs::utilities::platform::TargetPlatform;
use crate::schemas::errors::{GoSwitchError, Result};
use crate::{log_debug, log_info};

/// Release index with the full history (stable, rc and beta builds).
pub const DEFAULT_CATALOG_URL: &str = "https://go.dev/dl/?mode=json&include=all";
/// Base URL under which `<version>.<os>-<arch>.zip` archives are published.
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://go.dev/dl";
/// Progress denominator when neither the download nor a HEAD probe declares a length.
pub const DEFAULT_FALLBACK_DOWNLOAD_SIZE: u64 = 140 * 1024 * 1024;

/// Overrides the base directory (`~/.goswitch`) holding `config.yaml` and the default SDK root.
pub const HOME_ENV_VAR: &str = "GOSWITCH_HOME";
/// Overrides the managed root directly.
pub const SDK_ROOT_ENV_VAR: &str = "GOSWITCH_SDK_ROOT";

/// Where the official Windows installer and older manual installs put Go.
pub fn default_system_locations() -> Vec<PathBuf> {
    vec![PathBuf::from(r"C:\Program Files\Go"), PathBuf::from(r"C:\Go")]
}

/// # ManagerConfig
///
/// Settings shared by every core operation. Built once at startup with
/// [`ManagerConfig::load`] (or [`ManagerConfig::with_root`] when embedding) and then only
/// read. Building it creates the managed root if it does not exist yet.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Managed root: one subdirectory per installed version.
    pub sdk_root: PathBuf,
    /// JSON release index.
    pub catalog_url: String,
    /// Prefix of the per-version archive URL.
    pub download_base_url: String,
    /// Platform baked into archive names.
    pub platform: TargetPlatform,
    /// System install locations scanned by the inventory besides the managed root.
    pub system_locations: Vec<PathBuf>,
    /// Progress denominator used when the archive size is unknown.
    pub fallback_download_size: u64,
}

/// Optional keys of `config.yaml`. Anything missing falls back to the defaults.
///
/// ```yaml
/// sdk_root: D:\toolchains\go
/// download_base_url: https://golang.google.cn/dl
/// system_locations:
///   - C:\Program Files\Go
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub sdk_root: Option<String>,
    pub catalog_url: Option<String>,
    pub download_base_url: Option<String>,
    pub os: Option<String>,
    pub arch: Option<String>,
    pub system_locations: Option<Vec<String>>,
    pub fallback_download_size: Option<u64>,
}

impl ManagerConfig {
    /// Resolves the configuration for this process.
    ///
    /// The managed root is resolved in this order:
    /// 1. `root_override` (the `--root` flag).
    /// 2. `GOSWITCH_SDK_ROOT`.
    /// 3. `sdk_root` in `<base>/config.yaml`.
    /// 4. `<base>/sdk`, where `<base>` is `GOSWITCH_HOME` or `~/.goswitch`.
    ///
    /// # Errors
    /// Fails when no home directory can be found, when `config.yaml` exists but is not
    /// valid YAML, or when the managed root cannot be created.
    pub fn load(root_override: Option<String>) -> Result<Self> {
        let base_dir = Self::resolve_base_dir()?;
        log_debug!("[Config] Base directory: {}", base_dir.display());

        let file = Self::read_config_file(&base_dir.join("config.yaml"))?;
        let env_root = env::var(SDK_ROOT_ENV_VAR).ok().filter(|v| !v.trim().is_empty());
        if env_root.is_some() {
            log_debug!("[Config] Using {} for the managed root", SDK_ROOT_ENV_VAR.cyan());
        }

        Self::resolve(&base_dir, file, root_override, env_root)
    }

    /// Builds a configuration with default endpoints around an explicit managed root.
    pub fn with_root(sdk_root: impl Into<PathBuf>) -> Result<Self> {
        let sdk_root: PathBuf = sdk_root.into();
        let config = ManagerConfig {
            sdk_root: Self::absolute_root(&sdk_root)?,
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            platform: TargetPlatform::default(),
            system_locations: default_system_locations(),
            fallback_download_size: DEFAULT_FALLBACK_DOWNLOAD_SIZE,
        };
        config.ensure_sdk_root()?;
        Ok(config)
    }

    /// Merges the config file, the environment and the CLI override into a configuration.
    /// Kept separate from [`ManagerConfig::load`] so it can be exercised without touching
    /// the real environment.
    pub fn resolve(
        base_dir: &Path,
        file: ConfigFile,
        root_override: Option<String>,
        env_root: Option<String>,
    ) -> Result<Self> {
        let sdk_root = match root_override.or(env_root).or(file.sdk_root) {
            Some(raw) => expand_path(&raw),
            None => base_dir.join("sdk"),
        };
        let sdk_root = Self::absolute_root(&sdk_root)?;

        let platform = match (&file.os, &file.arch) {
            (None, None) => TargetPlatform::default(),
            (os, arch) => {
                let fallback = TargetPlatform::default();
                TargetPlatform::new(
                    os.as_deref().unwrap_or(&fallback.os),
                    arch.as_deref().unwrap_or(&fallback.arch),
                )
            }
        };

        let system_locations = match file.system_locations {
            Some(locations) => locations.iter().map(|l| expand_path(l)).collect(),
            None => default_system_locations(),
        };

        let fallback_download_size = match file.fallback_download_size {
            Some(0) => {
                return Err(GoSwitchError::Config(
                    "fallback_download_size must be greater than zero".to_string(),
                ));
            }
            Some(size) => size,
            None => DEFAULT_FALLBACK_DOWNLOAD_SIZE,
        };

        let config = ManagerConfig {
            sdk_root,
            catalog_url: file
                .catalog_url
                .unwrap_or_else(|| DEFAULT_CATALOG_URL.to_string()),
            download_base_url: file
                .download_base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_DOWNLOAD_BASE_URL.to_string()),
            platform,
            system_locations,
            fallback_download_size,
        };
        config.ensure_sdk_root()?;

        log_info!(
            "[Config] Managed root: {}",
            config.sdk_root.display().to_string().cyan()
        );
        log_debug!("[Config] Target platform: {}", config.platform);
        Ok(config)
    }

    /// Download URL of `version` for the configured platform.
    pub fn download_url(&self, version: &str) -> String {
        format!(
            "{}/{}",
            self.download_base_url,
            self.platform.archive_name(version)
        )
    }

    /// Determines the base directory: `GOSWITCH_HOME` or `~/.goswitch`.
    fn resolve_base_dir() -> Result<PathBuf> {
        if let Ok(env_path) = env::var(HOME_ENV_VAR) {
            if !env_path.trim().is_empty() {
                log_debug!("[Config] Using {}: {}", HOME_ENV_VAR, env_path.blue());
                return Ok(expand_path(&env_path));
            }
        }
        let home = dirs::home_dir().ok_or_else(|| {
            GoSwitchError::Config("could not determine the user's home directory".to_string())
        })?;
        Ok(home.join(".goswitch"))
    }

    /// Reads `config.yaml`. A missing file is the normal case and yields the defaults.
    fn read_config_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            log_debug!("[Config] No config file at {}, using defaults", path.display());
            return Ok(ConfigFile::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| GoSwitchError::io(format!("failed to read {}", path.display()), e))?;
        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            GoSwitchError::Config(format!("invalid YAML in {}: {e}", path.display()))
        })?;
        log_debug!("[Config] Loaded {}", path.display().to_string().green());
        Ok(file)
    }

    fn absolute_root(sdk_root: &Path) -> Result<PathBuf> {
        make_absolute(sdk_root).map_err(|e| {
            GoSwitchError::io(
                format!("failed to resolve managed root {}", sdk_root.display()),
                e,
            )
        })
    }

    fn ensure_sdk_root(&self) -> Result<()> {
        fs::create_dir_all(&self.sdk_root).map_err(|e| {
            GoSwitchError::io(
                format!("failed to create managed root {}", self.sdk_root.display()),
                e,
            )
        })
    }
}
