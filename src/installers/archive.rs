//! # Archive Installer
//!
//! Downloads a Go release archive from go.dev (or the configured mirror) and unpacks it into
//! the managed root as `<sdk_root>/<version>`.
//!
//! ## Installation Workflow
//!
//! 1. **Identifier Validation** - rejects names that could steer the URL or the destination
//! 2. **URL Construction** - `<download_base_url>/<version>.<os>-<arch>.zip`
//! 3. **Streaming Download** - body goes to a temp file through a progress counter
//! 4. **Replacement** - any previous `<sdk_root>/<version>` is removed
//! 5. **Extraction** - delegated to [`compression::extract_zip`]
//!
//! The operation is not atomic. If extraction fails after the old directory was removed,
//! the version is left half-installed and the caller has to retry the whole install. The
//! temp archive is deleted when it goes out of scope, on success and on failure.
//!
//! [`compression::extract_zip`]: crate::libs::utilities::compression::extract_zip

use crate::libs::utilities::compression::extract_zip;
use crate::libs::utilities::path_helpers::is_strict_descendant;
use crate::libs::utilities::progress::copy_with_progress;
use crate::schemas::errors::{GoSwitchError, Result};
use crate::schemas::manager_config::ManagerConfig;
use crate::{log_debug, log_info, log_warn};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Decides the progress denominator when the download does not declare its size.
///
/// Only affects percentage math; the bytes written are always the bytes received.
pub trait SizeEstimator {
    /// Second opinion on the archive size, typically a HEAD request.
    fn probe(&self, url: &str) -> Option<u64>;
    /// Last resort when nothing declared a size.
    fn fallback(&self) -> u64;
}

/// Probes with a HEAD request and falls back to a fixed estimate.
pub struct HeadProbeEstimator {
    agent: ureq::Agent,
    fallback: u64,
}

impl HeadProbeEstimator {
    pub fn new(agent: ureq::Agent, fallback: u64) -> Self {
        HeadProbeEstimator { agent, fallback }
    }
}

impl SizeEstimator for HeadProbeEstimator {
    fn probe(&self, url: &str) -> Option<u64> {
        match self.agent.head(url).call() {
            Ok(response) => content_length(&response),
            Err(e) => {
                log_debug!("[Installer] HEAD probe for {} failed: {}", url, e);
                None
            }
        }
    }

    fn fallback(&self) -> u64 {
        self.fallback
    }
}

/// Picks the progress total: declared length, then the estimator's probe, then its fallback.
pub fn resolve_total(declared: Option<u64>, url: &str, estimator: &dyn SizeEstimator) -> u64 {
    declared
        .filter(|n| *n > 0)
        .or_else(|| {
            log_debug!("[Installer] No Content-Length on download, probing size");
            estimator.probe(url).filter(|n| *n > 0)
        })
        .unwrap_or_else(|| {
            let fallback = estimator.fallback().max(1);
            log_warn!(
                "[Installer] Archive size unknown, progress is estimated against {} MiB",
                fallback / (1024 * 1024)
            );
            fallback
        })
}

/// Rejects version identifiers that contain traversal sequences, path separators or a drive
/// prefix.
///
/// The identifier ends up both in the download URL and in the destination directory name,
/// so `..\..\Windows`, `go1.22/../../x` or `C:evil` must never get through.
pub fn validate_version_identifier(version: &str) -> Result<()> {
    if version.trim().is_empty()
        || version.contains("..")
        || version.contains('/')
        || version.contains('\\')
        || version.contains(':')
    {
        return Err(GoSwitchError::InvalidVersion(version.to_string()));
    }
    Ok(())
}

/// Downloads and extracts `version` into the managed root.
///
/// # Arguments
/// * `config`: Managed root and download endpoint.
/// * `agent`: HTTP agent for the download.
/// * `estimator`: Size policy used when the response has no `Content-Length`.
/// * `version`: Release name as listed in the catalog (`go1.22.0`).
/// * `on_progress`: Called inline with strictly increasing whole percentages, ending at 100.
///
/// # Returns
/// * `Ok(PathBuf)` with the directory the archive was extracted into.
pub fn install<F: FnMut(u8)>(
    config: &ManagerConfig,
    agent: &ureq::Agent,
    estimator: &dyn SizeEstimator,
    version: &str,
    on_progress: F,
) -> Result<PathBuf> {
    validate_version_identifier(version)?;
    let dest = config.sdk_root.join(version);
    if !is_strict_descendant(&dest, &config.sdk_root) {
        return Err(GoSwitchError::OutsideManagedRoot {
            path: dest,
            root: config.sdk_root.clone(),
        });
    }

    let url = config.download_url(version);
    log_info!(
        "[Installer] Downloading {} from {}",
        version.bold(),
        url.blue()
    );

    let response = agent
        .get(&url)
        .call()
        .map_err(|e| GoSwitchError::http(&url, e))?;
    let total = resolve_total(content_length(&response), &url, estimator);
    log_debug!("[Installer] {}: expecting {} bytes", version, total);

    let mut archive = tempfile::Builder::new()
        .prefix(&format!("{version}-"))
        .suffix(".zip")
        .tempfile()
        .map_err(|e| GoSwitchError::io("failed to create temporary download file", e))?;

    let bytes = copy_with_progress(response.into_reader(), archive.as_file_mut(), total, on_progress)
        .map_err(|e| GoSwitchError::io(format!("failed to download {url}"), e))?;
    log_debug!(
        "[Installer] Downloaded {} bytes to {}",
        bytes,
        archive.path().display()
    );

    if dest.exists() {
        log_warn!(
            "[Installer] Replacing existing installation at {}",
            dest.display().to_string().yellow()
        );
        fs::remove_dir_all(&dest)
            .map_err(|e| GoSwitchError::io(format!("failed to remove {}", dest.display()), e))?;
    }

    let files = extract_zip(archive.path(), &dest)?;
    log_info!(
        "[Installer] Installed {} ({} files) at {}",
        version.bold().green(),
        files,
        dest.display().to_string().green()
    );
    Ok(dest)
}

/// Declared `Content-Length` of a response, if any.
fn content_length(response: &ureq::Response) -> Option<u64> {
    response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
}
