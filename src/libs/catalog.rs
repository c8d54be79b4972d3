// Remote catalog client.
//
// go.dev publishes every release (including release candidates and betas when
// `include=all` is passed) as a JSON array of `{version, stable, files}` records.
// The upstream `stable` flag is decoded and then thrown away: stability is reclassified
// locally from the version string, so a release is only offered as stable when its name
// carries no pre-release marker. This is an intentional policy, not a passthrough.

use crate::schemas::errors::{GoSwitchError, Result};
use crate::schemas::versions::{CatalogEntry, RemoteRelease};
use crate::{log_debug, log_info};
use colored::Colorize;
use std::io::Read;

/// Substrings marking a pre-release build in a Go version string.
pub const PRE_RELEASE_MARKERS: [&str; 2] = ["rc", "beta"];

/// Fetches the full release history from `url`.
///
/// Issues exactly one request; there is no retry and no partial result.
///
/// # Errors
/// * `GoSwitchError::Http` when the request fails or the server answers with an error status.
/// * `GoSwitchError::CatalogDecode` when the body is not the expected JSON.
pub fn fetch_remote_catalog(agent: &ureq::Agent, url: &str) -> Result<Vec<RemoteRelease>> {
    log_debug!("[Catalog] Fetching release index from {}", url.blue());

    let response = agent
        .get(url)
        .call()
        .map_err(|e| GoSwitchError::http(url, e))?;

    let releases = parse_catalog(response.into_reader())?;
    log_info!(
        "[Catalog] {} releases available ({} stable)",
        releases.len().to_string().bold(),
        releases.iter().filter(|r| r.stable).count()
    );
    Ok(releases)
}

/// Decodes a catalog body and reclassifies every entry's stability.
pub fn parse_catalog(reader: impl Read) -> Result<Vec<RemoteRelease>> {
    let entries: Vec<CatalogEntry> = serde_json::from_reader(reader)?;
    Ok(entries
        .into_iter()
        .map(|entry| RemoteRelease {
            stable: is_stable_version(&entry.version),
            version: entry.version,
        })
        .collect())
}

/// `true` when `version` carries none of the [`PRE_RELEASE_MARKERS`].
pub fn is_stable_version(version: &str) -> bool {
    !PRE_RELEASE_MARKERS
        .iter()
        .any(|marker| version.contains(marker))
}
