// Data model shared by the core and whatever presentation layer sits on top of it.
// Both structs are built fresh on every query and never persisted, so they derive
// `Serialize` only for handing them over to a UI or printing them as JSON.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One discovered Go installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledVersion {
    /// Managed directory name (`go1.22.0`), the `VERSION` marker of a system install,
    /// the directory base name, or `"System"` when nothing better is known.
    pub name: String,
    /// The install root, i.e. the directory that directly contains `bin`.
    pub path: PathBuf,
    /// `true` when `path` is the current `GOROOT` (case-insensitive, normalized).
    pub active: bool,
}

/// One entry of the go.dev release catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteRelease {
    /// Version string exactly as published (`go1.22.0`, `go1.23rc1`).
    pub version: String,
    /// Recomputed locally from the version string, see `catalog::is_stable_version`.
    pub stable: bool,
}

/// Raw catalog record as go.dev publishes it. Extra fields (`files`, ...) are ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct CatalogEntry {
    pub(crate) version: String,
    // Decoded but never trusted: stability is reclassified from the version string.
    #[serde(default)]
    #[allow(dead_code)]
    pub(crate) stable: bool,
}
