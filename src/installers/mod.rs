// Installation back ends. Go releases are only ever installed from the official zip
// archives, so `archive` is the single installer.

/// Downloads a release archive with progress reporting and unpacks it into the
/// managed root.
pub mod archive;
