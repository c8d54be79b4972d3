//! # Error Types
//!
//! Every core operation (`list_installed`, `fetch_remote_catalog`, `install`, `switch`,
//! `uninstall`) returns a single [`GoSwitchError`] on failure. The messages are written to
//! be shown to the user verbatim; no operation retries and no failure is fatal to the
//! process.
//!
//! ## Error Categories
//! - **Validation**: malformed version identifiers, missing targets, scoping violations,
//!   archive entries escaping the destination
//! - **Permission**: the machine environment needs elevated rights
//! - **I/O**: network, disk, archive and environment store failures
//!
//! Failures between the steps of an install (download succeeded, extraction failed) or a
//! switch (GOROOT written, Path write failed) leave partial state behind. That hazard is
//! documented on the operations rather than modelled as its own variant.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used across the library.
pub type Result<T> = std::result::Result<T, GoSwitchError>;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Error)]
pub enum GoSwitchError {
    /// The version identifier contains traversal or separator characters (or is empty).
    #[error("invalid version name: '{0}'")]
    InvalidVersion(String),

    /// The resolved install directory does not exist.
    #[error("version path not found: {}", .0.display())]
    VersionNotFound(PathBuf),

    /// An uninstall target resolved outside the managed root.
    #[error("can only uninstall managed versions in {}: refusing to remove {}", root.display(), path.display())]
    OutsideManagedRoot { path: PathBuf, root: PathBuf },

    /// An archive entry would be written outside the extraction destination (zip-slip).
    #[error("illegal file path in archive: {entry} (resolves outside {})", dest.display())]
    UnsafeArchiveEntry { entry: String, dest: PathBuf },

    /// The machine-wide environment store could not be opened for writing.
    #[error("failed to open the system environment (run as Administrator?): {source}")]
    ElevationRequired {
        #[source]
        source: io::Error,
    },

    /// Reading or writing a variable in the environment store failed.
    #[error("failed to {action}: {source}")]
    Environment {
        action: String,
        #[source]
        source: io::Error,
    },

    /// The persistent environment store is not available on this platform.
    #[error("{0}")]
    Unsupported(String),

    /// A request to go.dev (or the configured mirror) failed.
    #[error("request to {url} failed: {message}")]
    Http { url: String, message: String },

    /// The release catalog could not be decoded.
    #[error("failed to decode release catalog: {0}")]
    CatalogDecode(#[from] serde_json::Error),

    /// The downloaded archive is corrupt or unreadable.
    #[error("failed to read archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Filesystem failure, with a short description of what was being done.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// The configuration could not be resolved.
    #[error("configuration error: {0}")]
    Config(String),
}

impl GoSwitchError {
    /// Wraps an `io::Error` with a description of the failed operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        GoSwitchError::Io {
            context: context.into(),
            source,
        }
    }

    /// Wraps a `ureq` failure. Status errors keep the HTTP code in the message.
    pub fn http(url: &str, err: ureq::Error) -> Self {
        let message = match err {
            ureq::Error::Status(code, _) => format!("server answered with HTTP {code}"),
            ureq::Error::Transport(transport) => transport.to_string(),
        };
        GoSwitchError::Http {
            url: url.to_string(),
            message,
        }
    }

    /// `true` when the failure can be fixed by re-running with elevated rights.
    pub fn requires_elevation(&self) -> bool {
        matches!(self, GoSwitchError::ElevationRequired { .. })
    }
}
