// Target platform naming for go.dev archives.
//
// The download platform defaults to windows/amd64, matching the Windows-only environment
// switcher. The config file may override the pair; whatever the user writes is normalized
// to the names go.dev uses in its file names (`go1.22.0.windows-amd64.zip`).

use crate::log_warn;
use colored::Colorize;
use serde::Serialize;
use std::fmt;

/// Operating system / architecture pair as spelled in go.dev archive names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetPlatform {
    pub os: String,
    pub arch: String,
}

impl Default for TargetPlatform {
    fn default() -> Self {
        TargetPlatform {
            os: "windows".to_string(),
            arch: "amd64".to_string(),
        }
    }
}

impl TargetPlatform {
    /// Builds a platform from user-supplied names, normalizing common aliases.
    pub fn new(os: &str, arch: &str) -> Self {
        TargetPlatform {
            os: normalize_os(os),
            arch: normalize_arch(arch),
        }
    }

    /// File name of the archive for `version` on this platform.
    pub fn archive_name(&self, version: &str) -> String {
        format!("{version}.{}-{}.zip", self.os, self.arch)
    }
}

impl fmt::Display for TargetPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.arch)
    }
}

/// Normalizes an operating system name to go.dev's spelling.
///
/// # Arguments
/// * `os`: An OS name (e.g. "Windows", "win64", "macOS").
///
/// # Returns
/// * `String`: `windows`, `darwin` or `linux`; unknown values are lower-cased and kept.
pub fn normalize_os(os: &str) -> String {
    match os.trim().to_lowercase().as_str() {
        "windows" | "win32" | "win64" => "windows".to_string(),
        "macos" | "darwin" | "osx" => "darwin".to_string(),
        "linux" => "linux".to_string(),
        other => {
            log_warn!(
                "[Platform] Unknown OS '{}', using as-is. The archive URL may not exist.",
                other.purple()
            );
            other.to_string()
        }
    }
}

/// Normalizes a CPU architecture name to go.dev's spelling.
///
/// # Arguments
/// * `arch`: An architecture name (e.g. "x86_64", "aarch64").
///
/// # Returns
/// * `String`: `amd64`, `arm64` or `386`; unknown values are lower-cased and kept.
pub fn normalize_arch(arch: &str) -> String {
    match arch.trim().to_lowercase().as_str() {
        "amd64" | "x86_64" | "x64" => "amd64".to_string(),
        "arm64" | "aarch64" => "arm64".to_string(),
        "386" | "x86" | "i386" | "i686" => "386".to_string(),
        other => {
            log_warn!(
                "[Platform] Unknown architecture '{}', using as-is. The archive URL may not exist.",
                other.purple()
            );
            other.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_platform_is_windows_amd64() {
        let platform = TargetPlatform::default();
        assert_eq!(platform.archive_name("go1.22.0"), "go1.22.0.windows-amd64.zip");
        assert_eq!(platform.to_string(), "windows-amd64");
    }

    #[test]
    fn aliases_map_to_go_names() {
        let platform = TargetPlatform::new("macOS", "aarch64");
        assert_eq!(platform.os, "darwin");
        assert_eq!(platform.arch, "arm64");
        assert_eq!(normalize_arch("x86_64"), "amd64");
        assert_eq!(normalize_os("Win64"), "windows");
    }
}
