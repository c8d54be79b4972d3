// This file implements the crate's logging system.
// It provides macros for the four log levels (INFO, WARN, ERROR, DEBUG) and a global
// switch that decides whether DEBUG lines are printed. Everything goes to stderr so that
// command output (tables, version lists) on stdout stays clean for piping.

use std::sync::OnceLock; // Ensures the DEBUG_ENABLED flag is initialized exactly once.
use std::sync::atomic::{AtomicBool, Ordering}; // Thread-safe control of the debug flag.

/// Provides convenient logging macros.
/// `#[macro_export]` makes these macros available as `goswitch::log_info!` etc, and as
/// `crate::log_info!` inside the library itself.

// `log_info!` for general progress and informational messages.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => (eprintln!("{} {}", ::colored::Colorize::bright_green("[INFO]"), format!($($arg)*)));
}

// `log_warn!` for non-critical issues or noteworthy conditions.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => (eprintln!("{} {}", ::colored::Colorize::bright_yellow("[WARN]"), format!($($arg)*)));
}

// `log_error!` for failures the user has to act on.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => (eprintln!("{} {}", ::colored::Colorize::bright_red("[ERROR]"), format!($($arg)*)));
}

// `log_debug!` for detailed internal tracing.
// Messages are only printed if debug mode is enabled via `is_debug_enabled()`.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logger::is_debug_enabled() {
           eprintln!("{} {}", ::colored::Colorize::dimmed("[DEBUG]"), format!($($arg)*));
        }
    };
}

// Global flag to control debug logging, ensured to be initialized once.
static DEBUG_ENABLED: OnceLock<AtomicBool> = OnceLock::new();

/// Initializes the logger, setting the global debug mode.
/// This function should be called once at application startup.
///
/// # Arguments
/// * `debug`: If `true`, enables debug logging; otherwise only info, warn and error messages are printed.
pub fn init(debug: bool) {
    DEBUG_ENABLED
        .get_or_init(|| AtomicBool::new(debug))
        .store(debug, Ordering::Relaxed);

    log_debug!("Logger initialized in DEBUG mode");
}

/// Checks if debug logging is currently enabled.
/// Used by the `log_debug!` macro.
///
/// # Returns
/// * `true` if debug logging is enabled, `false` otherwise (including when `init` was never called).
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED
        .get()
        .map(|f| f.load(Ordering::Relaxed))
        .unwrap_or(false)
}
