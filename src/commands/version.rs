// Prints the version baked in at build time.

/// Version string from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run() {
    println!("goswitch {VERSION}");
}
