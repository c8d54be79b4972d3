// Data shapes shared across the crate: errors, configuration and version records.

pub mod errors;
pub mod manager_config;
pub mod versions;
