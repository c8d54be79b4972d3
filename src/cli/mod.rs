// Command-line argument definitions.
pub mod cmd_enums;
