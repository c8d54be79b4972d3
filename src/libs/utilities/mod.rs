// This is the main module file for the `utilities` directory.
// Small, dependency-light helpers shared by the core `libs` modules.

// Path keys, lexical cleaning and `~`/`$VAR` expansion.
pub mod path_helpers;
// Zip extraction with entry validation.
pub mod compression;
// OS/architecture naming used in archive file names.
pub mod platform;
// Byte counting and percentage reporting for downloads.
pub mod progress;
