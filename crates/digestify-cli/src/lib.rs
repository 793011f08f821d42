//! Digestify CLI - sign files with an HMAC trailer and verify them
//!
//! The binary is a thin shell over `digestify-core`: it resolves settings
//! from flags and an optional config file, prompts for the shared secret and
//! maps verification outcomes onto distinct exit codes.

pub mod commands;
pub mod prompt;
pub mod status;

pub use commands::{execute, init_logging, resolve_config, usage_status, Cli};
pub use status::Status;
