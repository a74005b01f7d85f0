//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where castview reads its configuration from and where it writes
//! trace files.

pub mod paths;

pub use paths::{default_config_path, expand_tilde, get_data_dir};
