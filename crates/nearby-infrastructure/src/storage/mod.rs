//! Storage layer: atomic file writes and best-effort JSON reads.

mod atomic_toml;
mod json_file;

pub use atomic_toml::{AtomicTomlError, AtomicTomlFile};
pub use json_file::read_json_file;
