//! Durable key/value storage backing the analysis history
//!
//! The history store talks to a [`KeyValueStore`] rather than a concrete medium:
//! - [`MemoryStore`]: in-process map, used by tests and benches
//! - [`FileStore`]: one JSON file per key inside a data directory
//!
//! Default data location: platform-specific data directories
//! - macOS: `~/Library/Application Support/contractiq/`
//! - Linux: `~/.local/share/contractiq/`
//! - Windows: `%APPDATA%\contractiq\`

pub mod backend;
pub mod file;

pub use backend::{KeyValueStore, MemoryStore};
pub use file::FileStore;
