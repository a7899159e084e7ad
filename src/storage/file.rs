//! File-per-key backend with atomic writes

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use super::backend::KeyValueStore;

const VALUE_EXTENSION: &str = ".json";
const TEMP_SUFFIX: &str = ".tmp";

// Keys map to file names; keep the common key characters readable
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Stores each key as `<dir>/<percent-encoded key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if missing) a store rooted at `dir`
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).with_context(|| {
                format!("Failed to create data directory: {}", dir.display())
            })?;
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", encode_key(key), VALUE_EXTENSION))
    }
}

fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

fn decode_key(file_name: &str) -> Option<String> {
    let encoded = file_name.strip_suffix(VALUE_EXTENSION)?;
    percent_decode_str(encoded).decode_utf8().ok().map(|key| key.into_owned())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Write atomically (temp file + rename)
        let path = self.path_for(key);
        let temp = self.dir.join(format!("{}{}{}", encode_key(key), VALUE_EXTENSION, TEMP_SUFFIX));
        fs::write(&temp, value)
            .with_context(|| format!("Failed to write temp file {}", temp.display()))?;
        fs::rename(&temp, &path)
            .with_context(|| format!("Failed to rename temp file to {}", path.display()))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let read_dir = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list data directory: {}", self.dir.display()))?;

        let mut keys = Vec::new();
        for dir_entry in read_dir {
            let dir_entry = dir_entry.context("Failed to read data directory entry")?;
            if !dir_entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if let Some(key) = dir_entry.file_name().to_str().and_then(decode_key) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}
