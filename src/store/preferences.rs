//! Key/value preference store
//!
//! The seam the profile store persists through. The file-backed
//! implementation keeps a JSON object on disk and writes it through on
//! every set, so the three store keys are persisted independently.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{Error, Result};

pub trait Preferences {
    fn get_string(&self, key: &str) -> Option<String>;
    fn get_bool(&self, key: &str) -> Option<bool>;
    fn set_string(&mut self, key: &str, value: &str) -> Result<()>;
    fn set_bool(&mut self, key: &str, value: bool) -> Result<()>;
}

/// JSON-object file in the user config dir
pub struct FilePreferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl FilePreferences {
    /// Default location: `<config_dir>/quicksocks/preferences.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::prefs::APP_DIR);
        path.push(crate::constants::prefs::FILENAME);
        path
    }

    /// Open the store at `path`, reading existing values if present.
    /// A missing or unreadable file degrades to an empty store.
    pub fn open(path: &Path) -> Self {
        let values = match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<Map<String, Value>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse preference file, starting empty");
                    Map::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read preference file, starting empty");
                Map::new()
            }
        };

        Self {
            path: path.to_path_buf(),
            values,
        }
    }

    fn write_through(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(parent.display().to_string(), e))?;
        }
        let contents = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, contents)
            .map_err(|e| Error::io(self.path.display().to_string(), e))
    }
}

impl Preferences for FilePreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        self.write_through()
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), Value::Bool(value));
        self.write_through()
    }
}

/// In-memory store for tests
#[derive(Default)]
pub struct MemoryPreferences {
    values: Map<String, Value>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn get_string(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<()> {
        self.values
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }

    fn set_bool(&mut self, key: &str, value: bool) -> Result<()> {
        self.values.insert(key.to_string(), Value::Bool(value));
        Ok(())
    }
}
