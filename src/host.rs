//! Host application boundary
//!
//! The settings-import mechanism the applier submits documents to. The
//! file-backed implementation drops the document where the host picks it
//! up; tests substitute their own implementations.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub trait HostBoundary {
    /// Submit a configuration document to the host. Blocking; either
    /// completes or fails.
    fn submit_configuration_document(&self, document: &str) -> Result<()>;

    /// Read-only snapshot of the host's current configuration, for
    /// diagnostics.
    fn export_current_configuration(&self) -> Result<String>;
}

/// Boundary that exchanges documents through a settings-import file
pub struct FileHostBoundary {
    path: PathBuf,
}

impl FileHostBoundary {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Default location: `<config_dir>/quicksocks/user_options.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(crate::constants::prefs::APP_DIR);
        path.push(crate::constants::host::IMPORT_FILENAME);
        path
    }
}

impl HostBoundary for FileHostBoundary {
    fn submit_configuration_document(&self, document: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }
        fs::write(&self.path, document)
            .with_context(|| format!("Failed to write settings import file {:?}", self.path))?;
        debug!(path = %self.path.display(), "Submitted configuration document");
        Ok(())
    }

    fn export_current_configuration(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings import file {:?}", self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_then_export_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let boundary = FileHostBoundary::new(&dir.path().join("user_options.json"));

        boundary
            .submit_configuration_document("{\"user_options\":{}}")
            .unwrap();
        let snapshot = boundary.export_current_configuration().unwrap();
        assert_eq!(snapshot, "{\"user_options\":{}}");
    }

    #[test]
    fn test_export_without_submission_fails() {
        let dir = tempfile::tempdir().unwrap();
        let boundary = FileHostBoundary::new(&dir.path().join("missing.json"));
        assert!(boundary.export_current_configuration().is_err());
    }
}
