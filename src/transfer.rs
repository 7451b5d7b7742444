//! Profile import/export
//!
//! File interchange format: a UTF-8 JSON array of profiles, the same shape
//! the preference store persists. The merge policy is always chosen by the
//! caller; nothing here deduplicates imported profiles.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::profile::SocksProfile;

/// How imported profiles are reconciled with the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Discard existing profiles and adopt the imported list. Requires at
    /// least one imported profile; the first becomes active.
    Replace,
    /// Append imported profiles to the existing list. With
    /// `fresh_ids = false` ids are taken verbatim and collisions coexist
    /// (id lookup is first-match); with `fresh_ids = true` every imported
    /// profile gets a new id.
    Merge { fresh_ids: bool },
}

/// Serialize profiles to the interchange format
pub fn serialize_profiles(profiles: &[SocksProfile]) -> Result<String> {
    Ok(serde_json::to_string_pretty(profiles)?)
}

/// Parse the interchange format. Malformed input is a format error; an
/// empty or absent (`null`) list parses to an empty list and the caller
/// decides how to message "nothing found".
pub fn parse_profiles(contents: &str) -> Result<Vec<SocksProfile>> {
    let parsed: Option<Vec<SocksProfile>> = serde_json::from_str(contents)?;
    Ok(parsed.unwrap_or_default())
}

pub fn export_to_path(path: &Path, profiles: &[SocksProfile]) -> Result<()> {
    let contents = serialize_profiles(profiles)?;
    fs::write(path, contents).map_err(|e| Error::io(path.display().to_string(), e))
}

pub fn import_from_path(path: &Path) -> Result<Vec<SocksProfile>> {
    let contents =
        fs::read_to_string(path).map_err(|e| Error::io(path.display().to_string(), e))?;
    parse_profiles(&contents)
}
