use super::error::ArchiveError;
use super::format::{decode_archive, encode_archive, ArchivedMatch};
use super::migration::migrate_archive;
use crate::models::MatchSummaryRecord;

use std::fs::{self, remove_file, rename, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const ARCHIVE_EXTENSION: &str = "match";

/// File-backed archive of finished matches, one file per match id.
#[derive(Debug, Clone)]
pub struct ArchiveManager {
    root: PathBuf,
}

impl ArchiveManager {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write (or overwrite) the archive for `summary.id`.
    pub fn store(&self, summary: &MatchSummaryRecord) -> Result<PathBuf, ArchiveError> {
        let path = self.path_for(&summary.id)?;
        Self::save_to_path(&path, &ArchivedMatch::new(summary.clone()))?;
        log::info!("Archived match {}", summary.id);
        Ok(path)
    }

    pub fn load(&self, match_id: &str) -> Result<MatchSummaryRecord, ArchiveError> {
        let path = self.path_for(match_id)?;
        if !path.exists() {
            return Err(ArchiveError::RecordNotFound { match_id: match_id.to_string() });
        }
        Ok(Self::load_from_path(&path)?.summary)
    }

    pub fn exists(&self, match_id: &str) -> bool {
        self.path_for(match_id).map(|p| p.exists()).unwrap_or(false)
    }

    pub fn delete(&self, match_id: &str) -> Result<(), ArchiveError> {
        let path = self.path_for(match_id)?;
        if path.exists() {
            remove_file(&path)?;
            log::info!("Deleted archive for match {}", match_id);
        }
        Ok(())
    }

    /// Ids of every archived match, sorted.
    pub fn list_ids(&self) -> Result<Vec<String>, ArchiveError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(ARCHIVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                ids.push(stem.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn path_for(&self, match_id: &str) -> Result<PathBuf, ArchiveError> {
        validate_match_id(match_id)?;
        Ok(self.root.join(format!("{match_id}.{ARCHIVE_EXTENSION}")))
    }

    fn save_to_path(path: &Path, archive: &ArchivedMatch) -> Result<(), ArchiveError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = encode_archive(archive)?;

        // Atomic save: write to temp file, then rename
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&data)?;
            file.flush()?;
            file.sync_all()?;
        }
        rename(&temp_path, path)?;

        log::debug!("Saved {} bytes to {:?}", data.len(), path);
        Ok(())
    }

    fn load_from_path(path: &Path) -> Result<ArchivedMatch, ArchiveError> {
        let data = fs::read(path)?;
        let archive = migrate_archive(decode_archive(&data)?)?;
        log::debug!("Loaded {} bytes from {:?}", data.len(), path);
        Ok(archive)
    }
}

/// Ids become file names: ASCII letters, digits, `-` and `_` only.
fn validate_match_id(match_id: &str) -> Result<(), ArchiveError> {
    let valid = !match_id.is_empty()
        && match_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ArchiveError::InvalidMatchId { match_id: match_id.to_string() })
    }
}
