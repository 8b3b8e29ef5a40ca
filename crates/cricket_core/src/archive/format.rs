use super::error::ArchiveError;
use super::ARCHIVE_VERSION;
use crate::models::MatchSummaryRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use rmp_serde::{from_slice, to_vec_named};
use sha2::{Digest, Sha256};

const CHECKSUM_LEN: usize = 32;

/// On-disk envelope around a finished match summary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArchivedMatch {
    /// Archive format version for migration
    pub version: u32,
    pub archived_at: DateTime<Utc>,
    pub summary: MatchSummaryRecord,
}

impl ArchivedMatch {
    pub fn new(summary: MatchSummaryRecord) -> Self {
        Self { version: ARCHIVE_VERSION, archived_at: Utc::now(), summary }
    }

    pub fn validate(&self) -> Result<(), ArchiveError> {
        if self.summary.id.trim().is_empty() {
            return Err(ArchiveError::InvalidMatchId { match_id: self.summary.id.clone() });
        }
        if self.summary.innings.len() > 2 {
            return Err(ArchiveError::Corrupted);
        }
        Ok(())
    }
}

/// MessagePack (named fields) → LZ4 with prepended size → SHA-256 trailer.
pub fn encode_archive(archive: &ArchivedMatch) -> Result<Vec<u8>, ArchiveError> {
    archive.validate()?;

    let msgpack = to_vec_named(archive)?;
    let compressed = compress_prepend_size(&msgpack);

    let mut hasher = Sha256::new();
    hasher.update(&compressed);
    let checksum = hasher.finalize();

    let mut bytes = compressed;
    bytes.extend_from_slice(&checksum);
    Ok(bytes)
}

pub fn decode_archive(bytes: &[u8]) -> Result<ArchivedMatch, ArchiveError> {
    // size header + checksum
    if bytes.len() < 4 + CHECKSUM_LEN {
        return Err(ArchiveError::Corrupted);
    }

    let (payload, checksum) = bytes.split_at(bytes.len() - CHECKSUM_LEN);

    let mut hasher = Sha256::new();
    hasher.update(payload);
    if hasher.finalize().as_slice() != checksum {
        return Err(ArchiveError::ChecksumMismatch);
    }

    let msgpack = decompress_size_prepended(payload).map_err(|_| ArchiveError::Decompression)?;
    let archive: ArchivedMatch = from_slice(&msgpack)?;

    if archive.version > ARCHIVE_VERSION {
        return Err(ArchiveError::VersionMismatch {
            found: archive.version,
            expected: ARCHIVE_VERSION,
        });
    }

    Ok(archive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::completed_engine;

    fn archive() -> ArchivedMatch {
        ArchivedMatch::new(MatchSummaryRecord::from_engine(&completed_engine()))
    }

    #[test]
    fn test_encode_decode_keeps_summary() {
        let original = archive();
        let decoded = decode_archive(&encode_archive(&original).unwrap()).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.summary.result.winning_team.as_deref(), Some("Team B"));
    }

    #[test]
    fn test_checksum_validation() {
        let mut bytes = encode_archive(&archive()).unwrap();
        if let Some(last) = bytes.last_mut() {
            *last = last.wrapping_add(1);
        }
        assert!(matches!(decode_archive(&bytes), Err(ArchiveError::ChecksumMismatch)));
    }

    #[test]
    fn test_truncated_input_is_corrupted() {
        assert!(matches!(decode_archive(&[0u8; 10]), Err(ArchiveError::Corrupted)));
    }

    #[test]
    fn test_future_version_rejected() {
        let mut future = archive();
        future.version = ARCHIVE_VERSION + 1;
        let bytes = encode_archive(&future).unwrap();
        assert!(matches!(
            decode_archive(&bytes),
            Err(ArchiveError::VersionMismatch { found, .. }) if found == ARCHIVE_VERSION + 1
        ));
    }
}
