use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] rmp_serde::encode::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] rmp_serde::decode::Error),

    #[error("Decompression error")]
    Decompression,

    #[error("Corrupted data")]
    Corrupted,

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("No archived record for match {match_id}")]
    RecordNotFound { match_id: String },

    #[error("Invalid match id: {match_id:?}")]
    InvalidMatchId { match_id: String },

    #[error("Match {match_id} is not complete")]
    MatchNotComplete { match_id: String },
}

impl ArchiveError {
    pub fn is_recoverable(&self) -> bool {
        match self {
            ArchiveError::Io(_) => true,
            ArchiveError::RecordNotFound { .. } => true,
            ArchiveError::MatchNotComplete { .. } => true,
            ArchiveError::InvalidMatchId { .. }
            | ArchiveError::Serialization(_)
            | ArchiveError::Deserialization(_)
            | ArchiveError::Decompression
            | ArchiveError::Corrupted
            | ArchiveError::ChecksumMismatch
            | ArchiveError::VersionMismatch { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_records_are_recoverable_corruption_is_not() {
        assert!(ArchiveError::RecordNotFound { match_id: "m1".into() }.is_recoverable());
        assert!(ArchiveError::MatchNotComplete { match_id: "m1".into() }.is_recoverable());
        assert!(!ArchiveError::ChecksumMismatch.is_recoverable());
        assert!(!ArchiveError::Decompression.is_recoverable());
        assert!(!ArchiveError::VersionMismatch { found: 9, expected: 2 }.is_recoverable());
    }
}
