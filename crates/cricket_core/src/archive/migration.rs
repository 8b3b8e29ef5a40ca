use super::error::ArchiveError;
use super::format::ArchivedMatch;
use super::ARCHIVE_VERSION;
use crate::models::{select_player_of_match, MatchStatus};

/// Bring an archived match up to the current format version.
pub fn migrate_archive(mut archive: ArchivedMatch) -> Result<ArchivedMatch, ArchiveError> {
    let original_version = archive.version;

    archive = match archive.version {
        1 => migrate_v1_to_v2(archive),
        ARCHIVE_VERSION => archive,
        found => {
            return Err(ArchiveError::VersionMismatch { found, expected: ARCHIVE_VERSION });
        }
    };
    archive.version = ARCHIVE_VERSION;

    if original_version != ARCHIVE_VERSION {
        log::info!(
            "Migrated archive {} from version {} to {}",
            archive.summary.id,
            original_version,
            ARCHIVE_VERSION
        );
    }

    Ok(archive)
}

/// Version 1 records were written before the player of the match was derived.
fn migrate_v1_to_v2(mut archive: ArchivedMatch) -> ArchivedMatch {
    let summary = &mut archive.summary;
    if summary.result.player_of_match.is_none() && summary.result.status == MatchStatus::Completed {
        summary.result.player_of_match =
            select_player_of_match(&summary.batting_stats, &summary.bowling_stats);
        log::debug!(
            "Derived player of the match for {}: {:?}",
            summary.id,
            summary.result.player_of_match
        );
    }
    archive
}

pub fn needs_migration(archive: &ArchivedMatch) -> bool {
    archive.version < ARCHIVE_VERSION
}
