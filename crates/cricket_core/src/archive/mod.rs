// Match archive: finished match summaries on disk.
// MessagePack + LZ4 compression with versioning and integrity checks

pub mod error;
pub mod format;
pub mod manager;
pub mod migration;
pub mod sink;

pub use error::ArchiveError;
pub use format::{decode_archive, encode_archive, ArchivedMatch};
pub use manager::ArchiveManager;
pub use migration::migrate_archive;
pub use sink::{finalize_match, MemorySink, SummarySink};

pub const ARCHIVE_VERSION: u32 = 2;
