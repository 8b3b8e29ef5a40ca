//! Where finished match summaries go.

use super::error::ArchiveError;
use super::manager::ArchiveManager;
use crate::engine::MatchEngine;
use crate::models::MatchSummaryRecord;

pub trait SummarySink {
    fn store(&mut self, record: &MatchSummaryRecord) -> Result<(), ArchiveError>;
}

/// Keeps records in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Vec<MatchSummaryRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MatchSummaryRecord] {
        &self.records
    }
}

impl SummarySink for MemorySink {
    fn store(&mut self, record: &MatchSummaryRecord) -> Result<(), ArchiveError> {
        self.records.push(record.clone());
        Ok(())
    }
}

impl SummarySink for ArchiveManager {
    fn store(&mut self, record: &MatchSummaryRecord) -> Result<(), ArchiveError> {
        ArchiveManager::store(self, record).map(|_| ())
    }
}

/// Build the summary of a completed match and hand it to `sink`.
pub fn finalize_match(
    engine: &MatchEngine,
    sink: &mut dyn SummarySink,
) -> Result<MatchSummaryRecord, ArchiveError> {
    if !engine.phase().is_terminal() {
        return Err(ArchiveError::MatchNotComplete { match_id: engine.id().to_string() });
    }

    let record = MatchSummaryRecord::from_engine(engine);
    sink.store(&record)?;
    log::info!(
        "Finalized match {}: {} ({})",
        record.id,
        record.result.winning_team.as_deref().unwrap_or("no result"),
        record.result.margin.as_deref().unwrap_or("-")
    );
    Ok(record)
}
