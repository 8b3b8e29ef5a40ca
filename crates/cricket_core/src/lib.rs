//! # cricket_core - Live Cricket Scoring Engine
//!
//! This library scores a limited-overs cricket match ball by ball: it
//! tracks the crease, bowling changes and both innings, decides the result
//! and exports scorecards and match summaries.
//!
//! ## Features
//! - Explicit match state machine; every command applies fully or not at all
//! - Batting, bowling and extras books that always balance
//! - Deterministic scorecard export with a JSON schema
//! - Compressed, checksummed archive of finished matches
//! - JSON API for thin presentation layers

pub mod api;
pub mod archive;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main API functions
pub use api::{apply_command_json, create_match_json, replay_match_json, scorecard_json};
pub use error::{Result, ScoringError};

// Re-export engine
pub use engine::{
    generate_highlights, generate_scorecard, EngineSignal, Highlight, MatchEngine, MatchPhase,
    MatchSnapshot, ScoringCommand,
};

// Re-export models
pub use models::{
    DismissalType, ExtraType, MatchOutcome, MatchSetup, MatchSummaryRecord, Player, PlayerRole,
    Scorecard, Team, TeamSide, Toss, TossDecision,
};

// Re-export configuration
pub use config::{config_from_env, ScoringConfig};

// Re-export archive
pub use archive::{finalize_match, ArchiveError, ArchiveManager, MemorySink, SummarySink};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
