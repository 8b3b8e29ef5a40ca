use serde::{Deserialize, Serialize};

/// Match lifecycle. Exactly one phase holds at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchPhase {
    /// No striker or non-striker at the crease yet.
    AwaitingOpeners,
    /// Openers chosen; the first bowler of the innings is needed.
    AwaitingOpeningBowler,
    /// Deliveries are being recorded.
    InProgress,
    /// A wicket fell without an inline replacement. When `then_bowler` is
    /// set the same ball also ended the over.
    AwaitingNewBatsman { then_bowler: bool },
    /// An over ended; the next bowler is needed.
    AwaitingNextBowler,
    /// First innings over, target fixed.
    InningsBreak,
    /// Terminal.
    MatchComplete,
}

impl MatchPhase {
    pub fn name(&self) -> &'static str {
        match self {
            MatchPhase::AwaitingOpeners => "awaiting openers",
            MatchPhase::AwaitingOpeningBowler => "awaiting opening bowler",
            MatchPhase::InProgress => "in progress",
            MatchPhase::AwaitingNewBatsman { .. } => "awaiting new batsman",
            MatchPhase::AwaitingNextBowler => "awaiting next bowler",
            MatchPhase::InningsBreak => "at the innings break",
            MatchPhase::MatchComplete => "match complete",
        }
    }

    pub fn accepts_deliveries(&self) -> bool {
        matches!(self, MatchPhase::InProgress)
    }

    /// An innings is under way (possibly paused for a selection).
    pub fn is_live(&self) -> bool {
        matches!(
            self,
            MatchPhase::InProgress
                | MatchPhase::AwaitingNewBatsman { .. }
                | MatchPhase::AwaitingNextBowler
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchPhase::MatchComplete)
    }
}

/// What the caller has to do next after a command succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum EngineSignal {
    /// Keep recording deliveries.
    Continue,
    SelectOpeners,
    SelectBowler,
    SelectNewBatsman,
    InningsComplete { target: u32 },
    MatchComplete { winner: String },
}
