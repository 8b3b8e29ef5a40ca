pub mod events;
pub mod innings;
pub mod match_setup;
pub mod match_summary;
pub mod player;
pub mod scorecard;
pub mod stats;
pub mod team;

pub use events::{DismissalType, ExtraType, MatchEvent};
pub use innings::{ExtrasBreakdown, Innings};
pub use match_setup::{MatchSetup, TeamSide, Toss, TossDecision};
pub use match_summary::{
    select_player_of_match, InningsTotals, MatchSummaryRecord, SummaryBatting, SummaryBowling,
    SummaryResult, SummaryTeams, TeamTotals,
};
pub use player::{Player, PlayerId, PlayerRole};
pub use scorecard::{
    BattingRow, BowlingRow, InningsScorecard, MatchInfo, MatchOutcome, MatchStatus, Scorecard,
};
pub use stats::{BattingStat, BattingStatus, BowlingStat};
pub use team::Team;
