//! Scorecard export shapes.
//!
//! These are the JSON-serializable output of the scorecard generator
//! (`engine::scorecard::generate_scorecard`). Every collection is a `Vec` in
//! a fixed order so that serializing the same match state twice yields
//! identical bytes.

use super::{BattingStatus, ExtrasBreakdown, TossDecision};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Scorecard {
    pub match_info: MatchInfo,
    pub innings: Vec<InningsScorecard>,
    /// Present once the match is complete.
    pub result: Option<MatchOutcome>,
}

impl Scorecard {
    /// JSON schema of the export, for downstream contract checks.
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(Scorecard)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn innings(&self, number: u8) -> Option<&InningsScorecard> {
        self.innings.iter().find(|i| i.number == number)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    InProgress,
    InningsBreak,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub match_id: String,
    pub team1: String,
    pub team2: String,
    pub venue: String,
    pub format: String,
    pub over_limit: u32,
    pub toss_winner: String,
    pub toss_decision: TossDecision,
    /// ISO-8601 calendar date.
    pub date: String,
    pub status: MatchStatus,
    pub current_innings: u8,
    pub target: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InningsScorecard {
    pub number: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: String,
    pub extras: u32,
    pub extras_breakdown: ExtrasBreakdown,
    pub run_rate: f64,
    /// Batsmen who came to the crease, in batting order.
    pub batting_stats: Vec<BattingRow>,
    /// Names of players who did not come to the crease, in roster order.
    pub did_not_bat: Vec<String>,
    /// Bowlers with at least one legal delivery, in roster order.
    pub bowling_stats: Vec<BowlingRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BattingRow {
    pub player_id: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub status: BattingStatus,
    pub batting_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BowlingRow {
    pub player_id: String,
    pub name: String,
    pub overs: String,
    pub balls: u32,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    /// Team name, or `"Tie"`.
    pub winning_team: String,
    /// `"Tie"`, `"<n> wickets"` or `"<n> runs"`.
    pub margin: String,
}
