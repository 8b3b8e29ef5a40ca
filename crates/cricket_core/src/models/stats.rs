use super::{DismissalType, PlayerId};
use crate::engine::rules::{economy, format_overs, strike_rate, BALLS_PER_OVER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum BattingStatus {
    #[default]
    NotOut,
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
}

impl BattingStatus {
    pub fn is_out(self) -> bool {
        self != BattingStatus::NotOut
    }
}

impl From<DismissalType> for BattingStatus {
    fn from(dismissal: DismissalType) -> Self {
        match dismissal {
            DismissalType::Bowled => BattingStatus::Bowled,
            DismissalType::Caught => BattingStatus::Caught,
            DismissalType::Lbw => BattingStatus::Lbw,
            DismissalType::RunOut => BattingStatus::RunOut,
            DismissalType::Stumped => BattingStatus::Stumped,
            DismissalType::HitWicket => BattingStatus::HitWicket,
        }
    }
}

/// Per-innings batting figures, seeded for every batting-roster player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BattingStat {
    pub player_id: PlayerId,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub status: BattingStatus,
    /// 0 until the player first comes to the crease.
    pub batting_order: u32,
}

impl BattingStat {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            runs: 0,
            balls: 0,
            fours: 0,
            sixes: 0,
            status: BattingStatus::NotOut,
            batting_order: 0,
        }
    }

    pub fn has_batted(&self) -> bool {
        self.batting_order > 0
    }

    /// Eligible to walk in: never batted and not dismissed.
    pub fn is_available(&self) -> bool {
        !self.has_batted() && !self.status.is_out()
    }

    pub fn strike_rate(&self) -> f64 {
        strike_rate(self.runs, self.balls)
    }

    pub(crate) fn face(&mut self, runs: u32) {
        self.runs += runs;
        self.balls += 1;
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }
}

/// Per-innings bowling figures, seeded for every bowling-roster player.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BowlingStat {
    pub player_id: PlayerId,
    pub balls: u32,
    pub runs: u32,
    pub wickets: u32,
    pub maidens: u32,
}

impl BowlingStat {
    pub fn new(player_id: impl Into<String>) -> Self {
        Self { player_id: player_id.into(), balls: 0, runs: 0, wickets: 0, maidens: 0 }
    }

    pub fn has_bowled(&self) -> bool {
        self.balls > 0
    }

    /// Overs in cricket notation, e.g. `"3.2"`.
    pub fn overs(&self) -> String {
        format_overs(self.balls / BALLS_PER_OVER, self.balls % BALLS_PER_OVER)
    }

    /// Runs conceded per six legal deliveries; 0 before the first ball.
    pub fn economy(&self) -> f64 {
        economy(self.runs, self.balls)
    }
}
