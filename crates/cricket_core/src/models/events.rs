use super::PlayerId;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One entry of the ball-by-ball log. Never mutated once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    /// `"<overs>.<ball>"` of the delivery being bowled, e.g. `"18.3"`.
    pub ball: String,
    pub innings: u8,
    pub description: String,
    pub runs: u32,
    pub is_extra: bool,
    pub extra_type: Option<ExtraType>,
    pub is_wicket: bool,
    pub wicket_type: Option<DismissalType>,
    pub striker: PlayerId,
    pub bowler: PlayerId,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum ExtraType {
    Wide,
    #[serde(alias = "noball", alias = "no-ball")]
    NoBall,
    Bye,
    #[serde(alias = "legbye", alias = "leg-bye")]
    LegBye,
}

impl ExtraType {
    /// Byes and leg-byes are legal deliveries; wides and no-balls are re-bowled.
    pub fn consumes_ball(self) -> bool {
        matches!(self, ExtraType::Bye | ExtraType::LegBye)
    }

    /// Wides and no-balls count against the bowler's figures.
    pub fn charged_to_bowler(self) -> bool {
        matches!(self, ExtraType::Wide | ExtraType::NoBall)
    }

    pub fn label(self) -> &'static str {
        match self {
            ExtraType::Wide => "wide",
            ExtraType::NoBall => "no ball",
            ExtraType::Bye => "bye",
            ExtraType::LegBye => "leg bye",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum DismissalType {
    Bowled,
    Caught,
    Lbw,
    #[serde(alias = "runout", alias = "run-out")]
    RunOut,
    Stumped,
    #[serde(alias = "hitwicket", alias = "hit-wicket")]
    HitWicket,
}

impl DismissalType {
    pub fn label(self) -> &'static str {
        match self {
            DismissalType::Bowled => "bowled",
            DismissalType::Caught => "caught",
            DismissalType::Lbw => "lbw",
            DismissalType::RunOut => "run out",
            DismissalType::Stumped => "stumped",
            DismissalType::HitWicket => "hit wicket",
        }
    }
}

impl MatchEvent {
    pub fn is_boundary(&self) -> bool {
        !self.is_extra && (self.runs == 4 || self.runs == 6)
    }

    /// Runs credited to the striker's personal tally.
    pub fn bat_runs(&self) -> u32 {
        if self.is_extra {
            0
        } else {
            self.runs
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_only_byes_consume_a_ball() {
        let consuming: Vec<ExtraType> = ExtraType::iter().filter(|e| e.consumes_ball()).collect();
        assert_eq!(consuming, vec![ExtraType::Bye, ExtraType::LegBye]);
    }

    #[test]
    fn test_bowler_charge_is_complement_of_ball_consumption() {
        for extra in ExtraType::iter() {
            assert_ne!(extra.consumes_ball(), extra.charged_to_bowler(), "{extra:?}");
        }
    }

    #[test]
    fn test_dismissal_wire_names() {
        assert_eq!(serde_json::to_string(&DismissalType::HitWicket).unwrap(), "\"hit_wicket\"");
        let alias: DismissalType = serde_json::from_str("\"run-out\"").unwrap();
        assert_eq!(alias, DismissalType::RunOut);
    }
}
