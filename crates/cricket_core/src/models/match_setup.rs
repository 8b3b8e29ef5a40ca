//! Match setup handed over by the roster provider before the first ball.

use super::Team;
use crate::error::{Result, ScoringError};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Team1,
    Team2,
}

impl TeamSide {
    pub fn opposite(self) -> Self {
        match self {
            TeamSide::Team1 => TeamSide::Team2,
            TeamSide::Team2 => TeamSide::Team1,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TossDecision {
    Bat,
    #[serde(alias = "bowl")]
    Field,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Toss {
    pub winner: TeamSide,
    pub decision: TossDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSetup {
    /// Caller-supplied match id; a v4 uuid is generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub team1: Team,
    pub team2: Team,
    pub venue: String,
    pub format: String,
    pub over_limit: u32,
    pub toss: Toss,
    /// Match date; defaults to the current UTC date.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl MatchSetup {
    pub fn validate(&self) -> Result<()> {
        self.team1.validate().map_err(ScoringError::InvalidSetup)?;
        self.team2.validate().map_err(ScoringError::InvalidSetup)?;

        if self.team1.name == self.team2.name {
            return Err(ScoringError::InvalidSetup(format!(
                "Both teams are named {}",
                self.team1.name
            )));
        }

        if self.over_limit == 0 {
            return Err(ScoringError::InvalidSetup("Over limit must be at least 1".to_string()));
        }

        // A player cannot appear on both sides.
        if let Some(shared) = self.team2.players.iter().find(|p| self.team1.contains(&p.id)) {
            return Err(ScoringError::InvalidSetup(format!(
                "Player {} is listed for both teams",
                shared.id
            )));
        }

        if let Some(id) = &self.id {
            if id.trim().is_empty() {
                return Err(ScoringError::InvalidSetup("Match id must not be empty".to_string()));
            }
        }

        Ok(())
    }

    /// Side that bats in the first innings, derived from the toss.
    pub fn batting_first(&self) -> TeamSide {
        match self.toss.decision {
            TossDecision::Bat => self.toss.winner,
            TossDecision::Field => self.toss.winner.opposite(),
        }
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Team1 => &self.team1,
            TeamSide::Team2 => &self.team2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{make_setup, make_team};

    #[test]
    fn test_batting_first_follows_toss() {
        let mut setup = make_setup(20);
        setup.toss = Toss { winner: TeamSide::Team2, decision: TossDecision::Bat };
        assert_eq!(setup.batting_first(), TeamSide::Team2);

        setup.toss = Toss { winner: TeamSide::Team2, decision: TossDecision::Field };
        assert_eq!(setup.batting_first(), TeamSide::Team1);
    }

    #[test]
    fn test_validate_rejects_shared_player() {
        let mut setup = make_setup(20);
        setup.team2 = make_team("Team B", "a");
        let err = setup.validate().unwrap_err();
        assert!(matches!(err, ScoringError::InvalidSetup(msg) if msg.contains("both teams")));
    }

    #[test]
    fn test_validate_rejects_zero_overs_and_same_names() {
        let mut setup = make_setup(0);
        assert!(setup.validate().is_err());

        setup.over_limit = 20;
        setup.team2.name = setup.team1.name.clone();
        assert!(setup.validate().is_err());
    }

    #[test]
    fn test_toss_accepts_bowl_alias() {
        let toss: Toss = serde_json::from_str(r#"{"winner":"team1","decision":"bowl"}"#).unwrap();
        assert_eq!(toss.decision, TossDecision::Field);
    }
}
