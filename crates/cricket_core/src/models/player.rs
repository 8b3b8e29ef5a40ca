use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Roster identifier supplied by the roster provider.
pub type PlayerId = String;

/// Player identity as delivered by the roster provider.
///
/// Identity is immutable for the lifetime of a match. `role` is descriptive
/// only; the engine never restricts who may bat or bowl based on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub role: PlayerRole,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: PlayerRole) -> Self {
        Self { id: id.into(), name: name.into(), role }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    #[default]
    #[serde(alias = "Batsman")]
    Batsman,
    #[serde(alias = "Bowler")]
    Bowler,
    #[serde(alias = "All-rounder", alias = "all-rounder")]
    AllRounder,
    #[serde(alias = "Wicket-keeper", alias = "wicket-keeper")]
    WicketKeeper,
}

impl PlayerRole {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerRole::Batsman => "Batsman",
            PlayerRole::Bowler => "Bowler",
            PlayerRole::AllRounder => "All-rounder",
            PlayerRole::WicketKeeper => "Wicket-keeper",
        }
    }
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "batsman" | "batter" => Ok(PlayerRole::Batsman),
            "bowler" => Ok(PlayerRole::Bowler),
            "all_rounder" | "allrounder" => Ok(PlayerRole::AllRounder),
            "wicket_keeper" | "wicketkeeper" | "keeper" => Ok(PlayerRole::WicketKeeper),
            other => Err(format!("Unknown player role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_display_labels() {
        for role in [
            PlayerRole::Batsman,
            PlayerRole::Bowler,
            PlayerRole::AllRounder,
            PlayerRole::WicketKeeper,
        ] {
            assert_eq!(role.label().parse::<PlayerRole>(), Ok(role));
        }
        assert!("umpire".parse::<PlayerRole>().is_err());
    }

    #[test]
    fn test_role_defaults_when_missing() {
        let player: Player = serde_json::from_str(r#"{"id":"p1","name":"Opener"}"#).unwrap();
        assert_eq!(player.role, PlayerRole::Batsman);

        let keeper: Player =
            serde_json::from_str(r#"{"id":"p2","name":"Gloves","role":"Wicket-keeper"}"#).unwrap();
        assert_eq!(keeper.role, PlayerRole::WicketKeeper);
    }
}
