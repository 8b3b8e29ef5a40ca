use super::Player;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Minimum roster size: two batsmen must be able to open.
pub const MIN_PLAYERS: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>, // batting order is chosen at the crease, not here
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self { name: name.into(), players }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Team name must not be empty".to_string());
        }

        if self.players.len() < MIN_PLAYERS {
            return Err(format!(
                "Team {} must have at least {} players, found {}",
                self.name,
                MIN_PLAYERS,
                self.players.len()
            ));
        }

        let mut seen = HashSet::new();
        for player in &self.players {
            if player.id.trim().is_empty() {
                return Err(format!("Team {} has a player with an empty id", self.name));
            }
            if !seen.insert(player.id.as_str()) {
                return Err(format!("Team {} lists player id {} twice", self.name, player.id));
            }
        }

        Ok(())
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.player(player_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerRole;

    fn players(ids: &[&str]) -> Vec<Player> {
        ids.iter().map(|id| Player::new(*id, format!("Player {}", id), PlayerRole::Batsman)).collect()
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let team = Team::new("Falcons", players(&["a", "b", "a"]));
        let err = team.validate().unwrap_err();
        assert!(err.contains("twice"), "{err}");
    }

    #[test]
    fn test_validate_requires_two_players() {
        let team = Team::new("Falcons", players(&["a"]));
        assert!(team.validate().is_err());
        assert!(Team::new("Falcons", players(&["a", "b"])).validate().is_ok());
    }

    #[test]
    fn test_lookup_by_id() {
        let team = Team::new("Falcons", players(&["a", "b"]));
        assert_eq!(team.player("b").map(|p| p.name.as_str()), Some("Player b"));
        assert!(!team.contains("z"));
    }
}
