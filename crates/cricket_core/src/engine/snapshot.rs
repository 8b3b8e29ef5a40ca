//! Read-only view of the live match for the presentation layer.

use super::match_engine::MatchEngine;
use super::phase::MatchPhase;
use super::rules::{round2, BALLS_PER_OVER};
use crate::models::{MatchEvent, MatchOutcome};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub match_id: String,
    pub phase: MatchPhase,
    pub innings: u8,
    pub batting_team: String,
    pub bowling_team: String,
    /// `"<runs>/<wickets>"`.
    pub score: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: String,
    pub current_run_rate: f64,
    pub target: Option<u32>,
    pub chase: Option<ChaseState>,
    pub striker: Option<BatsmanFigures>,
    pub non_striker: Option<BatsmanFigures>,
    pub bowler: Option<BowlerFigures>,
    /// Newest first.
    pub recent_events: Vec<MatchEvent>,
    pub result: Option<MatchOutcome>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChaseState {
    pub runs_needed: u32,
    pub balls_remaining: u32,
    /// Absent once no balls remain.
    pub required_run_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatsmanFigures {
    pub player_id: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BowlerFigures {
    pub player_id: String,
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

impl MatchEngine {
    pub fn snapshot(&self) -> MatchSnapshot {
        let innings = self.current_innings();

        let chase = match (innings.number, self.target()) {
            (2, Some(target)) => {
                let total_balls = self.setup().over_limit * BALLS_PER_OVER;
                let runs_needed = target.saturating_sub(innings.runs);
                let balls_remaining = total_balls.saturating_sub(innings.legal_balls());
                let required_run_rate = (balls_remaining > 0).then(|| {
                    round2(runs_needed as f64 * BALLS_PER_OVER as f64 / balls_remaining as f64)
                });
                Some(ChaseState { runs_needed, balls_remaining, required_run_rate })
            }
            _ => None,
        };

        MatchSnapshot {
            match_id: self.id().to_string(),
            phase: self.phase(),
            innings: innings.number,
            batting_team: innings.batting_team.clone(),
            bowling_team: innings.bowling_team.clone(),
            score: format!("{}/{}", innings.runs, innings.wickets),
            runs: innings.runs,
            wickets: innings.wickets,
            overs: innings.overs_display(),
            current_run_rate: round2(innings.run_rate()),
            target: self.target(),
            chase,
            striker: self.striker().and_then(|id| self.batsman_figures(id)),
            non_striker: self.non_striker().and_then(|id| self.batsman_figures(id)),
            bowler: self.bowler().and_then(|id| self.bowler_figures(id)),
            recent_events: self
                .events()
                .iter()
                .take(self.config().snapshot_recent_events)
                .cloned()
                .collect(),
            result: self.outcome().cloned(),
        }
    }

    fn batsman_figures(&self, player_id: &str) -> Option<BatsmanFigures> {
        let stat = self.current_innings().batting(player_id)?;
        Some(BatsmanFigures {
            player_id: stat.player_id.clone(),
            name: self.player_name(player_id).to_string(),
            runs: stat.runs,
            balls: stat.balls,
            fours: stat.fours,
            sixes: stat.sixes,
            strike_rate: round2(stat.strike_rate()),
        })
    }

    fn bowler_figures(&self, player_id: &str) -> Option<BowlerFigures> {
        let stat = self.current_innings().bowling(player_id)?;
        Some(BowlerFigures {
            player_id: stat.player_id.clone(),
            name: self.player_name(player_id).to_string(),
            overs: stat.overs(),
            maidens: stat.maidens,
            runs: stat.runs,
            wickets: stat.wickets,
            economy: round2(stat.economy()),
        })
    }
}
