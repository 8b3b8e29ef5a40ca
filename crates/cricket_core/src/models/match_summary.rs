//! Match summary persistence record.
//!
//! The flat record handed to the persistence sink once a match is finished.
//! Field names are kept stable for downstream consumers; note that
//! `player_of_match` is snake_case while everything else is camelCase.

use super::{BattingStatus, MatchStatus, Scorecard};
use crate::engine::{generate_scorecard, MatchEngine};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Impact weighting used to pick the player of the match.
pub const WICKET_IMPACT_RUNS: u32 = 25;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummaryRecord {
    pub id: String,
    pub teams: SummaryTeams,
    pub result: SummaryResult,
    pub batting_stats: Vec<SummaryBatting>,
    pub bowling_stats: Vec<SummaryBowling>,
    pub venue: String,
    pub date: String,
    pub format: String,
    /// Keyed by innings number (`"1"`, `"2"`).
    pub innings: BTreeMap<String, InningsTotals>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryTeams {
    pub team1: TeamTotals,
    pub team2: TeamTotals,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamTotals {
    pub name: String,
    pub score: u32,
    pub wickets: u32,
    pub overs: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub winning_team: Option<String>,
    pub margin: Option<String>,
    #[serde(rename = "player_of_match", default)]
    pub player_of_match: Option<String>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBatting {
    pub innings: u8,
    pub team: String,
    pub player_id: String,
    pub name: String,
    pub runs: u32,
    pub balls: u32,
    pub fours: u32,
    pub sixes: u32,
    pub strike_rate: f64,
    pub status: BattingStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryBowling {
    pub innings: u8,
    pub team: String,
    pub player_id: String,
    pub name: String,
    pub overs: String,
    pub maidens: u32,
    pub runs: u32,
    pub wickets: u32,
    pub economy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InningsTotals {
    pub batting_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: String,
    pub extras: u32,
}

impl MatchSummaryRecord {
    pub fn from_engine(engine: &MatchEngine) -> Self {
        Self::from_scorecard(&generate_scorecard(engine))
    }

    pub fn from_scorecard(card: &Scorecard) -> Self {
        let info = &card.match_info;

        let totals_for = |team: &str| {
            card.innings
                .iter()
                .find(|i| i.batting_team == team)
                .map(|i| TeamTotals {
                    name: team.to_string(),
                    score: i.runs,
                    wickets: i.wickets,
                    overs: i.overs.clone(),
                })
                .unwrap_or_else(|| TeamTotals {
                    name: team.to_string(),
                    score: 0,
                    wickets: 0,
                    overs: "0.0".to_string(),
                })
        };

        let mut batting_stats = Vec::new();
        let mut bowling_stats = Vec::new();
        let mut innings = BTreeMap::new();

        for inn in &card.innings {
            batting_stats.extend(inn.batting_stats.iter().map(|row| SummaryBatting {
                innings: inn.number,
                team: inn.batting_team.clone(),
                player_id: row.player_id.clone(),
                name: row.name.clone(),
                runs: row.runs,
                balls: row.balls,
                fours: row.fours,
                sixes: row.sixes,
                strike_rate: row.strike_rate,
                status: row.status,
            }));
            bowling_stats.extend(inn.bowling_stats.iter().map(|row| SummaryBowling {
                innings: inn.number,
                team: inn.bowling_team.clone(),
                player_id: row.player_id.clone(),
                name: row.name.clone(),
                overs: row.overs.clone(),
                maidens: row.maidens,
                runs: row.runs,
                wickets: row.wickets,
                economy: row.economy,
            }));
            innings.insert(
                inn.number.to_string(),
                InningsTotals {
                    batting_team: inn.batting_team.clone(),
                    runs: inn.runs,
                    wickets: inn.wickets,
                    overs: inn.overs.clone(),
                    extras: inn.extras,
                },
            );
        }

        let player_of_match = if info.status == MatchStatus::Completed {
            select_player_of_match(&batting_stats, &bowling_stats)
        } else {
            None
        };

        Self {
            id: info.match_id.clone(),
            teams: SummaryTeams { team1: totals_for(&info.team1), team2: totals_for(&info.team2) },
            result: SummaryResult {
                winning_team: card.result.as_ref().map(|r| r.winning_team.clone()),
                margin: card.result.as_ref().map(|r| r.margin.clone()),
                player_of_match,
                status: info.status,
            },
            batting_stats,
            bowling_stats,
            venue: info.venue.clone(),
            date: info.date.clone(),
            format: info.format.clone(),
            innings,
        }
    }
}

/// Highest combined impact (runs + 25 per wicket) across both innings.
///
/// Ties go to the player who appears first in the batting then bowling rows.
pub fn select_player_of_match(
    batting: &[SummaryBatting],
    bowling: &[SummaryBowling],
) -> Option<String> {
    let mut impact: HashMap<&str, u32> = HashMap::new();
    let mut order: Vec<(&str, &str)> = Vec::new();

    for row in batting {
        if !impact.contains_key(row.player_id.as_str()) {
            order.push((row.player_id.as_str(), row.name.as_str()));
        }
        *impact.entry(row.player_id.as_str()).or_insert(0) += row.runs;
    }
    for row in bowling {
        if !impact.contains_key(row.player_id.as_str()) {
            order.push((row.player_id.as_str(), row.name.as_str()));
        }
        *impact.entry(row.player_id.as_str()).or_insert(0) += row.wickets * WICKET_IMPACT_RUNS;
    }

    let mut best: Option<(&str, u32)> = None;
    for (id, name) in order {
        let score = impact.get(id).copied().unwrap_or(0);
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((name, score));
        }
    }

    best.filter(|(_, score)| *score > 0).map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batting(id: &str, runs: u32) -> SummaryBatting {
        SummaryBatting {
            innings: 1,
            team: "Team A".into(),
            player_id: id.into(),
            name: format!("Name {id}"),
            runs,
            balls: runs,
            fours: 0,
            sixes: 0,
            strike_rate: 100.0,
            status: BattingStatus::NotOut,
        }
    }

    fn bowling(id: &str, wickets: u32) -> SummaryBowling {
        SummaryBowling {
            innings: 1,
            team: "Team B".into(),
            player_id: id.into(),
            name: format!("Name {id}"),
            overs: "4.0".into(),
            maidens: 0,
            runs: 30,
            wickets,
            economy: 7.5,
        }
    }

    #[test]
    fn test_wickets_outweigh_modest_runs() {
        let bat = vec![batting("a1", 60), batting("a2", 12)];
        let bowl = vec![bowling("b1", 3)];
        assert_eq!(select_player_of_match(&bat, &bowl), Some("Name b1".to_string()));
    }

    #[test]
    fn test_all_rounder_impact_is_combined() {
        let bat = vec![batting("a1", 40), batting("b2", 30)];
        let bowl = vec![bowling("b2", 1)];
        // b2: 30 + 25 = 55 beats a1's 40
        assert_eq!(select_player_of_match(&bat, &bowl), Some("Name b2".to_string()));
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let bat = vec![batting("a1", 25)];
        let bowl = vec![bowling("b1", 1)];
        assert_eq!(select_player_of_match(&bat, &bowl), Some("Name a1".to_string()));
        assert_eq!(select_player_of_match(&[], &[]), None);
    }
}
