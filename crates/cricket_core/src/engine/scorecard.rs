//! Scorecard generation.
//!
//! `generate_scorecard` is a pure read of the engine: calling it mid-match
//! is fine and calling it twice without an intervening command serializes to
//! the same bytes.

use super::match_engine::MatchEngine;
use super::phase::MatchPhase;
use super::rules::round2;
use crate::models::{
    BattingRow, BowlingRow, Innings, InningsScorecard, MatchInfo, MatchStatus, Scorecard,
};

pub fn generate_scorecard(engine: &MatchEngine) -> Scorecard {
    Scorecard {
        match_info: match_info(engine),
        innings: engine
            .all_innings()
            .into_iter()
            .map(|innings| innings_scorecard(engine, innings))
            .collect(),
        result: engine.outcome().cloned(),
    }
}

pub fn match_status(phase: MatchPhase) -> MatchStatus {
    match phase {
        MatchPhase::MatchComplete => MatchStatus::Completed,
        MatchPhase::InningsBreak => MatchStatus::InningsBreak,
        _ => MatchStatus::InProgress,
    }
}

fn match_info(engine: &MatchEngine) -> MatchInfo {
    let setup = engine.setup();
    MatchInfo {
        match_id: engine.id().to_string(),
        team1: setup.team1.name.clone(),
        team2: setup.team2.name.clone(),
        venue: setup.venue.clone(),
        format: setup.format.clone(),
        over_limit: setup.over_limit,
        toss_winner: setup.team(setup.toss.winner).name.clone(),
        toss_decision: setup.toss.decision,
        date: engine.date().format("%Y-%m-%d").to_string(),
        status: match_status(engine.phase()),
        current_innings: engine.current_innings_number(),
        target: engine.target(),
    }
}

fn innings_scorecard(engine: &MatchEngine, innings: &Innings) -> InningsScorecard {
    let mut batted: Vec<_> = innings.batting_stats.iter().filter(|s| s.has_batted()).collect();
    batted.sort_by_key(|s| s.batting_order);

    let batting_stats = batted
        .into_iter()
        .map(|s| BattingRow {
            player_id: s.player_id.clone(),
            name: engine.player_name(&s.player_id).to_string(),
            runs: s.runs,
            balls: s.balls,
            fours: s.fours,
            sixes: s.sixes,
            strike_rate: round2(s.strike_rate()),
            status: s.status,
            batting_order: s.batting_order,
        })
        .collect();

    let did_not_bat = innings
        .batting_stats
        .iter()
        .filter(|s| !s.has_batted())
        .map(|s| engine.player_name(&s.player_id).to_string())
        .collect();

    let bowling_stats = innings
        .bowling_stats
        .iter()
        .filter(|s| s.has_bowled())
        .map(|s| BowlingRow {
            player_id: s.player_id.clone(),
            name: engine.player_name(&s.player_id).to_string(),
            overs: s.overs(),
            balls: s.balls,
            maidens: s.maidens,
            runs: s.runs,
            wickets: s.wickets,
            economy: round2(s.economy()),
        })
        .collect();

    InningsScorecard {
        number: innings.number,
        batting_team: innings.batting_team.clone(),
        bowling_team: innings.bowling_team.clone(),
        runs: innings.runs,
        wickets: innings.wickets,
        overs: innings.overs_display(),
        extras: innings.extras,
        extras_breakdown: innings.extras_breakdown,
        run_rate: round2(innings.run_rate()),
        batting_stats,
        did_not_bat,
        bowling_stats,
    }
}
