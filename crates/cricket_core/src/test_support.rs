//! Shared fixtures for unit tests: eleven-a-side rosters and a small
//! driver that feeds a delivery script through the engine, making the
//! routine selections along the way.

use crate::config::ScoringConfig;
use crate::engine::{EngineSignal, MatchEngine, MatchPhase};
use crate::models::{
    DismissalType, ExtraType, MatchSetup, Player, PlayerRole, Team, TeamSide, Toss, TossDecision,
};
use chrono::NaiveDate;

/// Eleven players with ids `<prefix>1` .. `<prefix>11`.
pub(crate) fn make_team(name: &str, prefix: &str) -> Team {
    let tag = prefix.to_uppercase();
    let players = (1..=11)
        .map(|n| {
            let (label, role) = match n {
                1..=6 => ("Batter", PlayerRole::Batsman),
                7 => ("Keeper", PlayerRole::WicketKeeper),
                _ => ("Bowler", PlayerRole::Bowler),
            };
            Player::new(format!("{prefix}{n}"), format!("{label} {tag}{n}"), role)
        })
        .collect();
    Team::new(name, players)
}

/// Team A (`a1`..) against Team B (`b1`..); Team A won the toss and bats.
pub(crate) fn make_setup(over_limit: u32) -> MatchSetup {
    MatchSetup {
        id: Some("test-match".to_string()),
        team1: make_team("Team A", "a"),
        team2: make_team("Team B", "b"),
        venue: "Eden Park".to_string(),
        format: "T20".to_string(),
        over_limit,
        toss: Toss { winner: TeamSide::Team1, decision: TossDecision::Bat },
        date: NaiveDate::from_ymd_opt(2026, 3, 14),
    }
}

pub(crate) fn new_engine(over_limit: u32) -> MatchEngine {
    MatchEngine::new(make_setup(over_limit), ScoringConfig::default()).unwrap()
}

/// Openers `a1`/`a2` in, `b11` bowling the first over.
pub(crate) fn ready_engine(over_limit: u32) -> MatchEngine {
    let mut engine = new_engine(over_limit);
    engine.select_openers("a1", "a2").unwrap();
    engine.select_bowler("b11").unwrap();
    engine
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Ball {
    Runs(u32),
    Extra(ExtraType, u32),
    Wicket(DismissalType),
}

pub(crate) fn repeat(ball: Ball, times: usize) -> Vec<Ball> {
    vec![ball; times]
}

/// Make whatever selection the engine is waiting for: the next two unused
/// batsmen, the next unused batsman, or a bowler taken from the tail of the
/// roster who did not bowl the previous over. Starts the second innings at
/// the break.
pub(crate) fn settle(engine: &mut MatchEngine) {
    loop {
        match engine.phase() {
            MatchPhase::AwaitingOpeners => {
                let available = available_batsmen(engine);
                engine.select_openers(&available[0], &available[1]).unwrap();
            }
            MatchPhase::AwaitingOpeningBowler | MatchPhase::AwaitingNextBowler => {
                let bowler = next_bowler(engine);
                engine.select_bowler(&bowler).unwrap();
            }
            MatchPhase::AwaitingNewBatsman { .. } => {
                let available = available_batsmen(engine);
                engine.select_new_batsman(&available[0]).unwrap();
            }
            MatchPhase::InningsBreak => {
                engine.start_second_innings().unwrap();
            }
            MatchPhase::InProgress | MatchPhase::MatchComplete => return,
        }
    }
}

/// Record every ball in order, settling selections before each one.
/// Returns the signal produced by each delivery.
pub(crate) fn drive(engine: &mut MatchEngine, balls: &[Ball]) -> Vec<EngineSignal> {
    balls
        .iter()
        .map(|ball| {
            settle(engine);
            match *ball {
                Ball::Runs(runs) => engine.record_runs(runs),
                Ball::Extra(extra, runs) => engine.record_extra(extra, runs),
                Ball::Wicket(dismissal) => engine.record_wicket(dismissal, None),
            }
            .unwrap()
        })
        .collect()
}

fn available_batsmen(engine: &MatchEngine) -> Vec<String> {
    engine
        .current_innings()
        .batting_stats
        .iter()
        .filter(|s| s.is_available())
        .map(|s| s.player_id.clone())
        .collect()
}

fn next_bowler(engine: &MatchEngine) -> String {
    let previous = engine.previous_over_bowler();
    engine
        .bowling_team()
        .players
        .iter()
        .rev()
        .map(|p| p.id.clone())
        .find(|id| Some(id.as_str()) != previous)
        .unwrap()
}

/// One-over match: Team A make 6, Team B chase 7 off two balls.
pub(crate) fn completed_engine() -> MatchEngine {
    let mut engine = ready_engine(1);
    drive(&mut engine, &repeat(Ball::Runs(1), 6));
    drive(&mut engine, &[Ball::Runs(6), Ball::Runs(1)]);
    engine
}
