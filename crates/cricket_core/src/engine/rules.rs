//! Playing-condition constants and stateless scoring math.

use crate::error::{Result, ScoringError};

pub const BALLS_PER_OVER: u32 = 6;
pub const DEFAULT_ALL_OUT_WICKETS: u32 = 10;

/// Runs that may be recorded off the bat for a single delivery.
pub const VALID_BAT_RUNS: [u32; 6] = [0, 1, 2, 3, 4, 6];

pub fn validate_bat_runs(runs: u32) -> Result<u32> {
    if VALID_BAT_RUNS.contains(&runs) {
        Ok(runs)
    } else {
        Err(ScoringError::delivery(format!("runs off the bat must be one of 0,1,2,3,4,6, got {runs}")))
    }
}

/// Convert a signed count from an untyped boundary (JSON, UI) into runs.
pub fn non_negative_runs(runs: i64) -> Result<u32> {
    u32::try_from(runs)
        .map_err(|_| ScoringError::delivery(format!("runs must be a non-negative integer, got {runs}")))
}

/// Innings total after adding `runs`. The total must stay below `u32::MAX`
/// so the target (`runs + 1`) is representable.
pub fn add_to_total(total: u32, runs: u32) -> Result<u32> {
    total
        .checked_add(runs)
        .filter(|&sum| sum < u32::MAX)
        .ok_or_else(|| ScoringError::delivery(format!("{runs} runs would overflow the innings total of {total}")))
}

/// `"<overs>.<balls>"`.
pub fn format_overs(overs: u32, balls: u32) -> String {
    format!("{}.{}", overs, balls)
}

/// Label of the delivery about to be bowled: the over in progress and the
/// 1-based legal ball within it.
pub fn ball_label(overs: u32, balls: u32) -> String {
    format_overs(overs, balls + 1)
}

pub fn strike_rate(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    runs as f64 / balls as f64 * 100.0
}

pub fn economy(runs: u32, balls: u32) -> f64 {
    if balls == 0 {
        return 0.0;
    }
    runs as f64 / (balls as f64 / BALLS_PER_OVER as f64)
}

/// Runs per over from a count of legal deliveries.
pub fn run_rate(runs: u32, legal_balls: u32) -> f64 {
    economy(runs, legal_balls)
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
