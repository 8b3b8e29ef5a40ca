use super::{BattingStat, BowlingStat, ExtraType, Team};
use crate::engine::rules::{format_overs, run_rate, BALLS_PER_OVER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasBreakdown {
    pub wides: u32,
    pub no_balls: u32,
    pub byes: u32,
    pub leg_byes: u32,
}

impl ExtrasBreakdown {
    pub(crate) fn add(&mut self, extra: ExtraType, runs: u32) {
        match extra {
            ExtraType::Wide => self.wides += runs,
            ExtraType::NoBall => self.no_balls += runs,
            ExtraType::Bye => self.byes += runs,
            ExtraType::LegBye => self.leg_byes += runs,
        }
    }

    pub fn total(&self) -> u32 {
        self.wides + self.no_balls + self.byes + self.leg_byes
    }
}

/// One team's turn at the crease.
///
/// `balls` is the count of legal deliveries in the over in progress and is
/// always below six; the sixth legal ball rolls it into `overs`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Innings {
    pub number: u8,
    pub batting_team: String,
    pub bowling_team: String,
    pub runs: u32,
    pub wickets: u32,
    pub overs: u32,
    pub balls: u32,
    pub extras: u32,
    pub extras_breakdown: ExtrasBreakdown,
    pub batting_stats: Vec<BattingStat>,
    pub bowling_stats: Vec<BowlingStat>,
    /// Wickets that end this innings (10, or fewer for a short roster).
    pub all_out_at: u32,
}

impl Innings {
    pub fn new(number: u8, batting: &Team, bowling: &Team, all_out_wickets: u32) -> Self {
        let last_pair = (batting.players.len() as u32).saturating_sub(1).max(1);
        Self {
            number,
            batting_team: batting.name.clone(),
            bowling_team: bowling.name.clone(),
            runs: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            extras: 0,
            extras_breakdown: ExtrasBreakdown::default(),
            batting_stats: batting.players.iter().map(|p| BattingStat::new(p.id.clone())).collect(),
            bowling_stats: bowling.players.iter().map(|p| BowlingStat::new(p.id.clone())).collect(),
            all_out_at: all_out_wickets.min(last_pair),
        }
    }

    pub fn legal_balls(&self) -> u32 {
        self.overs * BALLS_PER_OVER + self.balls
    }

    /// Overs in cricket notation, e.g. `"18.3"`.
    pub fn overs_display(&self) -> String {
        format_overs(self.overs, self.balls)
    }

    pub fn run_rate(&self) -> f64 {
        run_rate(self.runs, self.legal_balls())
    }

    pub fn is_all_out(&self) -> bool {
        self.wickets >= self.all_out_at
    }

    pub fn overs_complete(&self, over_limit: u32) -> bool {
        self.overs >= over_limit && self.balls == 0
    }

    pub fn batting(&self, player_id: &str) -> Option<&BattingStat> {
        self.batting_stats.iter().find(|s| s.player_id == player_id)
    }

    pub fn batting_mut(&mut self, player_id: &str) -> Option<&mut BattingStat> {
        self.batting_stats.iter_mut().find(|s| s.player_id == player_id)
    }

    pub fn bowling(&self, player_id: &str) -> Option<&BowlingStat> {
        self.bowling_stats.iter().find(|s| s.player_id == player_id)
    }

    pub fn bowling_mut(&mut self, player_id: &str) -> Option<&mut BowlingStat> {
        self.bowling_stats.iter_mut().find(|s| s.player_id == player_id)
    }

    pub fn next_batting_order(&self) -> u32 {
        self.batting_stats.iter().map(|s| s.batting_order).max().unwrap_or(0) + 1
    }

    /// Runs off the bat across every batsman.
    pub fn bat_runs(&self) -> u32 {
        self.batting_stats.iter().map(|s| s.runs).sum()
    }

    pub fn dismissed_count(&self) -> u32 {
        self.batting_stats.iter().filter(|s| s.status.is_out()).count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_team;

    #[test]
    fn test_new_innings_seeds_every_roster_player() {
        let batting = make_team("Team A", "a");
        let bowling = make_team("Team B", "b");
        let innings = Innings::new(1, &batting, &bowling, 10);

        assert_eq!(innings.batting_stats.len(), 11);
        assert_eq!(innings.bowling_stats.len(), 11);
        assert!(innings.batting_stats.iter().all(|s| s.batting_order == 0));
        assert_eq!(innings.all_out_at, 10);
        assert_eq!(innings.next_batting_order(), 1);
    }

    #[test]
    fn test_short_roster_lowers_all_out_threshold() {
        let mut batting = make_team("Team A", "a");
        batting.players.truncate(5);
        let innings = Innings::new(1, &batting, &make_team("Team B", "b"), 10);
        assert_eq!(innings.all_out_at, 4);
    }

    #[test]
    fn test_overs_complete_only_on_boundary() {
        let mut innings = Innings::new(1, &make_team("Team A", "a"), &make_team("Team B", "b"), 10);
        innings.overs = 19;
        innings.balls = 5;
        assert!(!innings.overs_complete(20));
        innings.overs = 20;
        innings.balls = 0;
        assert!(innings.overs_complete(20));
        assert_eq!(innings.overs_display(), "20.0");
    }

    #[test]
    fn test_extras_breakdown_total() {
        let mut extras = ExtrasBreakdown::default();
        extras.add(ExtraType::Wide, 1);
        extras.add(ExtraType::Bye, 4);
        extras.add(ExtraType::LegBye, 1);
        assert_eq!(extras.total(), 6);
        assert_eq!(extras.byes, 4);
    }
}
