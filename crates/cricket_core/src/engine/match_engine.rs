//! Ball-by-ball scoring state machine.
//!
//! `MatchEngine` owns every piece of match state: both rosters, the current
//! and frozen innings, who is on strike, who is bowling, and the event log.
//! Each public command either applies completely or returns an error without
//! touching state. After every recorded delivery the engine re-checks the
//! innings and match completion conditions, so callers never have to.
//!
//! ```text
//! AwaitingOpeners → AwaitingOpeningBowler → InProgress ⇄ AwaitingNewBatsman
//!                                              ⇅             AwaitingNextBowler
//!                                         InningsBreak → (innings 2) … → MatchComplete
//! ```

use super::phase::{EngineSignal, MatchPhase};
use super::rules::{add_to_total, ball_label, validate_bat_runs};
use crate::config::ScoringConfig;
use crate::error::{Result, ScoringError};
use crate::models::{
    DismissalType, ExtraType, Innings, MatchEvent, MatchOutcome, MatchSetup, PlayerId, Team,
    TeamSide,
};
use chrono::{NaiveDate, Utc};
use std::collections::VecDeque;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MatchEngine {
    id: String,
    setup: MatchSetup,
    config: ScoringConfig,
    date: NaiveDate,
    phase: MatchPhase,
    /// Innings in play, or the last one played once the match is over.
    current: Innings,
    /// Frozen first innings once the second has started.
    first_innings: Option<Innings>,
    target: Option<u32>,
    outcome: Option<MatchOutcome>,
    striker: Option<PlayerId>,
    non_striker: Option<PlayerId>,
    bowler: Option<PlayerId>,
    previous_over_bowler: Option<PlayerId>,
    /// Runs charged to the bowler in the over in progress (maiden tracking).
    over_runs_conceded: u32,
    /// Newest first.
    events: VecDeque<MatchEvent>,
}

impl MatchEngine {
    pub fn new(setup: MatchSetup, config: ScoringConfig) -> Result<Self> {
        setup.validate()?;
        config.validate().map_err(ScoringError::InvalidSetup)?;

        let id = setup.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
        let date = setup.date.unwrap_or_else(|| Utc::now().date_naive());

        let batting = setup.batting_first();
        let current = Innings::new(
            1,
            setup.team(batting),
            setup.team(batting.opposite()),
            config.all_out_wickets,
        );

        info!(
            match_id = %id,
            batting = %current.batting_team,
            bowling = %current.bowling_team,
            over_limit = setup.over_limit,
            "match created"
        );

        Ok(Self {
            id,
            setup,
            config,
            date,
            phase: MatchPhase::AwaitingOpeners,
            current,
            first_innings: None,
            target: None,
            outcome: None,
            striker: None,
            non_striker: None,
            bowler: None,
            previous_over_bowler: None,
            over_runs_conceded: 0,
            events: VecDeque::new(),
        })
    }

    pub fn with_defaults(setup: MatchSetup) -> Result<Self> {
        Self::new(setup, ScoringConfig::standard())
    }

    // ========================
    // Read access
    // ========================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn setup(&self) -> &MatchSetup {
        &self.setup
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn current_innings_number(&self) -> u8 {
        self.current.number
    }

    pub fn current_innings(&self) -> &Innings {
        &self.current
    }

    pub fn innings(&self, number: u8) -> Option<&Innings> {
        if self.current.number == number {
            Some(&self.current)
        } else {
            self.first_innings.as_ref().filter(|i| i.number == number)
        }
    }

    /// Innings played so far, in order.
    pub fn all_innings(&self) -> Vec<&Innings> {
        self.first_innings.iter().chain(std::iter::once(&self.current)).collect()
    }

    pub fn target(&self) -> Option<u32> {
        self.target
    }

    /// Winning team name or `"Tie"`, once the match is complete.
    pub fn winner(&self) -> Option<&str> {
        self.outcome.as_ref().map(|o| o.winning_team.as_str())
    }

    pub fn outcome(&self) -> Option<&MatchOutcome> {
        self.outcome.as_ref()
    }

    pub fn striker(&self) -> Option<&str> {
        self.striker.as_deref()
    }

    pub fn non_striker(&self) -> Option<&str> {
        self.non_striker.as_deref()
    }

    pub fn bowler(&self) -> Option<&str> {
        self.bowler.as_deref()
    }

    pub fn previous_over_bowler(&self) -> Option<&str> {
        self.previous_over_bowler.as_deref()
    }

    pub fn events(&self) -> &VecDeque<MatchEvent> {
        &self.events
    }

    pub fn batting_side(&self) -> TeamSide {
        let first = self.setup.batting_first();
        if self.current.number == 1 {
            first
        } else {
            first.opposite()
        }
    }

    pub fn batting_team(&self) -> &Team {
        self.setup.team(self.batting_side())
    }

    pub fn bowling_team(&self) -> &Team {
        self.setup.team(self.batting_side().opposite())
    }

    /// Display name for a player id from either roster.
    pub fn player_name<'a>(&'a self, player_id: &'a str) -> &'a str {
        self.setup
            .team1
            .player(player_id)
            .or_else(|| self.setup.team2.player(player_id))
            .map(|p| p.name.as_str())
            .unwrap_or(player_id)
    }

    // ========================
    // Selections
    // ========================

    /// Choose the opening pair. The first id takes strike.
    pub fn select_openers(&mut self, striker: &str, non_striker: &str) -> Result<EngineSignal> {
        self.require("select openers", self.phase == MatchPhase::AwaitingOpeners)?;

        if striker == non_striker {
            return Err(ScoringError::selection(format!(
                "{} cannot open at both ends",
                self.player_name(striker)
            )));
        }
        self.check_incoming_batsman(striker)?;
        self.check_incoming_batsman(non_striker)?;

        self.assign_batting_order(striker);
        self.assign_batting_order(non_striker);
        self.striker = Some(striker.to_string());
        self.non_striker = Some(non_striker.to_string());
        self.phase = MatchPhase::AwaitingOpeningBowler;

        debug!(
            match_id = %self.id,
            innings = self.current.number,
            striker,
            non_striker,
            "openers selected"
        );
        Ok(EngineSignal::SelectBowler)
    }

    /// Choose the bowler for the next over (or the first over of an innings).
    pub fn select_bowler(&mut self, bowler: &str) -> Result<EngineSignal> {
        let next_over = match self.phase {
            MatchPhase::AwaitingOpeningBowler => false,
            MatchPhase::AwaitingNextBowler => true,
            _ => return Err(self.state_error("select a bowler")),
        };

        if self.current.bowling(bowler).is_none() {
            return Err(ScoringError::selection(format!(
                "{} is not on the {} bowling roster",
                bowler, self.current.bowling_team
            )));
        }

        if next_over
            && !self.config.allow_consecutive_overs
            && self.previous_over_bowler.as_deref() == Some(bowler)
        {
            return Err(ScoringError::selection(format!(
                "{} bowled the previous over",
                self.player_name(bowler)
            )));
        }

        self.bowler = Some(bowler.to_string());
        self.over_runs_conceded = 0;
        self.phase = MatchPhase::InProgress;

        debug!(match_id = %self.id, innings = self.current.number, over = self.current.overs + 1, bowler, "bowler selected");
        Ok(EngineSignal::Continue)
    }

    /// Fill the vacancy left by a wicket.
    pub fn select_new_batsman(&mut self, batsman: &str) -> Result<EngineSignal> {
        let MatchPhase::AwaitingNewBatsman { then_bowler } = self.phase else {
            return Err(self.state_error("select a new batsman"));
        };

        self.check_incoming_batsman(batsman)?;
        self.assign_batting_order(batsman);
        self.fill_vacancy(batsman);

        debug!(match_id = %self.id, innings = self.current.number, batsman, "new batsman selected");

        if then_bowler {
            self.phase = MatchPhase::AwaitingNextBowler;
            Ok(EngineSignal::SelectBowler)
        } else {
            self.phase = MatchPhase::InProgress;
            Ok(EngineSignal::Continue)
        }
    }

    // ========================
    // Deliveries
    // ========================

    /// Legal delivery scoring `runs` off the bat.
    pub fn record_runs(&mut self, runs: u32) -> Result<EngineSignal> {
        self.require("record runs", self.phase.accepts_deliveries())?;
        let runs = validate_bat_runs(runs)?;
        let (striker, bowler) = self.crease()?;
        let ball = ball_label(self.current.overs, self.current.balls);

        self.current.runs += runs;
        if let Some(stat) = self.current.batting_mut(&striker) {
            stat.face(runs);
        }
        if let Some(stat) = self.current.bowling_mut(&bowler) {
            stat.runs += runs;
            stat.balls += 1;
        }
        self.over_runs_conceded += runs;

        // Over-end and running swaps are independent toggles.
        let over_completed = self.advance_ball();
        if over_completed {
            self.swap_strike();
        }
        if runs % 2 == 1 {
            self.swap_strike();
        }

        let description =
            format!("{} to {}, {}", self.player_name(&bowler), self.player_name(&striker), runs_phrase(runs));
        self.push_event(MatchEvent {
            ball,
            innings: self.current.number,
            description,
            runs,
            is_extra: false,
            extra_type: None,
            is_wicket: false,
            wicket_type: None,
            striker,
            bowler,
            timestamp: Utc::now(),
        });

        debug!(
            match_id = %self.id,
            score = %format!("{}/{}", self.current.runs, self.current.wickets),
            overs = %self.current.overs_display(),
            runs,
            "delivery recorded"
        );
        Ok(self.finish_delivery(over_completed))
    }

    /// Wide, no-ball, bye or leg-bye worth `runs`.
    pub fn record_extra(&mut self, extra: ExtraType, runs: u32) -> Result<EngineSignal> {
        self.require("record an extra", self.phase.accepts_deliveries())?;
        let (striker, bowler) = self.crease()?;
        // Extras, bowler and over tallies never exceed the innings total.
        let total = add_to_total(self.current.runs, runs)?;
        let ball = ball_label(self.current.overs, self.current.balls);

        self.current.runs = total;
        self.current.extras += runs;
        self.current.extras_breakdown.add(extra, runs);

        if extra.charged_to_bowler() {
            if let Some(stat) = self.current.bowling_mut(&bowler) {
                stat.runs += runs;
            }
            self.over_runs_conceded += runs;
        }

        let over_completed = if extra.consumes_ball() {
            if let Some(stat) = self.current.bowling_mut(&bowler) {
                stat.balls += 1;
            }
            self.advance_ball()
        } else {
            false
        };
        if over_completed {
            self.swap_strike();
        }

        let description = format!(
            "{} to {}, {}",
            self.player_name(&bowler),
            self.player_name(&striker),
            extra_phrase(extra, runs)
        );
        self.push_event(MatchEvent {
            ball,
            innings: self.current.number,
            description,
            runs,
            is_extra: true,
            extra_type: Some(extra),
            is_wicket: false,
            wicket_type: None,
            striker,
            bowler,
            timestamp: Utc::now(),
        });

        debug!(
            match_id = %self.id,
            score = %format!("{}/{}", self.current.runs, self.current.wickets),
            overs = %self.current.overs_display(),
            extra = extra.label(),
            runs,
            "extra recorded"
        );
        Ok(self.finish_delivery(over_completed))
    }

    /// Dismissal of the striker. `new_batsman` fills the striker's slot
    /// straight away; without it the engine waits for a selection.
    pub fn record_wicket(
        &mut self,
        dismissal: DismissalType,
        new_batsman: Option<&str>,
    ) -> Result<EngineSignal> {
        self.require("record a wicket", self.phase.accepts_deliveries())?;
        let (striker, bowler) = self.crease()?;
        if let Some(incoming) = new_batsman {
            self.check_incoming_batsman(incoming)?;
        }
        let ball = ball_label(self.current.overs, self.current.balls);

        self.current.wickets += 1;
        let credit_bowler =
            dismissal != DismissalType::RunOut || self.config.credit_run_out_to_bowler;
        if let Some(stat) = self.current.bowling_mut(&bowler) {
            stat.balls += 1;
            if credit_bowler {
                stat.wickets += 1;
            }
        }
        if let Some(stat) = self.current.batting_mut(&striker) {
            stat.balls += 1;
            stat.status = dismissal.into();
        }
        self.striker = None;

        // The last wicket ends the innings; nobody walks in.
        if !self.current.is_all_out() {
            if let Some(incoming) = new_batsman {
                self.assign_batting_order(incoming);
                self.striker = Some(incoming.to_string());
            }
        }

        let over_completed = self.advance_ball();
        if over_completed {
            self.swap_strike();
        }

        let description = format!(
            "{} to {}, OUT! {} {}",
            self.player_name(&bowler),
            self.player_name(&striker),
            self.player_name(&striker),
            dismissal.label()
        );
        self.push_event(MatchEvent {
            ball,
            innings: self.current.number,
            description,
            runs: 0,
            is_extra: false,
            extra_type: None,
            is_wicket: true,
            wicket_type: Some(dismissal),
            striker: striker.clone(),
            bowler,
            timestamp: Utc::now(),
        });

        info!(
            match_id = %self.id,
            score = %format!("{}/{}", self.current.runs, self.current.wickets),
            overs = %self.current.overs_display(),
            batsman = %striker,
            how = dismissal.label(),
            "wicket"
        );
        Ok(self.finish_delivery(over_completed))
    }

    // ========================
    // Innings and match transitions
    // ========================

    pub fn start_second_innings(&mut self) -> Result<EngineSignal> {
        self.require("start the second innings", self.phase == MatchPhase::InningsBreak)?;

        let batting = self.setup.batting_first().opposite();
        let second = Innings::new(
            2,
            self.setup.team(batting),
            self.setup.team(batting.opposite()),
            self.config.all_out_wickets,
        );
        self.first_innings = Some(std::mem::replace(&mut self.current, second));
        self.clear_crease();
        self.previous_over_bowler = None;
        self.over_runs_conceded = 0;
        self.phase = MatchPhase::AwaitingOpeners;

        info!(
            match_id = %self.id,
            batting = %self.current.batting_team,
            target = ?self.target,
            "second innings started"
        );
        Ok(EngineSignal::SelectOpeners)
    }

    /// Finish the match now, deciding the result from the scores as they stand.
    pub fn end_match(&mut self) -> Result<EngineSignal> {
        let started = self.current.number == 2 || self.phase.is_live();
        let allowed = !self.phase.is_terminal()
            && (started || self.phase == MatchPhase::InningsBreak);
        self.require("end the match", allowed)?;

        info!(
            match_id = %self.id,
            innings = self.current.number,
            phase = self.phase.name(),
            "match ended early"
        );
        Ok(self.complete_match())
    }

    // ========================
    // Internals
    // ========================

    fn require(&self, operation: &'static str, allowed: bool) -> Result<()> {
        if allowed {
            Ok(())
        } else {
            Err(self.state_error(operation))
        }
    }

    fn state_error(&self, operation: &'static str) -> ScoringError {
        ScoringError::InvalidState { operation, phase: self.phase.name() }
    }

    fn crease(&self) -> Result<(PlayerId, PlayerId)> {
        match (&self.striker, &self.bowler) {
            (Some(striker), Some(bowler)) => Ok((striker.clone(), bowler.clone())),
            _ => Err(self.state_error("bowl without a striker and bowler")),
        }
    }

    fn check_incoming_batsman(&self, player_id: &str) -> Result<()> {
        let stat = self.current.batting(player_id).ok_or_else(|| {
            ScoringError::selection(format!(
                "{} is not on the {} batting roster",
                player_id, self.current.batting_team
            ))
        })?;

        if stat.status.is_out() {
            return Err(ScoringError::selection(format!(
                "{} is already out",
                self.player_name(player_id)
            )));
        }
        if stat.has_batted() {
            return Err(ScoringError::selection(format!(
                "{} is already at the crease",
                self.player_name(player_id)
            )));
        }
        Ok(())
    }

    fn assign_batting_order(&mut self, player_id: &str) {
        let order = self.current.next_batting_order();
        if let Some(stat) = self.current.batting_mut(player_id) {
            stat.batting_order = order;
        }
    }

    fn fill_vacancy(&mut self, player_id: &str) {
        if self.striker.is_none() {
            self.striker = Some(player_id.to_string());
        } else if self.non_striker.is_none() {
            self.non_striker = Some(player_id.to_string());
        }
    }

    fn swap_strike(&mut self) {
        std::mem::swap(&mut self.striker, &mut self.non_striker);
    }

    fn clear_crease(&mut self) {
        self.striker = None;
        self.non_striker = None;
        self.bowler = None;
    }

    /// Count one legal delivery. Returns true when it completed an over.
    fn advance_ball(&mut self) -> bool {
        self.current.balls += 1;
        if self.current.balls < super::rules::BALLS_PER_OVER {
            return false;
        }

        self.current.overs += 1;
        self.current.balls = 0;
        if let Some(bowler) = self.bowler.take() {
            if self.over_runs_conceded == 0 {
                if let Some(stat) = self.current.bowling_mut(&bowler) {
                    stat.maidens += 1;
                }
            }
            self.previous_over_bowler = Some(bowler);
        }
        self.over_runs_conceded = 0;
        true
    }

    fn push_event(&mut self, event: MatchEvent) {
        self.events.push_front(event);
    }

    fn finish_delivery(&mut self, over_completed: bool) -> EngineSignal {
        if let Some(signal) = self.check_completion() {
            return signal;
        }

        if self.striker.is_none() || self.non_striker.is_none() {
            self.phase = MatchPhase::AwaitingNewBatsman { then_bowler: over_completed };
            return EngineSignal::SelectNewBatsman;
        }

        if over_completed {
            self.phase = MatchPhase::AwaitingNextBowler;
            return EngineSignal::SelectBowler;
        }

        EngineSignal::Continue
    }

    fn check_completion(&mut self) -> Option<EngineSignal> {
        if self.current.number == 2 {
            if let Some(target) = self.target {
                if self.current.runs >= target {
                    return Some(self.complete_match());
                }
            }
        }

        if self.current.is_all_out() || self.current.overs_complete(self.setup.over_limit) {
            return Some(self.end_innings());
        }

        None
    }

    fn end_innings(&mut self) -> EngineSignal {
        if self.current.number != 1 {
            return self.complete_match();
        }

        self.clear_crease();
        let target = self.current.runs + 1;
        self.target = Some(target);
        self.phase = MatchPhase::InningsBreak;

        info!(
            match_id = %self.id,
            batting = %self.current.batting_team,
            score = %format!("{}/{}", self.current.runs, self.current.wickets),
            overs = %self.current.overs_display(),
            target,
            "first innings complete"
        );
        EngineSignal::InningsComplete { target }
    }

    fn complete_match(&mut self) -> EngineSignal {
        self.clear_crease();
        let outcome = self.decide_outcome();
        let winner = outcome.winning_team.clone();

        info!(match_id = %self.id, winner = %winner, margin = %outcome.margin, "match complete");

        self.outcome = Some(outcome);
        self.phase = MatchPhase::MatchComplete;
        EngineSignal::MatchComplete { winner }
    }

    /// Compare the chase with `target - 1`. A second innings that never
    /// started counts as 0 runs.
    fn decide_outcome(&self) -> MatchOutcome {
        let first = self.innings(1).unwrap_or(&self.current);
        let defended = self.target.unwrap_or(first.runs + 1) - 1;

        let (chased, wickets_lost, all_out_at) = match self.innings(2) {
            Some(second) => (second.runs, second.wickets, second.all_out_at),
            None => (0, 0, self.config.all_out_wickets),
        };

        if chased > defended {
            MatchOutcome {
                winning_team: first.bowling_team.clone(),
                margin: format!("{} wickets", all_out_at.saturating_sub(wickets_lost)),
            }
        } else if chased < defended {
            MatchOutcome {
                winning_team: first.batting_team.clone(),
                margin: format!("{} runs", defended - chased),
            }
        } else {
            MatchOutcome { winning_team: TIE.to_string(), margin: TIE.to_string() }
        }
    }
}

pub const TIE: &str = "Tie";

fn runs_phrase(runs: u32) -> String {
    match runs {
        0 => "no run".to_string(),
        1 => "1 run".to_string(),
        4 => "FOUR".to_string(),
        6 => "SIX".to_string(),
        n => format!("{n} runs"),
    }
}

fn extra_phrase(extra: ExtraType, runs: u32) -> String {
    if runs == 1 {
        format!("1 {}", extra.label())
    } else {
        format!("{} {}s", runs, extra.label())
    }
}
