//! Serializable form of every engine operation, for replay and for callers
//! that only speak JSON.

use super::match_engine::MatchEngine;
use super::phase::EngineSignal;
use super::rules::non_negative_runs;
use crate::error::Result;
use crate::models::{DismissalType, ExtraType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ScoringCommand {
    SelectOpeners {
        striker: String,
        non_striker: String,
    },
    SelectBowler {
        bowler: String,
    },
    SelectNewBatsman {
        batsman: String,
    },
    /// Signed so that a negative count surfaces as `InvalidDelivery`
    /// instead of a parse error.
    Runs {
        runs: i64,
    },
    Extra {
        extra_type: ExtraType,
        #[serde(default = "default_extra_runs")]
        runs: i64,
    },
    Wicket {
        dismissal: DismissalType,
        #[serde(default)]
        new_batsman: Option<String>,
    },
    StartSecondInnings,
    EndMatch,
}

fn default_extra_runs() -> i64 {
    1
}

impl ScoringCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ScoringCommand::SelectOpeners { .. } => "select_openers",
            ScoringCommand::SelectBowler { .. } => "select_bowler",
            ScoringCommand::SelectNewBatsman { .. } => "select_new_batsman",
            ScoringCommand::Runs { .. } => "runs",
            ScoringCommand::Extra { .. } => "extra",
            ScoringCommand::Wicket { .. } => "wicket",
            ScoringCommand::StartSecondInnings => "start_second_innings",
            ScoringCommand::EndMatch => "end_match",
        }
    }
}

impl MatchEngine {
    pub fn apply(&mut self, command: &ScoringCommand) -> Result<EngineSignal> {
        match command {
            ScoringCommand::SelectOpeners { striker, non_striker } => {
                self.select_openers(striker, non_striker)
            }
            ScoringCommand::SelectBowler { bowler } => self.select_bowler(bowler),
            ScoringCommand::SelectNewBatsman { batsman } => self.select_new_batsman(batsman),
            ScoringCommand::Runs { runs } => self.record_runs(non_negative_runs(*runs)?),
            ScoringCommand::Extra { extra_type, runs } => {
                self.record_extra(*extra_type, non_negative_runs(*runs)?)
            }
            ScoringCommand::Wicket { dismissal, new_batsman } => {
                self.record_wicket(*dismissal, new_batsman.as_deref())
            }
            ScoringCommand::StartSecondInnings => self.start_second_innings(),
            ScoringCommand::EndMatch => self.end_match(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use crate::test_support::ready_engine;

    #[test]
    fn test_parse_commands() {
        let cmd: ScoringCommand =
            serde_json::from_str(r#"{"command":"extra","extra_type":"wide"}"#).unwrap();
        assert_eq!(cmd, ScoringCommand::Extra { extra_type: ExtraType::Wide, runs: 1 });

        let cmd: ScoringCommand = serde_json::from_str(
            r#"{"command":"wicket","dismissal":"run_out","new_batsman":"a3"}"#,
        )
        .unwrap();
        assert_eq!(cmd.name(), "wicket");
    }

    #[test]
    fn test_negative_runs_rejected_as_delivery_error() {
        let mut engine = ready_engine(20);
        let err = engine.apply(&ScoringCommand::Runs { runs: -2 }).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidDelivery(_)));

        let err = engine
            .apply(&ScoringCommand::Extra { extra_type: ExtraType::Bye, runs: -1 })
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidDelivery(_)));
        assert_eq!(engine.current_innings().runs, 0);
    }

    #[test]
    fn test_extra_too_large_for_the_total_is_rejected() {
        let mut engine = ready_engine(20);
        engine.apply(&ScoringCommand::Runs { runs: 1 }).unwrap();
        let err = engine
            .apply(&ScoringCommand::Extra { extra_type: ExtraType::Bye, runs: u32::MAX as i64 })
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidDelivery(_)));
        assert_eq!((engine.current_innings().runs, engine.current_innings().balls), (1, 1));
    }

    #[test]
    fn test_apply_dispatches() {
        let mut engine = ready_engine(20);
        engine.apply(&ScoringCommand::Runs { runs: 4 }).unwrap();
        engine
            .apply(&ScoringCommand::Wicket { dismissal: DismissalType::Stumped, new_batsman: None })
            .unwrap();
        let signal =
            engine.apply(&ScoringCommand::SelectNewBatsman { batsman: "a4".into() }).unwrap();
        assert_eq!(signal, EngineSignal::Continue);
        assert_eq!(engine.striker(), Some("a4"));
    }
}
