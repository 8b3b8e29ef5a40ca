use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{config_from_env, ScoringConfig};
use crate::engine::{
    generate_scorecard, EngineSignal, MatchEngine, MatchPhase, MatchSnapshot, ScoringCommand,
};
use crate::error::{error_codes, ScoringError};
use crate::models::{MatchSetup, MatchSummaryRecord, Scorecard};
use crate::registry;
use crate::SCHEMA_VERSION;

fn err_code(code: &str, message: impl std::fmt::Display) -> String {
    format!("{code}: {message}")
}

fn check_schema_version(found: u8) -> Result<(), String> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(err_code(
            error_codes::UNSUPPORTED_SCHEMA,
            format!("Unsupported schema version: {found} (expected {SCHEMA_VERSION})"),
        ))
    }
}

/// Explicit config wins; otherwise `CRICKET_SCORING_CONFIG_PATH`, then defaults.
fn resolve_config(config: Option<ScoringConfig>) -> Result<ScoringConfig, String> {
    match config {
        Some(config) => {
            config.validate().map_err(|e| err_code(error_codes::INVALID_SETUP, e))?;
            Ok(config)
        }
        None => config_from_env().map_err(|e| err_code(error_codes::INVALID_SETUP, e)),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| err_code(error_codes::SERIALIZATION, e))
}

#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
    pub schema_version: u8,
    pub setup: MatchSetup,
    #[serde(default)]
    pub config: Option<ScoringConfig>,
    #[serde(default)]
    pub commands: Vec<ScoringCommand>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplayResponse {
    pub schema_version: u8,
    pub phase: MatchPhase,
    pub last_signal: Option<EngineSignal>,
    pub scorecard: Scorecard,
    /// Present once the match is complete.
    pub summary: Option<MatchSummaryRecord>,
}

/// Score a whole match from a setup and a command list and return the
/// resulting scorecard. Nothing is registered.
pub fn replay_match_json(request_json: &str) -> Result<String, String> {
    let request: ReplayRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::SERIALIZATION, format!("Invalid JSON request: {e}")))?;
    check_schema_version(request.schema_version)?;

    let config = resolve_config(request.config)?;
    let mut engine =
        MatchEngine::new(request.setup, config).map_err(|e| e.to_coded_string())?;

    let mut last_signal = None;
    for (index, command) in request.commands.iter().enumerate() {
        match engine.apply(command) {
            Ok(signal) => last_signal = Some(signal),
            Err(error) => {
                warn!(match_id = %engine.id(), index, command = command.name(), %error, "replay rejected");
                return Err(err_code(
                    error.code(),
                    format!("command {index} ({}): {error}", command.name()),
                ));
            }
        }
    }

    debug!(match_id = %engine.id(), commands = request.commands.len(), "replay complete");

    let summary = engine.phase().is_terminal().then(|| MatchSummaryRecord::from_engine(&engine));
    to_json(&ReplayResponse {
        schema_version: SCHEMA_VERSION,
        phase: engine.phase(),
        last_signal,
        scorecard: generate_scorecard(&engine),
        summary,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateMatchRequest {
    pub schema_version: u8,
    pub setup: MatchSetup,
    #[serde(default)]
    pub config: Option<ScoringConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMatchResponse {
    pub schema_version: u8,
    pub match_id: String,
    pub signal: EngineSignal,
}

/// Register a live match for incremental scoring.
pub fn create_match_json(request_json: &str) -> Result<String, String> {
    let request: CreateMatchRequest = serde_json::from_str(request_json)
        .map_err(|e| err_code(error_codes::SERIALIZATION, format!("Invalid JSON request: {e}")))?;
    check_schema_version(request.schema_version)?;

    let config = resolve_config(request.config)?;
    let match_id = registry::create_match(request.setup, config).map_err(|e| {
        warn!(%e, "match creation rejected");
        e.to_coded_string()
    })?;

    to_json(&CreateMatchResponse {
        schema_version: SCHEMA_VERSION,
        match_id,
        signal: EngineSignal::SelectOpeners,
    })
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub schema_version: u8,
    pub signal: EngineSignal,
    pub snapshot: MatchSnapshot,
}

/// Apply one command to a registered match and return the fresh snapshot.
pub fn apply_command_json(match_id: &str, command_json: &str) -> Result<String, String> {
    let command: ScoringCommand = serde_json::from_str(command_json)
        .map_err(|e| err_code(error_codes::SERIALIZATION, format!("Invalid command: {e}")))?;

    let outcome = registry::with_match(match_id, |engine| {
        engine.apply(&command).map(|signal| (signal, engine.snapshot()))
    })
    .and_then(|result| result);

    match outcome {
        Ok((signal, snapshot)) => {
            to_json(&CommandResponse { schema_version: SCHEMA_VERSION, signal, snapshot })
        }
        Err(error) => {
            warn!(match_id, command = command.name(), %error, "command rejected");
            Err(error.to_coded_string())
        }
    }
}

/// Current scorecard of a registered match.
pub fn scorecard_json(match_id: &str) -> Result<String, String> {
    let card = registry::with_match(match_id, |engine| generate_scorecard(engine))
        .map_err(|e: ScoringError| e.to_coded_string())?;
    to_json(&card)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::make_setup;
    use serde_json::{json, Value};

    fn setup_value(id: Option<&str>) -> Value {
        let mut setup = make_setup(1);
        setup.id = id.map(str::to_string);
        serde_json::to_value(setup).unwrap()
    }

    fn one_over_innings() -> Vec<Value> {
        let mut commands = vec![
            json!({"command": "select_openers", "striker": "a1", "non_striker": "a2"}),
            json!({"command": "select_bowler", "bowler": "b11"}),
            json!({"command": "extra", "extra_type": "wide"}),
        ];
        commands.extend((0..6).map(|_| json!({"command": "runs", "runs": 1})));
        commands
    }

    #[test]
    fn test_replay_full_match() {
        let mut commands = one_over_innings();
        commands.extend([
            json!({"command": "start_second_innings"}),
            json!({"command": "select_openers", "striker": "b1", "non_striker": "b2"}),
            json!({"command": "select_bowler", "bowler": "a11"}),
            json!({"command": "wicket", "dismissal": "bowled", "new_batsman": "b3"}),
            json!({"command": "runs", "runs": 6}),
            json!({"command": "runs", "runs": 2}),
        ]);
        let request = json!({
            "schema_version": 1,
            "setup": setup_value(Some("replay-1")),
            "commands": commands,
        });

        let response: ReplayResponse =
            serde_json::from_str(&replay_match_json(&request.to_string()).unwrap()).unwrap();
        assert_eq!(response.phase, MatchPhase::MatchComplete);
        assert_eq!(response.scorecard.innings(1).unwrap().runs, 7);
        let result = response.scorecard.result.unwrap();
        assert_eq!((result.winning_team.as_str(), result.margin.as_str()), ("Team B", "9 wickets"));
        assert!(response.summary.is_some());
        // Nothing was registered.
        assert!(!registry::match_ids().contains(&"replay-1".to_string()));
    }

    #[test]
    fn test_replay_reports_failing_command() {
        let mut commands = one_over_innings();
        commands.push(json!({"command": "runs", "runs": 5}));
        let request = json!({"schema_version": 1, "setup": setup_value(None), "commands": commands});

        let err = replay_match_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with("INVALID_STATE: command 9 (runs)"), "{err}");
    }

    #[test]
    fn test_replay_rejects_invalid_input() {
        let err = replay_match_json("{not json").unwrap_err();
        assert!(err.starts_with("SERIALIZATION:"), "{err}");

        let request = json!({"schema_version": 9, "setup": setup_value(None)});
        let err = replay_match_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with("UNSUPPORTED_SCHEMA:"), "{err}");

        let mut setup = setup_value(None);
        setup["overLimit"] = json!(0);
        let request = json!({"schema_version": 1, "setup": setup});
        let err = replay_match_json(&request.to_string()).unwrap_err();
        assert!(err.starts_with("INVALID_SETUP:"), "{err}");
    }

    #[test]
    fn test_live_match_over_json() {
        let request = json!({
            "schema_version": 1,
            "setup": setup_value(None),
            "config": {"allow_consecutive_overs": false},
        });
        let created: CreateMatchResponse =
            serde_json::from_str(&create_match_json(&request.to_string()).unwrap()).unwrap();
        let id = created.match_id;

        apply_command_json(&id, r#"{"command":"select_openers","striker":"a1","non_striker":"a2"}"#)
            .unwrap();
        apply_command_json(&id, r#"{"command":"select_bowler","bowler":"b11"}"#).unwrap();
        let response: CommandResponse = serde_json::from_str(
            &apply_command_json(&id, r#"{"command":"runs","runs":4}"#).unwrap(),
        )
        .unwrap();
        assert_eq!(response.signal, EngineSignal::Continue);
        assert_eq!(response.snapshot.score, "4/0");

        let err = apply_command_json(&id, r#"{"command":"runs","runs":-1}"#).unwrap_err();
        assert!(err.starts_with("INVALID_DELIVERY:"), "{err}");

        let card: Scorecard = serde_json::from_str(&scorecard_json(&id).unwrap()).unwrap();
        assert_eq!(card.innings[0].runs, 4);

        registry::remove_match(&id).unwrap();
        let err = apply_command_json(&id, r#"{"command":"end_match"}"#).unwrap_err();
        assert!(err.starts_with("UNKNOWN_MATCH:"), "{err}");
    }
}
