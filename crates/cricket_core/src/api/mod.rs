pub mod json_api;

pub use json_api::{
    apply_command_json, create_match_json, replay_match_json, scorecard_json, CommandResponse,
    CreateMatchRequest, CreateMatchResponse, ReplayRequest, ReplayResponse,
};
