pub mod command;
pub mod highlights;
pub mod match_engine;
pub mod phase;
pub mod rules;
pub mod scorecard;
pub mod snapshot;


pub use command::ScoringCommand;
pub use highlights::{generate_highlights, Highlight, HighlightType};
pub use match_engine::{MatchEngine, TIE};
pub use phase::{EngineSignal, MatchPhase};
pub use scorecard::{generate_scorecard, match_status};
pub use snapshot::{BatsmanFigures, BowlerFigures, ChaseState, MatchSnapshot};
