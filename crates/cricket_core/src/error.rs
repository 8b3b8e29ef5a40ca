use thiserror::Error;

/// Stable machine-readable codes for JSON boundary errors.
pub mod error_codes {
    pub const INVALID_SELECTION: &str = "INVALID_SELECTION";
    pub const INVALID_DELIVERY: &str = "INVALID_DELIVERY";
    pub const INVALID_STATE: &str = "INVALID_STATE";
    pub const INVALID_SETUP: &str = "INVALID_SETUP";
    pub const SERIALIZATION: &str = "SERIALIZATION";
    pub const UNKNOWN_MATCH: &str = "UNKNOWN_MATCH";
    pub const UNSUPPORTED_SCHEMA: &str = "UNSUPPORTED_SCHEMA";
}

/// Every engine failure is a caller-correctable input problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid delivery: {0}")]
    InvalidDelivery(String),

    #[error("Cannot {operation} while {phase}")]
    InvalidState { operation: &'static str, phase: &'static str },

    #[error("Invalid match setup: {0}")]
    InvalidSetup(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown match: {0}")]
    UnknownMatch(String),
}

impl ScoringError {
    pub fn code(&self) -> &'static str {
        match self {
            ScoringError::InvalidSelection(_) => error_codes::INVALID_SELECTION,
            ScoringError::InvalidDelivery(_) => error_codes::INVALID_DELIVERY,
            ScoringError::InvalidState { .. } => error_codes::INVALID_STATE,
            ScoringError::InvalidSetup(_) => error_codes::INVALID_SETUP,
            ScoringError::Serialization(_) => error_codes::SERIALIZATION,
            ScoringError::UnknownMatch(_) => error_codes::UNKNOWN_MATCH,
        }
    }

    /// `"<CODE>: <message>"`, the shape returned by the JSON API.
    pub fn to_coded_string(&self) -> String {
        format!("{}: {}", self.code(), self)
    }

    pub(crate) fn selection(message: impl Into<String>) -> Self {
        ScoringError::InvalidSelection(message.into())
    }

    pub(crate) fn delivery(message: impl Into<String>) -> Self {
        ScoringError::InvalidDelivery(message.into())
    }
}

impl From<serde_json::Error> for ScoringError {
    fn from(err: serde_json::Error) -> Self {
        ScoringError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
