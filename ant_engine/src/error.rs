// error.rs - Rejections raised while validating a configuration

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Why a proposed configuration was refused. Only the first violated rule
/// is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The text was not well-formed JSON.
    #[error("configuration is not valid JSON: {0}")]
    Malformed(String),

    #[error("configuration must be a JSON object")]
    NotAnObject,

    #[error("configuration needs a non-empty `name`")]
    MissingName,

    #[error("`colors` must be a whole number of at least 1")]
    InvalidColorCount,

    #[error("`states` must be a whole number of at least 1")]
    InvalidStateCount,

    #[error("`transitions` must be a list")]
    MissingTransitions,

    /// The table must hold `states * (colors + 1)` entries.
    #[error("expected {expected} transitions (states * (colors + 1)), found {found}")]
    TransitionCountMismatch { expected: usize, found: usize },

    #[error("transition {0}: `newColor` must be a whole number in [0, colors)")]
    NewColorOutOfRange(usize),

    #[error("transition {0}: `turn` must be 0 (left) or 1 (right)")]
    InvalidTurn(usize),

    #[error("transition {0}: `nextState` must be a whole number in [0, states)")]
    NextStateOutOfRange(usize),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Malformed(err.to_string())
    }
}
