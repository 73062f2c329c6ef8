use thiserror::Error;

use crate::data_source::LoadError;
use crate::session::{Operation, SessionState};

/// Validation and contract errors exposed by `tickguess-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol contains whitespace or control character {ch:?} at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("date must be an ISO calendar date (YYYY-MM-DD): '{value}'")]
    InvalidDate { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },

    #[error("series contains duplicate date '{date}'")]
    DuplicateDate { date: String },
}

/// Configuration errors raised while reading environment overrides.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} cannot be empty")]
    Empty { var: &'static str },

    #[error("{var} must be greater than zero")]
    Zero { var: &'static str },
}

/// Every failure a game operation can surface.
///
/// None of these are fatal: the controller renders them as error status and
/// leaves the session in a safe state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    InvalidInput(#[from] ValidationError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("no candidate start day with enough surrounding history")]
    NotEnoughData,

    #[error("no more future trading days available")]
    NoMoreData,

    #[error("cannot {operation} while session is {state}")]
    InvalidState {
        operation: Operation,
        state: SessionState,
    },
}

impl GameError {
    pub const fn invalid_state(operation: Operation, state: SessionState) -> Self {
        Self::InvalidState { operation, state }
    }

    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "game.invalid_input",
            Self::Load(error) => error.code(),
            Self::NotEnoughData => "game.not_enough_data",
            Self::NoMoreData => "game.no_more_data",
            Self::InvalidState { .. } => "game.invalid_state",
        }
    }

    /// The provider or the network failed, as opposed to a player mistake or
    /// a ticker without playable history.
    pub const fn is_upstream_failure(&self) -> bool {
        matches!(
            self,
            Self::Load(LoadError::MalformedResponse { .. } | LoadError::NetworkError { .. })
        )
    }

    /// Human-readable status text for the presentation layer.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(ValidationError::EmptySymbol) => {
                String::from("Please enter a stock ticker.")
            }
            Self::InvalidInput(error) => format!("Invalid ticker: {error}."),
            Self::Load(error) => error.user_message(),
            Self::NotEnoughData => {
                String::from("Not enough data in the last 100 days for this ticker.")
            }
            Self::NoMoreData => String::from("No more future trading days available."),
            Self::InvalidState { operation, state } => match (operation, state) {
                (_, SessionState::Loading) => String::from("A game is already loading."),
                (Operation::Start, SessionState::Playing) => {
                    String::from("A game is in progress. End it before starting a new one.")
                }
                (Operation::Predict, SessionState::Finished) => {
                    String::from("Game is over. Start a new game to keep playing.")
                }
                _ => String::from("No game in progress. Start a new game first."),
            },
        }
    }
}
