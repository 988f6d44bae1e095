// Error handling for urlbind

use thiserror::Error;

/// Library error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// The template contains a token that can never be a parameter name.
    #[error("{0} is not a valid parameter name.")]
    InvalidParameterName(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Invalid resource configuration: {0}")]
    Config(String),
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;
