use thiserror::Error;

/// Error produced when the engine is used incorrectly.
///
/// Failing to find a route is not an error: searches report that
/// by returning `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Frontier tree has not been fitted")]
    NotFitted,

    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
}

/// Result when an engine operation might fail.
pub type Result<T> = std::result::Result<T, SearchError>;
