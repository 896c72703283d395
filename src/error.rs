//! Error types for the rating engines
//!
//! Every fallible operation returns the crate-wide anyhow [`Result`]; callers
//! that need to tell failures apart downcast to [`RatingError`].

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for rating and prediction failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("No rating for team: {team}")]
    MissingRating { team: String },

    #[error("Malformed game record: {reason}")]
    MalformedRecord { reason: String },

    #[error("Rating for team {team} is not finite: {value}")]
    NonFiniteRating { team: String, value: f64 },

    #[error("Invalid matchup id: {id}")]
    InvalidMatchupId { id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RatingError {
    pub(crate) fn missing(team: impl std::fmt::Display) -> Self {
        RatingError::MissingRating {
            team: team.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        RatingError::MalformedRecord {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        RatingError::ConfigurationError {
            message: message.into(),
        }
    }
}

/// Extract the [`RatingError`] carried by an anyhow error, if any
pub fn rating_error(err: &anyhow::Error) -> Option<&RatingError> {
    err.downcast_ref::<RatingError>()
}
