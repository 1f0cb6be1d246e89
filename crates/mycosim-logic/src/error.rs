//! Error types for input parsing and scenario loading.

use thiserror::Error;

/// Errors surfaced by the scoring crate.
///
/// Scoring itself never fails; only turning raw caller input into a
/// [`ParameterSnapshot`](crate::params::ParameterSnapshot) can.
#[derive(Debug, Error)]
pub enum SimError {
    /// A numeric parameter was absent or could not be read as a finite number.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// A scenario document was not valid JSON or had the wrong shape.
    #[error("failed to parse scenario: {0}")]
    Scenario(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_names_field() {
        let err = SimError::invalid_input("moisture", "`abc` is not a number");
        assert_eq!(
            err.to_string(),
            "invalid input for moisture: `abc` is not a number"
        );
    }

    #[test]
    fn test_scenario_error_wraps_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: SimError = json_err.into();
        assert!(matches!(err, SimError::Scenario(_)));
        assert!(err.to_string().starts_with("failed to parse scenario"));
    }
}
