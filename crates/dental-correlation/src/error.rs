//! Error types for correlation runs.

use dental_expression::ExpressionError;
use thiserror::Error;

/// Errors that can occur during a correlation run.
///
/// Absence of a nearest event is an expected outcome and is modeled as
/// `Option`, not as an error. Everything here aborts the run when it reaches
/// the top level; rows already emitted to the report sink remain written.
#[derive(Error, Debug)]
pub enum CorrelationError {
    /// Expression handling failed (e.g. no tooth procedure site).
    #[error("expression error: {0}")]
    Expression(#[from] ExpressionError),

    /// The terminology-expansion call failed.
    #[error("terminology expansion failed for constraint '{constraint}': {message}")]
    Expansion {
        /// The ECL constraint that was being expanded.
        constraint: String,
        /// Transport error or the server's response text.
        message: String,
    },

    /// The event store was unavailable or returned a malformed result.
    #[error("event store error: {0}")]
    DataAccess(String),

    /// Writing a report row failed.
    #[error("report output error: {0}")]
    Report(String),
}

/// Result type for correlation operations.
pub type CorrelationResult<T> = std::result::Result<T, CorrelationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expansion_display_includes_server_text() {
        let err = CorrelationError::Expansion {
            constraint: "<<80967001".to_string(),
            message: "401 Unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "terminology expansion failed for constraint '<<80967001': 401 Unauthorized"
        );
    }

    #[test]
    fn test_from_expression_error() {
        let inner = ExpressionError::MissingToothSite {
            expression: "234789004".to_string(),
        };
        let err: CorrelationError = inner.into();
        assert!(matches!(err, CorrelationError::Expression(_)));
    }

    #[test]
    fn test_data_access_display() {
        let err = CorrelationError::DataAccess("events.csv not found".to_string());
        assert_eq!(err.to_string(), "event store error: events.csv not found");
    }
}
