//! Error types for expression handling.

use thiserror::Error;

/// Errors that can occur while working with postcoordinated expressions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// The expression resolved no tooth procedure site, so no per-tooth
    /// constraint can be derived from it. Usually a data-quality problem in
    /// the stored code.
    #[error("expression '{expression}' has no tooth procedure site")]
    MissingToothSite {
        /// The offending expression in brief compositional grammar.
        expression: String,
    },
}

/// Result type for expression operations.
pub type ExpressionResult<T> = std::result::Result<T, ExpressionError>;
