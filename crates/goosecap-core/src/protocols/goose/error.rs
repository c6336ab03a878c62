use thiserror::Error;

/// Errors returned by GOOSE parsing and reading.
///
/// # Examples
/// ```
/// use goosecap_core::protocols::goose::GooseError;
///
/// let err = GooseError::TruncatedHeader { needed: 8, actual: 3 };
/// assert!(err.to_string().contains("truncated GOOSE header"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GooseError {
    #[error("truncated GOOSE header: need {needed} bytes, got {actual}")]
    TruncatedHeader { needed: usize, actual: usize },
}
