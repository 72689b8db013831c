use super::invalid_params;
use thiserror::Error;

/// Errors related to quote computation and export.
///
/// An incomplete selection during computation is not an error; see
/// [`QuoteOutcome`](crate::types::QuoteOutcome). These errors cover malformed references and
/// export requests that cannot be honored.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The selection references a package the catalog does not carry.
    #[error("unknown package: {0}")]
    UnknownPackage(String),
    /// The selection references an extra the catalog does not carry.
    #[error("unknown extra: {0}")]
    UnknownExtra(String),
    /// Export was requested for a selection that is still incomplete.
    #[error("selection is incomplete, nothing to export")]
    IncompleteSelection,
}

impl From<QuoteError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::UnknownPackage(..)
            | QuoteError::UnknownExtra(..)
            | QuoteError::IncompleteSelection => invalid_params(err.to_string()),
        }
    }
}
