//! Quoter error types.

use thiserror::Error;

mod quote;
pub use quote::QuoteError;

mod rates;
pub use rates::RatesError;

/// The overarching error type returned by the quote service.
#[derive(Debug, Error)]
pub enum QuoterError {
    /// Errors related to quote computation and export.
    #[error(transparent)]
    Quote(#[from] QuoteError),
    /// Errors related to the rate table.
    #[error(transparent)]
    Rates(#[from] RatesError),
    /// An internal error occurred.
    #[error(transparent)]
    Internal(#[from] eyre::Error),
}

impl From<QuoterError> for jsonrpsee::types::error::ErrorObject<'static> {
    fn from(err: QuoterError) -> Self {
        match err {
            QuoterError::Quote(inner) => inner.into(),
            QuoterError::Rates(_) | QuoterError::Internal(_) => internal_rpc(err.to_string()),
        }
    }
}

/// Constructs an invalid params RPC error.
pub fn invalid_params(msg: String) -> jsonrpsee::types::error::ErrorObject<'static> {
    jsonrpsee::types::error::ErrorObject::owned::<()>(
        jsonrpsee::types::error::INVALID_PARAMS_CODE,
        msg,
        None,
    )
}

/// Constructs an internal RPC error.
pub fn internal_rpc(msg: String) -> jsonrpsee::types::error::ErrorObject<'static> {
    jsonrpsee::types::error::ErrorObject::owned::<()>(
        jsonrpsee::types::error::INTERNAL_ERROR_CODE,
        msg,
        None,
    )
}
