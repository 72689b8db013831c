use thiserror::Error;

/// Errors raised while refreshing the rate table.
///
/// These are recovered locally: the oracle keeps serving its active table, so they are logged and
/// counted but never reach a user.
#[derive(Debug, Error)]
pub enum RatesError {
    /// The rate provider could not be reached or returned a failure status.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The provider response did not contain a usable rate table.
    #[error("invalid rate response: {0}")]
    InvalidResponse(String),
}
