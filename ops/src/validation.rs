//! Stateless operation validation.

use thiserror::Error;

/// Rejection of a structurally invalid operation. These checks need no
/// chain state and run before fee preparation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fee amount must be non-negative")]
    NegativeFee,

    #[error("amount must be positive")]
    NonPositiveAmount,

    #[error("sending account and receiving account must differ")]
    SelfTransfer,

    #[error("issuer must differ from the account being overridden")]
    IssuerIsSource,

    #[error("url length {len} exceeds maximum {max}")]
    UrlTooLong { len: usize, max: usize },

    #[error("market fee percent {0} exceeds 100%")]
    MarketFeePercentTooHigh(u16),

    #[error("max market fee {0} out of range")]
    MaxMarketFeeOutOfRange(i64),

    #[error("{0}")]
    InvalidParameters(#[from] stele_types::InvalidParameters),
}

/// Require a url to fit the protocol bound.
pub fn check_url(url: &str) -> Result<(), ValidationError> {
    if url.len() >= stele_types::ids::MAX_URL_LENGTH {
        return Err(ValidationError::UrlTooLong {
            len: url.len(),
            max: stele_types::ids::MAX_URL_LENGTH,
        });
    }
    Ok(())
}
