//! Error type for the order book.
//!
//! Only construction-time validation and fatal conditions are errors.
//! Operation-level rejections (bad price on `add`, unknown id on
//! `cancel`/`amend_volume`) are plain result values, see
//! [`AddOutcome`](crate::types::AddOutcome).

use thiserror::Error;

/// Errors raised by order construction and book internals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    /// Price must be strictly positive
    #[error("invalid price: {0} (must be > 0)")]
    InvalidPrice(u64),

    /// Volume must be strictly positive
    #[error("invalid volume: must be > 0")]
    InvalidVolume,

    /// Every `u64` order id has been issued
    #[error("order id space exhausted")]
    IdSpaceExhausted,

    /// SSZ encoding failed while computing the state root
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Index and price levels disagree
    #[error("book invariant violated: {0}")]
    Corrupted(String),
}
