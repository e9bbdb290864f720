//! Error types raised while reading journal data for recommendations.
#![forbid(unsafe_code)]

use strainwise_core::StoreError;
use thiserror::Error;

/// Errors raised by store-backed recommendation requests.
///
/// The engine itself is infallible; only reading the journal can fail.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// Reading the journal snapshot failed.
    #[error("failed to read the journal")]
    Store(#[from] StoreError),
}
