//! Cart store errors.

use thiserror::Error;

/// Errors from either cart tier.
///
/// These never reach a customer-facing caller: the sync service logs them
/// and degrades to whichever copy is still readable.
#[derive(Debug, Error)]
pub enum CartStoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),

    #[error("cart blob i/o error")]
    Io(#[from] std::io::Error),

    #[error("cart blob serialization error")]
    Serde(#[from] serde_json::Error),
}
