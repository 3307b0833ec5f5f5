use thiserror::Error;

/// Failure of a wallet store operation. Addresses are carried as hex text.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no wallet record at {0}")]
    NotFound(String),

    #[error("wallet record already exists at {0}")]
    Duplicate(String),

    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored record could not be encoded or decoded.
    #[error("wallet record codec error: {0}")]
    Serialization(String),
}

