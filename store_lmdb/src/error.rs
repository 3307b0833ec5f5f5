use thiserror::Error;

#[derive(Debug, Error)]
pub enum LmdbError {
    #[error("LMDB error: {0}")]
    Heed(#[from] heed::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("unsupported schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}

impl From<LmdbError> for gate_store::StoreError {
    fn from(e: LmdbError) -> Self {
        match e {
            LmdbError::Serialization(msg) => gate_store::StoreError::Serialization(msg),
            other => gate_store::StoreError::Backend(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_store::StoreError;

    #[test]
    fn converts_into_store_errors() {
        assert!(matches!(
            StoreError::from(LmdbError::Serialization("bad record".into())),
            StoreError::Serialization(m) if m == "bad record"
        ));
        assert!(matches!(
            StoreError::from(LmdbError::SchemaVersion { found: 2, expected: 1 }),
            StoreError::Backend(m) if m.contains("schema version 2")
        ));
    }
}
