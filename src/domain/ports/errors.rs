use thiserror::Error;

/// Credential store errors
#[derive(Debug, Error)]
pub enum CredentialStoreError {
    /// Reading or writing the backing storage failed
    #[error("Credential store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data could not be encoded or decoded
    #[error("Credential store is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
