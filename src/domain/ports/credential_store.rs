use super::errors::CredentialStoreError;

/// Port trait for the host's persistent key-value storage
///
/// Keys are plain strings (`tokenName`, `tokenValue`, `fishpi_api_key`).
/// Reads and writes are atomic per key only; token name and value are written
/// as two sequential calls with no transaction around them.
pub trait CredentialStore: Send + Sync {
    /// Read a value; a missing key is `None`
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), CredentialStoreError>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<(), CredentialStoreError>;
}
