use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site config decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("local storage access failed: {0}")]
    Access(String),
}
