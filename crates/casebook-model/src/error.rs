//! Model errors

/// Errors raised while building or converting records
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A wire identity key did not have three pipe-separated parts
    #[error("invalid submission key: {0}")]
    InvalidKey(String),

    /// A merged field map could not be read back as a record
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A record serialized to something other than a JSON object
    #[error("record is not a JSON object")]
    NotAnObject,
}
