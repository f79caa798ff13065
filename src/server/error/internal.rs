use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A string column holds a value outside its enumeration.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Column {column} holds unknown value '{value}'")]
    InvalidEnumValue {
        /// Name of the column that was being decoded
        column: &'static str,
        /// The stored value
        value: String,
    },

    /// Serializing a cached snapshot or a realtime event failed.
    #[error("Failed to serialize payload: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Signing an access or refresh token failed.
    #[error("Failed to sign token: {0}")]
    TokenSigning(#[from] jsonwebtoken::errors::Error),

    /// Hashing or parsing a stored password hash failed.
    #[error("Password hash error: {0}")]
    PasswordHash(String),
}
