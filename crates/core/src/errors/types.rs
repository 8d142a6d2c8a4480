//! Core error type definitions

/// Result type alias for library-level operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the library itself, as opposed to the errors that flow
/// through checked operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration errors
    Configuration { message: String },

    /// A setting held a value that could not be interpreted
    InvalidSetting {
        key: String,
        value: String,
        message: String,
    },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}
