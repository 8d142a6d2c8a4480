//! Builder methods for creating errors with context

use super::types::Error;

impl Error {
    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Create an invalid setting error
    #[must_use]
    pub fn invalid_setting(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Error::InvalidSetting {
            key: key.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}
