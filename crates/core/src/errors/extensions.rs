//! Context for library errors

use super::types::{Error, Result};

impl Error {
    /// Prefix the message with `context`, keeping the variant and its source
    #[must_use]
    pub fn context(self, context: impl Into<String>) -> Self {
        let context = context.into();
        match self {
            Error::Configuration { message } => Error::Configuration {
                message: format!("{context}: {message}"),
            },
            Error::InvalidSetting {
                key,
                value,
                message,
            } => Error::InvalidSetting {
                key,
                value,
                message: format!("{context}: {message}"),
            },
            Error::Json { message, source } => Error::Json {
                message: format!("{context}: {message}"),
                source,
            },
        }
    }
}

/// Attach context to any result whose error converts into [`Error`]
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let error: Error = e.into();
            error.context(context)
        })
    }
}
