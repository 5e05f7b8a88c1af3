use std::fmt;
use thiserror::Error;

/// The form input an [`Error::InvalidInput`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Media,
}

impl FormField {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Media => "media",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{message}")]
    InvalidInput { field: FormField, message: String },

    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl Error {
    pub(crate) fn invalid(field: FormField, message: &str) -> Self {
        Error::InvalidInput {
            field,
            message: message.to_string(),
        }
    }

    /// The offending form field, if this is a validation error.
    pub fn field(&self) -> Option<FormField> {
        match self {
            Error::InvalidInput { field, .. } => Some(*field),
            _ => None,
        }
    }
}
