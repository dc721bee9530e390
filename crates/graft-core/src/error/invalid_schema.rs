use super::Error;

/// Error when a schema definition is invalid.
///
/// This occurs when:
/// - A relation references a model that was never registered
/// - A relation's reverse is ambiguous (more than one candidate on the target)
/// - A `has_many`/`has_one` has no matching `belongs_to` on the target
/// - A model has no primary key, or a relation field is marked as one
///
/// These errors are caught while the schema is built, before any merge runs.
#[derive(Debug)]
pub(super) struct InvalidSchemaError {
    message: Box<str>,
}

impl std::error::Error for InvalidSchemaError {}

impl core::fmt::Display for InvalidSchemaError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid schema error.
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchemaError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid schema error.
    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}
