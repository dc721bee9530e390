use super::Error;

/// Error when a payload key does not name a field on the target model.
///
/// Only raised when the merge options reject unknown keys; the default
/// policy discards them so that unrelated widget payload keys are tolerated.
#[derive(Debug)]
pub(super) struct UnknownFieldError {
    model: Box<str>,
    field: Box<str>,
}

impl std::error::Error for UnknownFieldError {}

impl core::fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "unknown field `{}::{}` in payload", self.model, self.field)
    }
}

impl Error {
    /// Creates an unknown field error.
    pub fn unknown_field(model: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownField(UnknownFieldError {
            model: model.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown field error.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownField(_))
    }
}
