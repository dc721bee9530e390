use super::Error;

/// Error when an incoming payload has a shape the schema cannot accept.
///
/// This occurs when:
/// - A collection payload mixes object and non-object rows
/// - An object payload arrives for a non-relation or collection field
/// - Null arrives for a collection relation
///
/// The payload is untrusted input; these errors are expected to be translated
/// into a user-facing validation response by the caller.
#[derive(Debug)]
pub(super) struct InvalidPayloadError {
    message: Box<str>,
}

impl std::error::Error for InvalidPayloadError {}

impl core::fmt::Display for InvalidPayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid payload: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid payload error.
    pub fn invalid_payload(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPayload(InvalidPayloadError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid payload error.
    pub fn is_invalid_payload(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidPayload(_))
    }
}
