use super::Error;

/// Error when a payload value cannot be coerced to the expected column type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    from: Box<str>,
    to_type: &'static str,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.from, self.to_type)
    }
}

impl Error {
    /// Creates a type conversion error.
    ///
    /// `from` describes the incoming value (usually its JSON type name) and
    /// `to_type` names the column type it failed to coerce into.
    pub fn type_conversion(from: impl Into<String>, to_type: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            from: from.into().into(),
            to_type,
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeConversion(_))
    }
}
