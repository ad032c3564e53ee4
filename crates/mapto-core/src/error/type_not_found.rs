use super::Error;

/// Error when a type is looked up by name but the schema does not declare it.
#[derive(Debug)]
pub(super) struct TypeNotFound {
    name: Box<str>,
}

impl std::error::Error for TypeNotFound {}

impl core::fmt::Display for TypeNotFound {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "type `{}` is not declared", self.name)
    }
}

impl Error {
    /// Creates a type not found error.
    pub fn type_not_found(name: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TypeNotFound(TypeNotFound {
            name: name.into().into(),
        }))
    }

    /// Returns `true` if this error is a type not found error.
    pub fn is_type_not_found(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TypeNotFound(_))
    }
}
