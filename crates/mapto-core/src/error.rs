mod invalid_option;
mod invalid_schema;
mod type_not_found;

use invalid_option::InvalidOption;
use invalid_schema::InvalidSchema;
use std::sync::Arc;
use type_not_found::TypeNotFound;

/// An error that can occur while building the type model or reading
/// generator options.
///
/// Mapping resolution never fails with an `Error`. A type that cannot be
/// mapped produces [`Diagnostic`](crate::Diagnostic)s instead, so that
/// sibling types are still generated.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorKind>,
}

#[derive(Debug)]
enum ErrorKind {
    InvalidOption(InvalidOption),
    InvalidSchema(InvalidSchema),
    TypeNotFound(TypeNotFound),
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.kind(), f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", self.kind())
                .finish()
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            InvalidOption(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            TypeNotFound(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(kind),
        }
    }
}
