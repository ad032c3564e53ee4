use super::Error;

/// Error when a generator option carries a value it cannot take.
#[derive(Debug)]
pub(super) struct InvalidOption {
    key: Box<str>,
    value: Box<str>,
}

impl std::error::Error for InvalidOption {}

impl core::fmt::Display for InvalidOption {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid value `{}` for option `{}`",
            self.value, self.key
        )
    }
}

impl Error {
    /// Creates an invalid option error for `key = value`.
    pub fn invalid_option(key: impl Into<String>, value: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidOption(InvalidOption {
            key: key.into().into(),
            value: value.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid option error.
    pub fn is_invalid_option(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOption(_))
    }
}
