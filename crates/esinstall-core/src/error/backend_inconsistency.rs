use super::Error;

/// Error when the backend contradicts itself.
///
/// Raised when a template is reported to exist but its definition cannot be
/// fetched, or the other way around. This points at a defect in the backend
/// integration and is never retried.
#[derive(Debug)]
pub(super) struct BackendInconsistency {
    message: Box<str>,
}

impl std::error::Error for BackendInconsistency {}

impl core::fmt::Display for BackendInconsistency {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "backend inconsistency: {}", self.message)
    }
}

impl Error {
    /// Creates a backend inconsistency error.
    pub fn backend_inconsistency(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::BackendInconsistency(
            BackendInconsistency {
                message: message.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a backend inconsistency error.
    pub fn is_backend_inconsistency(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::BackendInconsistency(_))
    }
}
