use super::Error;

/// Error when a client call never got an answer from the backend.
///
/// Carries the name of the call and the client's own error. Unlike a
/// storage failure, the backend may or may not have applied the change.
#[derive(Debug)]
pub(super) struct TransportFailure {
    call: Box<str>,
    inner: anyhow::Error,
}

impl TransportFailure {
    pub(super) fn call(&self) -> &str {
        &self.call
    }
}

impl std::error::Error for TransportFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}

impl core::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "transport failure during {}: {:#}", self.call, self.inner)
    }
}

impl Error {
    /// Creates a transport failure for the client call `call`.
    ///
    /// `err` is whatever the client library reported; anything convertible
    /// into [`anyhow::Error`] is accepted, including every
    /// `std::error::Error + Send + Sync`.
    pub fn transport_failure(call: impl Into<String>, err: impl Into<anyhow::Error>) -> Error {
        Error::from(super::ErrorKind::TransportFailure(TransportFailure {
            call: call.into().into(),
            inner: err.into(),
        }))
    }

    /// Returns `true` if this error is a transport failure.
    pub fn is_transport_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TransportFailure(_))
    }

    /// The client call a transport failure happened in.
    pub fn transport_call(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::TransportFailure(err) => Some(err.call()),
            _ => None,
        }
    }
}
