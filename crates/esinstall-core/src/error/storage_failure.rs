use super::Error;

/// Error when the backend does not apply a structural change.
///
/// Either the backend answered without acknowledging the call, or, on the
/// time-series path, the call failed underneath; in the latter case the
/// transport error is the cause of this one.
#[derive(Debug)]
pub(super) struct StorageFailure {
    table: Box<str>,
    operation: Box<str>,
    rejected: bool,
}

impl StorageFailure {
    pub(super) fn table(&self) -> &str {
        &self.table
    }

    pub(super) fn operation(&self) -> &str {
        &self.operation
    }
}

impl std::error::Error for StorageFailure {}

impl core::fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.rejected {
            write!(
                f,
                "storage failure: {} `{}` was not acknowledged",
                self.operation, self.table
            )
        } else {
            write!(
                f,
                "storage failure: cannot {} `{}`",
                self.operation, self.table
            )
        }
    }
}

impl Error {
    /// Creates a storage failure for a call the backend did not acknowledge.
    pub fn storage_failure(table: impl Into<String>, operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StorageFailure(StorageFailure {
            table: table.into().into(),
            operation: operation.into().into(),
            rejected: true,
        }))
    }

    /// Creates a storage failure meant to wrap an underlying error through
    /// [`Error::context`].
    pub fn storage_failure_with(table: impl Into<String>, operation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::StorageFailure(StorageFailure {
            table: table.into().into(),
            operation: operation.into().into(),
            rejected: false,
        }))
    }

    /// Returns `true` if this error is a storage failure.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::StorageFailure(_))
    }

    /// The table or index a storage failure is about.
    pub fn storage_table(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::StorageFailure(err) => Some(err.table()),
            _ => None,
        }
    }

    /// The operation a storage failure is about.
    pub fn storage_operation(&self) -> Option<&str> {
        match self.kind() {
            super::ErrorKind::StorageFailure(err) => Some(err.operation()),
            _ => None,
        }
    }
}
