use std::fmt;

/// Errors that occur in the collaborators around the translator: resource
/// stores, the warehouse, and the schema repository.
///
/// Uses `String` for external error details to maintain `Clone` + `Eq`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BackendError {
    /// No resource exists under the given id.
    ResourceNotFound { resource: String },
    /// The store could not be reached; retrying may succeed.
    Unavailable { resource: String, message: String },
    /// The store refused access to the resource.
    PermissionDenied { resource: String },
    /// Applying a table would change or drop an existing column.
    IncompatibleChange { table: String, reason: String },
    /// A resource id is empty, absolute, or escapes the store root.
    InvalidResourceId { resource: String, reason: String },
    /// Stored content could not be encoded or decoded.
    Serialization { resource: String, message: String },
}

impl BackendError {
    /// Classifies an I/O failure on `resource`.
    pub fn from_io(resource: impl Into<String>, err: &std::io::Error) -> Self {
        let resource = resource.into();
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::ResourceNotFound { resource },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { resource },
            _ => Self::Unavailable {
                resource,
                message: err.to_string(),
            },
        }
    }

    /// Returns true for failures that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceNotFound { resource } => {
                write!(f, "resource '{resource}' not found")
            }
            Self::Unavailable { resource, message } => {
                write!(f, "resource '{resource}' is unavailable: {message}")
            }
            Self::PermissionDenied { resource } => {
                write!(f, "permission denied for resource '{resource}'")
            }
            Self::IncompatibleChange { table, reason } => {
                write!(f, "incompatible change to table '{table}': {reason}")
            }
            Self::InvalidResourceId { resource, reason } => {
                write!(f, "invalid resource id '{resource}': {reason}")
            }
            Self::Serialization { resource, message } => {
                write!(f, "could not serialize resource '{resource}': {message}")
            }
        }
    }
}

impl std::error::Error for BackendError {}
