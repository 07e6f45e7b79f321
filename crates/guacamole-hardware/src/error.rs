//! Error types for hardware operations.
//!
//! This module defines error types specific to sysfs node access and vendor
//! service calls, covering missing nodes, unparsable node contents and
//! unreachable services.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during hardware operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Node does not exist on this kernel.
    #[error("Node missing: {path}")]
    NodeMissing { path: String },

    /// Node exists but could not be read or written.
    #[error("Node {path}: {source}")]
    NodeIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Vendor service could not be reached.
    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String },

    /// Vendor service rejected the call.
    #[error("Service error: {message}")]
    ServiceError { message: String },

    /// Value read from or destined for a node is out of range.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },
}

impl HardwareError {
    /// Create a new node missing error.
    pub fn node_missing(path: impl Into<String>) -> Self {
        Self::NodeMissing { path: path.into() }
    }

    /// Wrap an I/O error raised while accessing `path`.
    ///
    /// `NotFound` is reported as [`HardwareError::NodeMissing`].
    pub fn node_io(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return Self::NodeMissing { path };
        }
        Self::NodeIo { path, source }
    }

    /// Create a new service unavailable error.
    pub fn service_unavailable(service: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Create a new service error.
    pub fn service(message: impl Into<String>) -> Self {
        Self::ServiceError {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }
}
