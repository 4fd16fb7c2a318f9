//! # Kernel Errors
//!
//! Error types for the fracture geometry kernel.
//!
//! Too-few-points inputs are not errors: triangulation, hull and clipping
//! return empty results for them. Errors are reserved for malformed topology
//! and invalid configuration.

use config::constants::ConfigError;
use thiserror::Error;

/// Errors that can occur in the geometry kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    /// Neighbor rings or face loops are inconsistent
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    /// Geometry too degenerate to process
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Caller-supplied data violates an input contract
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl KernelError {
    /// Creates an invalid topology error.
    pub fn invalid_topology(message: impl Into<String>) -> Self {
        Self::InvalidTopology {
            message: message.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }
}

/// Result alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KernelError::invalid_topology("vertex 3 has 2 neighbors");
        assert!(err.to_string().contains("Invalid topology"));
        assert!(err.to_string().contains("vertex 3"));

        let err: KernelError = ConfigError::InvalidAxisCount(7).into();
        assert!(err.to_string().contains("configuration"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KernelError>();
    }
}
