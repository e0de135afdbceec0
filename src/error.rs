//! Error types for ecosystem construction and resizing

use std::fmt;

/// Errors that can occur while building or resizing an ecosystem
#[derive(Debug, Clone)]
pub enum EcosystemError {
    /// Configuration validation failed
    InvalidConfig(String),
    /// Viewport too small to derive a terrain grid
    InvalidViewport {
        /// Requested viewport width in pixels
        width: u32,
        /// Requested viewport height in pixels
        height: u32,
    },
}

impl fmt::Display for EcosystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EcosystemError::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            EcosystemError::InvalidViewport { width, height } => {
                write!(f, "invalid viewport: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for EcosystemError {}

/// Result type alias for ecosystem operations
pub type Result<T> = std::result::Result<T, EcosystemError>;
