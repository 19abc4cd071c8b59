//! Error types for capture operations
//!
//! Defines the error taxonomy for the capture pipeline. Transient capture
//! errors (grab failures, bad geometry) are logged and skipped by the
//! listener loop; resource errors around the output directory are fatal at
//! startup and surfaced to the binary.

use crate::model::Region;

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error type for the capture pipeline
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Monitor enumeration failed at the platform layer
    #[error("Failed to enumerate monitors: {reason}")]
    MonitorEnumeration {
        /// Platform-reported reason
        reason: String,
    },

    /// The requested screen region could not be rasterized
    #[error("Failed to grab region {region:?}: {reason}")]
    GrabFailed {
        /// Region that was requested, in global screen coordinates
        region: Region,
        /// Platform-reported reason
        reason: String,
    },

    /// Foreground window metadata could not be read
    #[error("Failed to query the foreground window: {reason}")]
    ForegroundQueryFailed {
        /// Platform-reported reason
        reason: String,
    },

    /// The global pointer hook could not be installed
    #[error("Failed to install the pointer hook: {reason}")]
    HookInstallFailed {
        /// Platform-reported reason
        reason: String,
    },

    /// PNG encoding failed
    #[error("Failed to encode PNG: {reason}")]
    EncodingFailed {
        /// Reason for encoding failure
        reason: String,
    },

    /// The output directory could not be created
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirUnavailable {
        /// Configured output directory
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// I/O error occurred
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
