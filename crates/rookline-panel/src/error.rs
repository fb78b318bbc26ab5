//! Error types for the panel layer.

use std::collections::TryReserveError;

/// Errors that can occur while setting up a log panel.
///
/// Panels are the one place the client cannot run without: if the backing
/// buffer cannot be acquired, the process has nowhere to surface text and
/// the caller is expected to treat the failure as fatal.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The requested geometry has a zero dimension.
    #[error("panel geometry must be non-zero, got {cols}x{rows}")]
    ZeroGeometry {
        /// Requested column count.
        cols: usize,
        /// Requested row count.
        rows: usize,
    },

    /// The backing buffer could not be allocated.
    #[error("panel buffer allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}
