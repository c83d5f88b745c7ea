//! Unified error types for the pipekit public API.
//!
//! `SegmentError` is the single error currency at the segment boundary: both
//! `check` and `process` return it, and a pipeline applies its fault-tolerance
//! policy to every variant alike. `ConfigError` covers logging setup defects
//! and is never tolerated — a bad `LOGLEVEL` is a deployment mistake, not a
//! runtime data issue.

use std::path::PathBuf;

use thiserror::Error;

/// Error raised by a segment's `check` or `process`.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Input rejected by `check` before processing.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Failure inside a segment's processing step.
    #[error("Processing failed: {0}")]
    Processing(String),

    /// I/O failure propagated out of a segment body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything else a segment wants to surface.
    #[error("{0}")]
    Other(String),
}

/// Result type for segment operations.
pub type SegmentResult<T> = Result<T, SegmentError>;

/// Logging configuration defect, raised at logger resolution time.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A level specification that is neither a known name nor an integer.
    #[error("Unknown log level: {0:?}")]
    UnknownLevel(String),

    /// A `<LEVEL>_LOGFILE` destination could not be opened.
    #[error("Cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
