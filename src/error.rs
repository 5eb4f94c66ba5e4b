//! Typed errors shared by both renderers.
//!
//! Binaries convert these into `color_eyre::Report` at the top level; the
//! library keeps them structured so callers and tests can match on the
//! failure category.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a render before its SVG is written.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pseudo-terminal could not be opened or the script could not be spawned.
    #[error("failed to launch '{}': {reason}", program.display())]
    LaunchFailure {
        /// Script that was being launched.
        program: PathBuf,
        /// Human-readable cause reported by the pty layer.
        reason: String,
    },

    /// Reading the captured output stream failed mid-capture.
    #[error("failed to read captured output: {0}")]
    CaptureFailure(#[source] io::Error),

    /// The configured deadline elapsed and the script was killed.
    #[error("script did not finish within {seconds}s and was killed")]
    Timeout {
        /// The deadline that was exceeded.
        seconds: u64,
    },

    /// The source script could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    SourceReadFailure {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The output image could not be written.
    #[error("failed to write '{}': {source}", path.display())]
    FileWriteFailure {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
