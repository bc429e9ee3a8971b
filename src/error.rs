//! Error types for keywatch.

use thiserror::Error;

/// Result type alias for keywatch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running the listener.
///
/// Configuration problems are deliberately absent: a bad keymap file degrades
/// to defaults and is only logged (see [`crate::keymap::KeyMap::load`]).
/// Device failures mid-run are isolated to their source and logged, so they
/// never surface here either.
#[derive(Debug, Error)]
pub enum Error {
    /// Input devices cannot be enumerated or opened.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// Installing the interrupt handler failed.
    #[error("signal handler error: {0}")]
    Signal(String),
}
