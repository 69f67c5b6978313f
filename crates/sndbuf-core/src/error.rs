//! Error types for sndbuf-core.

use thiserror::Error;

/// Error type for buffer pool operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("buffer {0} already in use")]
    AlreadyInUse(usize),

    #[error("buffer {0} is not in use")]
    NotInUse(usize),

    #[error("Invalid buffer size: {frames} frames x {channels} channels")]
    InvalidSize { frames: usize, channels: u32 },

    #[error("Aligned allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of [`Error`] for the command-dispatch layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Slot state or request shape did not allow the operation.
    Precondition,
    /// Aligned allocation returned nothing.
    Allocation,
    /// Decode/encode failure reported by the codec adapter.
    Io,
    /// Pool construction rejected its configuration.
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::AlreadyInUse(_) | Error::NotInUse(_) | Error::InvalidSize { .. } => {
                ErrorKind::Precondition
            }
            Error::AllocationFailed { .. } => ErrorKind::Allocation,
            Error::Io(_) | Error::Codec(_) | Error::UnsupportedFormat(_) => ErrorKind::Io,
            Error::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    #[inline]
    pub fn is_precondition(&self) -> bool {
        self.kind() == ErrorKind::Precondition
    }
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;
