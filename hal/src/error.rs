// Licensed under the Apache-2.0 license

//! Host adapter error type

use core::fmt;

pub type HalResult<T> = Result<T, HalError>;

/// Errors reported by host adapter implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// Bus transaction failed.
    BusFault,
    /// Exclusive bus access could not be acquired or released.
    LockFailed,
    /// No buffer of the requested type is available.
    OutOfBuffers,
    /// The awaited confirmation did not arrive in time.
    Timeout,
    /// Requested resource (firmware chunk, PDS chunk, key) unavailable.
    ResourceUnavailable,
    /// Authenticated decryption rejected the frame.
    CipherRejected,
    /// The cipher primitive failed for another reason.
    CipherFailed,
    /// Platform interrupt control failed.
    InterruptControl,
    /// Catch-all for platform-specific failures.
    Platform(&'static str),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::BusFault => write!(f, "bus transaction failed"),
            HalError::LockFailed => write!(f, "bus lock failure"),
            HalError::OutOfBuffers => write!(f, "no free buffer"),
            HalError::Timeout => write!(f, "confirmation timeout"),
            HalError::ResourceUnavailable => write!(f, "resource unavailable"),
            HalError::CipherRejected => write!(f, "authentication tag rejected"),
            HalError::CipherFailed => write!(f, "cipher operation failed"),
            HalError::InterruptControl => write!(f, "interrupt control failed"),
            HalError::Platform(msg) => write!(f, "platform error: {}", msg),
        }
    }
}
