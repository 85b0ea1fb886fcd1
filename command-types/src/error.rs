// Licensed under the Apache-2.0 license

//! Frame codec error type

use core::fmt;

/// Errors raised while packing or parsing wire frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Destination buffer cannot hold the encoded value.
    BufferTooSmall,
    /// Source buffer is shorter than the fixed-size layout requires.
    Truncated,
    /// A field holds a value outside its legal range.
    InvalidField,
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::BufferTooSmall => write!(f, "buffer too small"),
            FrameError::Truncated => write!(f, "frame truncated"),
            FrameError::InvalidField => write!(f, "invalid field value"),
        }
    }
}
