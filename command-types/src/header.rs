// Licensed under the Apache-2.0 license

//! Message frame header
//!
//! Every request, confirmation and indication starts with the same 4-byte
//! header: the message id, an info bitfield and the little-endian byte
//! length of the whole frame. The length always reflects the frame size
//! after padding to the even-byte boundary required by the bus.

use bitfield::bitfield;
use zerocopy::little_endian::U16;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::FrameError;

/// Size of [`FrameHeader`] on the wire.
pub const HEADER_SIZE: usize = 4;

/// The bus transfers whole 16-bit words; frame lengths are always even.
pub const fn round_up_even(length: usize) -> usize {
    (length + 1) & !1
}

/// Logical network interface a request or confirmation pertains to.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interface {
    Station = 0,
    SoftAp = 1,
}

bitfield! {
    /// Frame info byte.
    /// Bits 1:0 - logical interface (station / soft-AP)
    /// Bits 5:2 - reserved
    /// Bits 7:6 - secure-channel direction tag (0 = plain frame)
    #[repr(C)]
    #[derive(Copy, Clone, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Default)]
    pub struct FrameInfo(u8);
    impl Debug;
    pub u8, interface, set_interface: 1, 0;
    pub u8, reserved, _: 5, 2;
    pub u8, secure_tag, set_secure_tag: 7, 6;
}

impl FrameInfo {
    pub fn for_interface(interface: Interface) -> Self {
        let mut info = FrameInfo(0);
        info.set_interface(interface as u8);
        info
    }
}

/// Fixed frame header preceding every message body.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq)]
pub struct FrameHeader {
    /// Command, confirmation or indication identifier.
    pub id: u8,
    /// Interface / direction / security-mode bitfield.
    pub info: FrameInfo,
    /// Total frame length in bytes, post-padding.
    pub length: U16,
}

impl FrameHeader {
    pub fn new(id: u8, info: FrameInfo, length: u16) -> Self {
        FrameHeader {
            id,
            info,
            length: U16::new(length),
        }
    }

    /// Parse a header from the start of a frame.
    pub fn read_from_frame(frame: &[u8]) -> Result<FrameHeader, FrameError> {
        FrameHeader::read_from_prefix(frame)
            .map(|(header, _)| header)
            .map_err(|_| FrameError::Truncated)
    }
}

/// Confirmation body shared by every fixed-status reply: a single
/// little-endian status word. Command-specific confirmations begin with
/// the same word followed by their output fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GenericConfirmationBody {
    pub status: zerocopy::little_endian::U32,
}
