// Licensed under the Apache-2.0 license

//! Frame buffer
//!
//! [`FrameBuffer`] owns one contiguous byte region holding a message
//! frame, with room for the secure-channel envelope, cipher padding and
//! authentication tag reserved up front when the command travels
//! encrypted. The envelope and frame views are separate accessors; no
//! caller ever recomputes offsets by hand.

use alloc::vec::Vec;

use wn720_host_command_types::header::round_up_even;
use wn720_host_command_types::secure::{CIPHER_BLOCK_SIZE, ENVELOPE_SIZE, TAG_SIZE};
use wn720_host_command_types::{FrameHeader, HEADER_SIZE};
use wn720_host_hal::{BufferKind, HostBus};
use zerocopy::FromBytes;

use crate::error::{Error, Result};

/// Round a length up to the AEAD block size.
pub(crate) const fn round_up_block(length: usize) -> usize {
    (length + CIPHER_BLOCK_SIZE - 1) & !(CIPHER_BLOCK_SIZE - 1)
}

/// An owned, typed frame region.
pub struct FrameBuffer {
    data: Vec<u8>,
    kind: BufferKind,
    frame_len: usize,
    secure: bool,
    sealed_len: usize,
}

impl FrameBuffer {
    /// Total allocation needed for a frame of `frame_len` bytes.
    pub fn allocation_size(frame_len: usize, secure: bool) -> usize {
        if secure {
            ENVELOPE_SIZE + round_up_block(frame_len) + TAG_SIZE
        } else {
            frame_len
        }
    }

    /// Allocate a frame buffer from the host's pool.
    ///
    /// `frame_len` must already include the header and be rounded to the
    /// even-byte bus boundary.
    pub fn allocate(
        host: &mut dyn HostBus,
        kind: BufferKind,
        frame_len: usize,
        secure: bool,
    ) -> Result<FrameBuffer> {
        let total = FrameBuffer::allocation_size(frame_len, secure);
        let data = host.allocate_buffer(kind, total)?;
        FrameBuffer::from_parts(data, kind, frame_len, secure)
    }

    /// Wrap an already-allocated region.
    pub fn from_parts(
        mut data: Vec<u8>,
        kind: BufferKind,
        frame_len: usize,
        secure: bool,
    ) -> Result<FrameBuffer> {
        let total = FrameBuffer::allocation_size(frame_len, secure);
        if frame_len < HEADER_SIZE || data.len() < total {
            return Err(Error::BufferTooSmall);
        }
        data.truncate(total);
        data.fill(0);
        Ok(FrameBuffer {
            data,
            kind,
            frame_len,
            secure,
            sealed_len: 0,
        })
    }

    /// True when envelope/padding/tag room is reserved.
    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Frame length in bytes (header + body, even-rounded).
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Length of the region the cipher seals: the frame padded to the
    /// block size.
    pub fn padded_len(&self) -> usize {
        round_up_block(self.frame_len)
    }

    fn frame_offset(&self) -> usize {
        if self.secure {
            ENVELOPE_SIZE
        } else {
            0
        }
    }

    /// The plain frame: header plus body.
    pub fn frame(&self) -> &[u8] {
        let start = self.frame_offset();
        &self.data[start..start + self.frame_len]
    }

    /// Mutable view of the plain frame.
    pub fn frame_mut(&mut self) -> &mut [u8] {
        let start = self.frame_offset();
        &mut self.data[start..start + self.frame_len]
    }

    /// Mutable view of the frame header.
    pub fn header_mut(&mut self) -> &mut FrameHeader {
        // The layout is guaranteed by construction: frame_len >= HEADER_SIZE.
        FrameHeader::mut_from_prefix(self.frame_mut())
            .map(|(header, _)| header)
            .unwrap()
    }

    /// Mutable view of the command body.
    pub fn body_mut(&mut self) -> &mut [u8] {
        &mut self.frame_mut()[HEADER_SIZE..]
    }

    /// Record that the link layer sealed this frame; `total` is the full
    /// on-wire length including envelope and tag.
    pub(crate) fn set_sealed(&mut self, total: usize) {
        self.sealed_len = total;
    }

    /// Raw view of the whole region, for the link layer.
    pub(crate) fn raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// The bytes that go on the bus: the sealed region for encrypted
    /// frames, the plain frame otherwise.
    pub fn transmit_view(&self) -> &[u8] {
        if self.secure {
            debug_assert!(self.sealed_len > 0, "secure frame transmitted unsealed");
            &self.data[..self.sealed_len]
        } else {
            &self.data[..self.frame_len]
        }
    }

    /// Return the underlying region to the host's pool.
    pub fn release(self, host: &mut dyn HostBus) {
        host.free_buffer(self.data, self.kind);
    }
}

/// Compute the frame length for a command with the given payload size.
pub fn frame_len_for_payload(payload_len: usize) -> usize {
    round_up_even(HEADER_SIZE + payload_len)
}
