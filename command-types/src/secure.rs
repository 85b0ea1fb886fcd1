// Licensed under the Apache-2.0 license

//! Secure-channel wire definitions
//!
//! When the secure channel is active, an encrypted frame is wrapped as
//!
//! ```text
//! +----------+--------------------------------------+-----+
//! | envelope |  header + body, padded, AEAD-sealed  | tag |
//! |  4 bytes |          multiple of 16 bytes        | 16B |
//! +----------+--------------------------------------+-----+
//! ```
//!
//! The envelope carries a 30-bit packet counter and a 2-bit direction tag.
//! The tag sits in bits 7:6 of envelope byte 1 — the same offset as the
//! secure-tag bits of a plain frame's info byte, so the receive path can
//! tell the two layouts apart from the first four bytes alone.

use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::FrameError;

/// Size of the counter/direction envelope preceding an encrypted frame.
pub const ENVELOPE_SIZE: usize = 4;

/// Size of the authentication tag following the ciphertext.
pub const TAG_SIZE: usize = 16;

/// AEAD block size the sealed region is padded to.
pub const CIPHER_BLOCK_SIZE: usize = 16;

/// Per-packet nonce length: the three direction counters, serialized LE.
pub const NONCE_SIZE: usize = 12;

/// Session and MAC key length.
pub const KEY_SIZE: usize = 32;

/// Public key length for the session key exchange.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Packet counters are 30 bits wide.
pub const PACKET_COUNTER_MAX: u32 = 0x3FFF_FFFF;

/// Counter value beyond which the session key must be renegotiated before
/// further encrypted traffic.
pub const PACKET_COUNTER_WATERMARK: u32 = 0x3FFF_F000;

/// One bit per command id.
pub const ENCRYPTION_BITMAP_SIZE: usize = 32;

/// Traffic direction encoded in the envelope and counter set.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureDirection {
    /// Host to chip.
    Tx = 0b01,
    /// Chip to host.
    Rx = 0b10,
    /// Chip to host, high priority.
    HighPriority = 0b11,
}

impl SecureDirection {
    pub fn from_tag(tag: u8) -> Option<SecureDirection> {
        match tag {
            0b01 => Some(SecureDirection::Tx),
            0b10 => Some(SecureDirection::Rx),
            0b11 => Some(SecureDirection::HighPriority),
            _ => None,
        }
    }
}

/// Encode the envelope from a direction tag and a 30-bit packet counter.
///
/// Layout: byte 0 = counter[7:0], byte 1 = tag << 6 | counter[29:24],
/// bytes 2-3 = counter[23:8] little-endian.
pub fn encode_envelope(direction: SecureDirection, counter: u32) -> [u8; ENVELOPE_SIZE] {
    let counter = counter & PACKET_COUNTER_MAX;
    [
        (counter & 0xFF) as u8,
        ((direction as u8) << 6) | ((counter >> 24) & 0x3F) as u8,
        ((counter >> 8) & 0xFF) as u8,
        ((counter >> 16) & 0xFF) as u8,
    ]
}

/// Decode an envelope into its direction tag and packet counter.
///
/// Returns `InvalidField` when the direction tag is zero, which marks a
/// plain (unencrypted) frame.
pub fn decode_envelope(envelope: &[u8]) -> Result<(SecureDirection, u32), FrameError> {
    if envelope.len() < ENVELOPE_SIZE {
        return Err(FrameError::Truncated);
    }
    let direction =
        SecureDirection::from_tag(envelope[1] >> 6).ok_or(FrameError::InvalidField)?;
    let counter = envelope[0] as u32
        | ((envelope[1] & 0x3F) as u32) << 24
        | (envelope[2] as u32) << 8
        | (envelope[3] as u32) << 16;
    Ok((direction, counter))
}

/// True when the first bytes of a received buffer are a secure-channel
/// envelope rather than a plain frame header.
pub fn is_encrypted_frame(data: &[u8]) -> bool {
    data.len() >= ENVELOPE_SIZE && data[1] >> 6 != 0
}

/// Per-command encryption requirement bitmap, keyed by command id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionBitmap {
    bits: [u8; ENCRYPTION_BITMAP_SIZE],
}

impl Default for EncryptionBitmap {
    fn default() -> Self {
        EncryptionBitmap::cleared()
    }
}

impl EncryptionBitmap {
    /// No command requires encryption.
    pub fn cleared() -> Self {
        EncryptionBitmap {
            bits: [0; ENCRYPTION_BITMAP_SIZE],
        }
    }

    /// Every command requires encryption except the key exchange, which
    /// must always travel in the clear.
    pub fn all_encrypted() -> Self {
        let mut bitmap = EncryptionBitmap {
            bits: [0xFF; ENCRYPTION_BITMAP_SIZE],
        };
        bitmap.remove(crate::RequestId::SecureLinkExchangePubKeys.into());
        bitmap
    }

    pub fn add(&mut self, id: u8) {
        // The key exchange is the one command that can never be encrypted.
        if id == u8::from(crate::RequestId::SecureLinkExchangePubKeys) {
            return;
        }
        self.bits[(id / 8) as usize] |= 1 << (id % 8);
    }

    pub fn remove(&mut self, id: u8) {
        self.bits[(id / 8) as usize] &= !(1 << (id % 8));
    }

    pub fn requires_encryption(&self, id: u8) -> bool {
        self.bits[(id / 8) as usize] & (1 << (id % 8)) != 0
    }

    pub fn as_bytes(&self) -> &[u8; ENCRYPTION_BITMAP_SIZE] {
        &self.bits
    }
}

/// Key-agreement algorithm identifier carried by the exchange request.
pub const KEY_EXCHANGE_ALGORITHM_CURVE25519: u32 = 1;

/// Destination for the secure-channel MAC key.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacKeyDestination {
    Ram = 0,
    Otp = 1,
}

/// Request body for installing the secure-channel MAC key.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetMacKeyReqBody {
    pub key_dest: U32,
    pub key_value: [u8; KEY_SIZE],
}

/// Request body for the session key exchange. Always sent in the clear.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ExchangePubKeysReqBody {
    pub algorithm: U32,
    pub host_pub_key: [u8; PUBLIC_KEY_SIZE],
}

/// Confirmation body for the session key exchange.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ExchangePubKeysCnfBody {
    pub status: U32,
    pub device_pub_key: [u8; PUBLIC_KEY_SIZE],
}

/// Request body carrying the encryption bitmap to the chip.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SecureLinkConfigureReqBody {
    pub encryption_bitmap: [u8; ENCRYPTION_BITMAP_SIZE],
    pub disable_session_key_protection: U32,
}
