// Licensed under the Apache-2.0 license

//! Startup indication
//!
//! First message the firmware sends once it is running in message-passing
//! mode. It carries the chip identity the driver caches for the lifetime
//! of the session, most importantly the input-buffer count that caps the
//! request credit.

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::station::MAC_ADDR_SIZE;

/// Part ordering number length.
pub const OPN_SIZE: usize = 14;

/// Unique device identifier length.
pub const UID_SIZE: usize = 8;

/// Secure-channel link mode advertised in the startup indication.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// Secure-channel hardware absent or fused off.
    Reserved = 0,
    /// Chip accepts plain traffic only.
    Untrusted = 1,
    /// Evaluation mode: the MAC key is not burned and must be installed
    /// in RAM before the key exchange.
    TrustedEval = 2,
    /// Enforced mode: the MAC key is burned, encryption is mandatory.
    TrustedEnforced = 3,
}

impl LinkMode {
    pub fn from_capabilities(capabilities: u8) -> LinkMode {
        match capabilities & 0x03 {
            1 => LinkMode::Untrusted,
            2 => LinkMode::TrustedEval,
            3 => LinkMode::TrustedEnforced,
            _ => LinkMode::Reserved,
        }
    }
}

/// Body of the startup indication.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StartupIndBody {
    pub status: U32,
    pub hardware_id: U16,
    /// Number of chip-side input buffers: the buffer-credit cap.
    pub num_inp_ch_bufs: U16,
    /// Size of each chip-side input buffer in bytes.
    pub size_inp_ch_buf: U16,
    pub num_links_ap: u8,
    pub num_interfaces: u8,
    pub firmware_major: u8,
    pub firmware_minor: u8,
    pub firmware_build: u8,
    /// Bits 1:0 encode the secure-channel [`LinkMode`].
    pub capabilities: u8,
    /// Part ordering number.
    pub opn: [u8; OPN_SIZE],
    pub uid: [u8; UID_SIZE],
    pub mac_addr_0: [u8; MAC_ADDR_SIZE],
    pub mac_addr_1: [u8; MAC_ADDR_SIZE],
}
