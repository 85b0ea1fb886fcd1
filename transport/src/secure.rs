// Licensed under the Apache-2.0 license

//! Secure channel
//!
//! Authenticated-encryption link layer. Frames of flagged commands are
//! sealed with a per-direction nonce counter; crossing the counter
//! watermark schedules a session-key renegotiation, during which every
//! command except the key exchange is rejected locally.

use alloc::boxed::Box;

use wn720_host_command_types::secure::{
    decode_envelope, encode_envelope, is_encrypted_frame, EncryptionBitmap, SecureDirection,
    ENVELOPE_SIZE, KEY_SIZE, NONCE_SIZE, PACKET_COUNTER_MAX, PACKET_COUNTER_WATERMARK, TAG_SIZE,
};
use wn720_host_command_types::RequestId;
use wn720_host_hal::{HostBus, LinkCipher};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::buffer::FrameBuffer;
use crate::error::{Error, Result};
use crate::link::LinkLayer;

/// Session key with guaranteed erasure on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; KEY_SIZE]);

impl From<[u8; KEY_SIZE]> for SessionKey {
    fn from(key: [u8; KEY_SIZE]) -> Self {
        SessionKey(key)
    }
}

/// Secure channel lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecureLinkState {
    /// No session key negotiated yet; encrypted traffic is impossible.
    Disabled,
    /// Session established, no renegotiation due.
    Default,
    /// A counter crossed the watermark; renegotiation has not started.
    RenegotiationNeeded,
    /// The renegotiation exchange is in flight; all commands except the
    /// key exchange are rejected locally.
    RenegotiationPending,
}

/// One 30-bit packet counter per traffic direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacketCounters {
    pub tx: u32,
    pub rx: u32,
    pub hp: u32,
}

impl PacketCounters {
    /// Per-packet nonce: the three counters serialized little-endian,
    /// with every counter other than the active direction's zeroed.
    fn nonce(direction: SecureDirection, counter: u32) -> [u8; NONCE_SIZE] {
        let (hp, rx, tx) = match direction {
            SecureDirection::Tx => (0, 0, counter),
            SecureDirection::Rx => (0, counter, 0),
            SecureDirection::HighPriority => (counter, 0, 0),
        };
        let mut nonce = [0u8; NONCE_SIZE];
        nonce[0..4].copy_from_slice(&hp.to_le_bytes());
        nonce[4..8].copy_from_slice(&rx.to_le_bytes());
        nonce[8..12].copy_from_slice(&tx.to_le_bytes());
        nonce
    }
}

/// Encrypting link layer.
pub struct SecureLink {
    cipher: Box<dyn LinkCipher>,
    session_key: Option<SessionKey>,
    bitmap: EncryptionBitmap,
    counters: PacketCounters,
    state: SecureLinkState,
}

impl SecureLink {
    pub fn new(cipher: Box<dyn LinkCipher>) -> Self {
        SecureLink {
            cipher,
            session_key: None,
            bitmap: EncryptionBitmap::cleared(),
            counters: PacketCounters::default(),
            state: SecureLinkState::Disabled,
        }
    }

    pub fn state(&self) -> SecureLinkState {
        self.state
    }

    pub fn counters(&self) -> PacketCounters {
        self.counters
    }

    pub fn bitmap(&self) -> &EncryptionBitmap {
        &self.bitmap
    }

    /// Note that the renegotiation exchange has been started. Subsequent
    /// transmissions other than the key exchange are rejected until a new
    /// session key is installed.
    pub fn begin_renegotiation(&mut self) {
        self.state = SecureLinkState::RenegotiationPending;
    }

    fn key(&self) -> Result<&[u8; KEY_SIZE]> {
        match &self.session_key {
            Some(key) => Ok(&key.0),
            // Encryption demanded before any session key was negotiated.
            None => Err(Error::WrongState),
        }
    }

    fn check_watermark(&mut self) {
        let crossed = self.counters.tx > PACKET_COUNTER_WATERMARK
            || self.counters.rx > PACKET_COUNTER_WATERMARK
            || self.counters.hp > PACKET_COUNTER_WATERMARK;
        if crossed && self.state == SecureLinkState::Default {
            log::debug!("secure link: renegotiation needed");
            self.state = SecureLinkState::RenegotiationNeeded;
        }
    }
}

impl LinkLayer for SecureLink {
    fn is_secure(&self) -> bool {
        true
    }

    fn encryption_required(&self, id: u8) -> bool {
        self.bitmap.requires_encryption(id)
    }

    fn allows_transmit(&self, id: u8) -> bool {
        if id == u8::from(RequestId::SecureLinkExchangePubKeys) {
            return true;
        }
        match self.state {
            // Exchange in flight: nothing else goes out.
            SecureLinkState::RenegotiationPending => false,
            // Watermark crossed: encrypted traffic stops until the keys
            // are fresh; plain commands may still pass.
            SecureLinkState::RenegotiationNeeded => !self.bitmap.requires_encryption(id),
            SecureLinkState::Disabled | SecureLinkState::Default => true,
        }
    }

    fn seal(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        if !frame.is_secure() {
            return Ok(());
        }

        let counter = self.counters.tx;
        let nonce = PacketCounters::nonce(SecureDirection::Tx, counter);
        let padded = frame.padded_len();
        let key = *self.key()?;

        let raw = frame.raw_mut();
        let tag = self
            .cipher
            .encrypt(&key, &nonce, &mut raw[ENVELOPE_SIZE..ENVELOPE_SIZE + padded])?;
        raw[ENVELOPE_SIZE + padded..ENVELOPE_SIZE + padded + TAG_SIZE].copy_from_slice(&tag);
        raw[..ENVELOPE_SIZE].copy_from_slice(&encode_envelope(SecureDirection::Tx, counter));
        frame.set_sealed(ENVELOPE_SIZE + padded + TAG_SIZE);

        self.counters.tx = (self.counters.tx + 1) & PACKET_COUNTER_MAX;
        self.check_watermark();
        Ok(())
    }

    fn open(&mut self, data: &mut [u8]) -> Result<usize> {
        if !is_encrypted_frame(data) {
            return Ok(0);
        }
        if data.len() < ENVELOPE_SIZE + TAG_SIZE {
            return Err(Error::BufferTooSmall);
        }

        let (direction, counter) = decode_envelope(data).map_err(|_| Error::Failure)?;
        match direction {
            SecureDirection::Tx => self.counters.tx = counter,
            SecureDirection::Rx => self.counters.rx = counter,
            SecureDirection::HighPriority => self.counters.hp = counter,
        }
        log::debug!("secure link: rx packet {}", counter);

        let nonce = PacketCounters::nonce(direction, counter);
        let key = *self.key()?;
        let tag_offset = data.len() - TAG_SIZE;
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&data[tag_offset..]);

        self.cipher
            .decrypt(&key, &nonce, &mut data[ENVELOPE_SIZE..tag_offset], &tag)?;

        self.check_watermark();
        Ok(ENVELOPE_SIZE)
    }

    fn after_receive(&mut self, host: &mut dyn HostBus) {
        if self.state == SecureLinkState::RenegotiationNeeded {
            log::debug!("secure link: renegotiation pending");
            self.state = SecureLinkState::RenegotiationPending;
            host.schedule_renegotiation();
        }
    }

    fn install_session_key(&mut self, key: [u8; KEY_SIZE]) {
        self.session_key = Some(SessionKey::from(key));
        self.counters = PacketCounters::default();
        self.state = SecureLinkState::Default;
    }

    fn set_encryption_bitmap(&mut self, bitmap: EncryptionBitmap) {
        self.bitmap = bitmap;
    }
}
