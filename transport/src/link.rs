// Licensed under the Apache-2.0 license

//! Link layer capability interface
//!
//! The transport core is written once against [`LinkLayer`]; whether a
//! device runs plain or encrypted is decided at construction time by
//! picking the implementation, not by compile-time switches inside the
//! core.

use wn720_host_command_types::secure::{is_encrypted_frame, EncryptionBitmap, KEY_SIZE};
use wn720_host_hal::HostBus;

use crate::buffer::FrameBuffer;
use crate::error::{Error, Result};

/// Per-frame link processing hooks, called with the bus lock held.
pub trait LinkLayer {
    /// True when this link can carry encrypted traffic at all.
    fn is_secure(&self) -> bool {
        false
    }

    /// True when frames for this command id travel encrypted.
    fn encryption_required(&self, id: u8) -> bool;

    /// Gate applied before any transmission. Returns false while a
    /// session-key renegotiation is in flight, for every command except
    /// the key exchange itself.
    fn allows_transmit(&self, id: u8) -> bool;

    /// Seal an outgoing frame in place (encrypt, envelope, tag). A no-op
    /// for plain links.
    fn seal(&mut self, frame: &mut FrameBuffer) -> Result<()>;

    /// Open a received buffer in place and return the byte offset of the
    /// plain frame within it.
    fn open(&mut self, data: &mut [u8]) -> Result<usize>;

    /// Invoked after each received frame has been processed, still under
    /// the bus lock. The secure link uses this to promote a pending
    /// watermark crossing into a scheduled renegotiation.
    fn after_receive(&mut self, host: &mut dyn HostBus);

    /// Install a freshly negotiated session key. No-op on plain links.
    fn install_session_key(&mut self, _key: [u8; KEY_SIZE]) {}

    /// Replace the per-command encryption bitmap. No-op on plain links.
    fn set_encryption_bitmap(&mut self, _bitmap: EncryptionBitmap) {}
}

/// Pass-through link for devices without the secure channel.
#[derive(Debug, Default)]
pub struct PlainLink;

impl LinkLayer for PlainLink {
    fn encryption_required(&self, _id: u8) -> bool {
        false
    }

    fn allows_transmit(&self, _id: u8) -> bool {
        true
    }

    fn seal(&mut self, _frame: &mut FrameBuffer) -> Result<()> {
        Ok(())
    }

    fn open(&mut self, data: &mut [u8]) -> Result<usize> {
        if is_encrypted_frame(data) {
            // The chip sent an encrypted frame to a plain host.
            return Err(Error::Failure);
        }
        Ok(0)
    }

    fn after_receive(&mut self, _host: &mut dyn HostBus) {}
}
