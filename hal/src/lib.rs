// Licensed under the Apache-2.0 license

//! WN720 Host Adapter Interface
//!
//! The driver core is platform-agnostic: everything that touches the
//! physical bus, the RTOS or the board is reached through the [`HostBus`]
//! trait defined here and implemented by the integrator. The driver calls
//! these primitives; it never implements them.
//!
//! The [`LinkCipher`] trait is the authenticated-encryption primitive the
//! secure channel is built on. Hosts with crypto hardware implement it
//! natively; the `soft-cipher` feature provides an AES-256-GCM software
//! implementation.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use wn720_host_command_types::registers::RegisterId;

pub mod cipher;
pub mod error;

pub use cipher::LinkCipher;
pub use error::{HalError, HalResult};

#[cfg(feature = "soft-cipher")]
pub use cipher::SoftLinkCipher;

/// Buffer pools the host distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferKind {
    /// Command requests, confirmations and indications.
    Control,
    /// Received Ethernet data frames.
    DataFrame,
}

/// Services the WN720 driver requires from its host platform.
///
/// Implementations are free to back these with an RTOS, bare-metal
/// primitives or a test double; the driver only assumes the documented
/// semantics.
pub trait HostBus {
    /// One-time platform setup (firmware image access, DMA, ...).
    fn init(&mut self) -> HalResult<()>;

    /// Release every platform resource claimed by [`HostBus::init`].
    fn deinit(&mut self) -> HalResult<()>;

    /// Bring up the physical bus.
    fn init_bus(&mut self) -> HalResult<()>;

    /// Shut down the physical bus.
    fn deinit_bus(&mut self) -> HalResult<()>;

    /// Acquire exclusive bus access. Blocks until the bus is free.
    fn lock(&mut self) -> HalResult<()>;

    /// Release exclusive bus access.
    fn unlock(&mut self) -> HalResult<()>;

    /// Allocate a buffer of at least `len` bytes from the given pool.
    fn allocate_buffer(&mut self, kind: BufferKind, len: usize) -> HalResult<Vec<u8>>;

    /// Return a buffer to its pool.
    fn free_buffer(&mut self, buffer: Vec<u8>, kind: BufferKind);

    /// Transmit one framed buffer over the bus. Must be called with the
    /// bus lock held.
    fn transmit_frame(&mut self, frame: &[u8]) -> HalResult<()>;

    /// Read `buffer.len()` bytes of pending frame data from the bus.
    /// Must be called with the bus lock held.
    fn read_frame(&mut self, buffer: &mut [u8]) -> HalResult<()>;

    /// Read a 16-bit device register.
    fn reg_read_16(&mut self, reg: RegisterId) -> HalResult<u16>;

    /// Write a 16-bit device register.
    fn reg_write_16(&mut self, reg: RegisterId, value: u16) -> HalResult<()>;

    /// Read a 32-bit device register.
    fn reg_read_32(&mut self, reg: RegisterId) -> HalResult<u32>;

    /// Write a 32-bit device register.
    fn reg_write_32(&mut self, reg: RegisterId, value: u32) -> HalResult<()>;

    /// Read a word from the auxiliary address-mapped bus.
    fn aux_read_32(&mut self, address: u32) -> HalResult<u32>;

    /// Write a word to the auxiliary address-mapped bus.
    fn aux_write_32(&mut self, address: u32, value: u32) -> HalResult<()>;

    /// Write a block to the auxiliary address-mapped bus.
    fn aux_write(&mut self, address: u32, data: &[u8]) -> HalResult<()>;

    /// Arm the confirmation waiter for `id` before the matching request
    /// is transmitted. Called with the bus lock held.
    fn setup_waited_event(&mut self, id: u8) -> HalResult<()>;

    /// Block until the confirmation (or indication) with `id` arrives or
    /// `timeout_ms` elapses. Returns the plain frame, header included.
    fn wait_for_confirmation(&mut self, id: u8, timeout_ms: u32) -> HalResult<Vec<u8>>;

    /// Hand a fully received, decrypted frame to the upper layers. This
    /// is also what ultimately satisfies [`HostBus::wait_for_confirmation`].
    fn post_event(&mut self, frame: &[u8]) -> HalResult<()>;

    /// Drive the hardware wake-up pin.
    fn set_wake_up_pin(&mut self, state: bool) -> HalResult<()>;

    /// Block until the chip signals it has woken up.
    fn wait_for_wake_up(&mut self) -> HalResult<()>;

    /// Busy-wait for the given number of time units (roughly one
    /// millisecond each).
    fn wait(&mut self, time_units: u32);

    /// Unmask the platform interrupt line wired to the chip.
    fn enable_platform_interrupt(&mut self) -> HalResult<()>;

    /// Mask the platform interrupt line wired to the chip.
    fn disable_platform_interrupt(&mut self) -> HalResult<()>;

    /// Total size of the firmware image in bytes.
    fn firmware_size(&mut self) -> HalResult<u32>;

    /// Copy the next `buffer.len()` bytes of the firmware image. The host
    /// keeps the read cursor; successive calls walk the image from the
    /// start.
    fn firmware_data(&mut self, buffer: &mut [u8]) -> HalResult<()>;

    /// Number of platform-data (PDS) chunks to send after startup.
    fn pds_chunk_count(&mut self) -> HalResult<usize>;

    /// Retrieve one platform-data chunk.
    fn pds_chunk(&mut self, index: usize) -> HalResult<Vec<u8>>;

    /// Retrieve the secure-channel MAC key provisioned for this device.
    fn secure_link_mac_key(&mut self) -> HalResult<[u8; 32]>;

    /// Public half of the host's ephemeral key pair for the session key
    /// exchange. A fresh pair is expected per exchange.
    fn host_public_key(&mut self) -> HalResult<[u8; 32]>;

    /// Derive and install the session key from the device's public key,
    /// returning the key the secure channel must use from now on.
    fn derive_session_key(&mut self, device_pub_key: &[u8; 32]) -> HalResult<[u8; 32]>;

    /// Queue an asynchronous session-key renegotiation. Called from the
    /// receive path; must not block.
    fn schedule_renegotiation(&mut self);
}
