// Licensed under the Apache-2.0 license

//! Chip register map and bootstrap handshake constants
//!
//! The WN720 exposes a small set of fixed-width registers over the bus and
//! a larger address-mapped window (the auxiliary bus) used during firmware
//! download. Register bit layouts are expressed with `bitfield!` so the
//! driver never hand-shifts masks.

use bitfield::bitfield;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Fixed-width register identifiers.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
pub enum RegisterId {
    Config = 0x0000,
    Control = 0x0001,
    InOutQueue = 0x0002,
    AhbDataPort = 0x0003,
    BaseAddress = 0x0004,
    SramDataPort = 0x0005,
    TsetGenRw = 0x0006,
    FrameOutCount = 0x0007,
}

bitfield! {
    /// 16-bit control register.
    /// Bits 11:0 - length of the next output frame, in 16-bit words
    /// Bit 12   - wake-up request (WUP)
    /// Bit 13   - chip ready (RDY)
    /// Bits 15:14 - pending frame type
    #[repr(C)]
    #[derive(Copy, Clone, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Default)]
    pub struct ControlRegister(u16);
    impl Debug;
    pub u16, next_output_words, set_next_output_words: 11, 0;
    pub u8, wake_up, set_wake_up: 12, 12;
    pub u8, ready, set_ready: 13, 13;
    pub u8, frame_type, set_frame_type: 15, 14;
}

impl ControlRegister {
    /// Byte length of the next pending output frame.
    pub fn next_output_length(&self) -> usize {
        self.next_output_words() as usize * 2
    }
}

/// Frame type values reported in the control register.
pub const FRAME_TYPE_CONTROL: u8 = 0;
pub const FRAME_TYPE_ETHERNET_DATA: u8 = 1;

bitfield! {
    /// 32-bit configuration register.
    /// Bit 8    - hold the internal CPU in reset
    /// Bit 9    - gate the internal CPU clock
    /// Bit 10   - access mode (1 = direct/register, 0 = message passing)
    /// Bit 16   - route received-frame interrupts to the host IRQ line
    /// Bits 26:24 - hardware revision
    /// Bits 31:30 - hardware type
    #[repr(C)]
    #[derive(Copy, Clone, FromBytes, IntoBytes, Immutable, KnownLayout, PartialEq, Default)]
    pub struct ConfigRegister(u32);
    impl Debug;
    pub u8, cpu_reset, set_cpu_reset: 8, 8;
    pub u8, cpu_clock_disabled, set_cpu_clock_disabled: 9, 9;
    pub u8, direct_access_mode, set_direct_access_mode: 10, 10;
    pub u8, data_irq_enabled, set_data_irq_enabled: 16, 16;
    pub u8, hardware_revision, _: 26, 24;
    pub u8, hardware_type, _: 31, 30;
}

/// Values written to the general-purpose tuning register during the chip
/// register handshake, in order.
pub const TUNING_SEQUENCE: [u32; 5] = [
    0x0720_8775,
    0x082E_C020,
    0x093C_3C3C,
    0x0B32_2C44,
    0x0CA0_6497,
];

/// Ready-bit polling budget during chip initialization.
pub const CHIP_READY_POLL_LIMIT: u32 = 200;

// Firmware download control area (auxiliary bus addresses).
pub const ADDR_DWL_CTRL_AREA: u32 = 0x0900_C000;
pub const ADDR_DWL_CTRL_AREA_NCP_STATUS: u32 = ADDR_DWL_CTRL_AREA;
pub const ADDR_DWL_CTRL_AREA_PUT: u32 = ADDR_DWL_CTRL_AREA + 0x04;
pub const ADDR_DWL_CTRL_AREA_GET: u32 = ADDR_DWL_CTRL_AREA + 0x08;
pub const ADDR_DWL_CTRL_AREA_HOST_STATUS: u32 = ADDR_DWL_CTRL_AREA + 0x0C;
pub const ADDR_DWL_CTRL_AREA_IMAGE_SIZE: u32 = ADDR_DWL_CTRL_AREA + 0x10;
pub const ADDR_DWL_CTRL_AREA_SIGNATURE: u32 = ADDR_DWL_CTRL_AREA + 0x14;
pub const ADDR_DWL_CTRL_AREA_FW_HASH: u32 = ADDR_DWL_CTRL_AREA + 0x54;
pub const ADDR_DWL_CTRL_AREA_FW_VERSION: u32 = ADDR_DWL_CTRL_AREA + 0x5C;
pub const ADDR_DWL_CTRL_AREA_INFO: u32 = ADDR_DWL_CTRL_AREA + 0x80;

/// Production-test-entry info block; the chip keyset lives in byte 1 of
/// the word at offset 12.
pub const ADDR_PTE_INFO: u32 = ADDR_DWL_CTRL_AREA + 0xC0;

/// Circular firmware download FIFO.
pub const ADDR_DOWNLOAD_FIFO_BASE: u32 = 0x0900_0000;
pub const DOWNLOAD_FIFO_SIZE: u32 = 0x8000;
pub const DOWNLOAD_BLOCK_SIZE: u32 = 0x400;

/// Polling budget for download-area state changes and FIFO progress.
pub const DOWNLOAD_POLL_LIMIT: u32 = 100;

/// Pattern written through the auxiliary bus to confirm SRAM access once
/// the bootloader is released.
pub const SRAM_ACCESS_SENTINEL: u32 = 0x23AB_C88E;

/// Host-side download handshake states, written to
/// [`ADDR_DWL_CTRL_AREA_HOST_STATUS`].
pub const HOST_STATE_NOT_READY: u32 = 0x1234_5678;
pub const HOST_STATE_READY: u32 = 0x8765_2340;
pub const HOST_STATE_INFO_READ: u32 = 0xA753_94C2;
pub const HOST_STATE_UPLOAD_PENDING: u32 = 0xABCD_0C84;
pub const HOST_STATE_UPLOAD_COMPLETE: u32 = 0xD316_9AC2;
pub const HOST_STATE_OK_TO_JUMP: u32 = 0x9173_42E4;

/// Chip-side download handshake states, read from
/// [`ADDR_DWL_CTRL_AREA_NCP_STATUS`].
pub const NCP_STATE_INFO_READY: u32 = 0xBD53_EF99;
pub const NCP_STATE_READY: u32 = 0x8765_4321;
pub const NCP_STATE_DOWNLOAD_PENDING: u32 = 0xABCD_DCBA;
pub const NCP_STATE_AUTH_OK: u32 = 0xD4C6_4A99;

// Firmware image framing: keyset, signature and hash blocks precede the
// executable image.
pub const FW_KEYSET_SIZE: usize = 8;
pub const FW_SIGNATURE_SIZE: usize = 64;
pub const FW_HASH_SIZE: usize = 8;
pub const FW_VERSION_VALUE: u32 = 0x0000_0001;

/// Offset of the two hex characters encoding the keyset inside the
/// keyset block.
pub const FW_KEYSET_FIELD_OFFSET: usize = 6;
