// Licensed under the Apache-2.0 license

//! WN720 Command Types
//!
//! Wire-level definitions shared by every layer of the WN720 host driver:
//! the message frame header, the command and indication identifier
//! catalogs, confirmation status namespaces, request/confirmation bodies,
//! the secure-channel envelope codec and the chip register map.
//!
//! All multi-byte fields are little-endian on the wire and are represented
//! with explicit [`zerocopy`] little-endian integer types so that byte
//! order is converted exactly once, at the boundary.

#![no_std]

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub mod access_point;
pub mod error;
pub mod general;
pub mod header;
pub mod registers;
pub mod secure;
pub mod startup;
pub mod station;
pub mod status;

pub use error::FrameError;
pub use header::{
    round_up_even, FrameHeader, FrameInfo, GenericConfirmationBody, Interface, HEADER_SIZE,
};

/// Indications set this bit in the frame id; confirmations reuse the
/// request id unchanged.
pub const INDICATION_ID_BASE: u8 = 0x80;

/// Network-management (full-MAC) request ids carry this bit; ids without
/// it belong to the general API namespace and decode their confirmation
/// status through the general status table.
pub const MGMT_API_ID_MASK: u8 = 0x40;

/// Request identifiers understood by the WN720 firmware.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum RequestId {
    // General API (0x00-0x3F)
    Configuration = 0x09,
    ControlGpio = 0x26,
    SetSecureLinkMacKey = 0x27,
    SecureLinkExchangePubKeys = 0x28,
    SecureLinkConfigure = 0x29,
    PreventRollback = 0x2A,
    PtaSettings = 0x2B,
    PtaPriority = 0x2C,
    PtaState = 0x2D,
    ShutDown = 0x32,

    // Network management API (0x40-0x7F)
    SetMacAddress = 0x42,
    Connect = 0x43,
    Disconnect = 0x44,
    StartAp = 0x45,
    UpdateAp = 0x46,
    StopAp = 0x47,
    SendFrame = 0x48,
    StartScan = 0x49,
    StopScan = 0x4A,
    JoinIbss = 0x4B,
    LeaveIbss = 0x4C,
    SetPmMode = 0x4D,
    GetSignalStrength = 0x4E,
    DisconnectApClient = 0x4F,
    SetArpIpAddress = 0x50,
    SetNsIpAddress = 0x51,
    SetBroadcastFilter = 0x52,
    SetUnicastFilter = 0x53,
    AddMulticastAddr = 0x54,
    RemoveMulticastAddr = 0x55,
    AddWhitelistAddr = 0x56,
    AddBlacklistAddr = 0x57,
    SetMaxApClientCount = 0x58,
    SetMaxApClientInactivity = 0x59,
    SetScanParameters = 0x5A,
    SetRoamParameters = 0x5B,
    SetTxRateParameters = 0x5C,
    SetMaxTxPower = 0x5D,
    GetMaxTxPower = 0x5E,
    GetPmk = 0x5F,
    GetApClientSignalStrength = 0x60,
}

impl RequestId {
    /// True for ids whose confirmation status decodes through the
    /// network-management namespace.
    pub fn is_mgmt_api(self) -> bool {
        u8::from(self) & MGMT_API_ID_MASK != 0
    }
}

/// Indication identifiers (chip-initiated messages).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum IndicationId {
    Startup = 0x81,
    Connect = 0xC3,
    Disconnect = 0xC4,
    ApClientConnect = 0xC5,
    ApClientDisconnect = 0xC6,
    ScanResult = 0xC9,
    ScanComplete = 0xCA,
    ReceivedFrame = 0xC8,
    GenericStatus = 0xE3,
    Error = 0xE4,
}

/// True when a raw frame id denotes an indication rather than a
/// confirmation.
pub fn is_indication_id(id: u8) -> bool {
    id & INDICATION_ID_BASE != 0
}
