// Licensed under the Apache-2.0 license

//! Confirmation status namespaces
//!
//! The chip reports command completion through a little-endian status word
//! in the confirmation body. Two independent namespaces exist: general API
//! commands and network-management commands, selected by the
//! [`MGMT_API_ID_MASK`](crate::MGMT_API_ID_MASK) bit of the command id.

use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Status codes reported by general API confirmations.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum GeneralStatus {
    Success = 0x0,
    Failure = 0x1,
    InvalidParameter = 0x2,
    GpioWarning = 0x3,
    UnsupportedMsgId = 0x4,
    MacKeyAlreadyBurned = 0x5,
    MacKeyRamModeNotAllowed = 0x6,
    MacKeyUnknownMode = 0x7,
    PubKeyExchangeFailed = 0x8,
    RollbackWrongMagicWord = 0x9,
}

/// Status codes reported by network-management confirmations.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
pub enum MgmtStatus {
    Success = 0x0,
    InvalidParameter = 0x1,
    WrongState = 0x2,
    GeneralFailure = 0x3,
    ChannelNotAllowed = 0x4,
    Warning = 0x5,
    NoMatchingAp = 0x6,
    ConnectionAborted = 0x7,
    ConnectionTimeout = 0x8,
    ConnectionRejectedByAp = 0x9,
    ConnectionAuthFailure = 0xA,
    RetryExceeded = 0xB,
    TxLifetimeExceeded = 0xC,
}
