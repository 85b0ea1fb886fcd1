// Licensed under the Apache-2.0 license

//! General API request and confirmation bodies

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Fixed body of the configuration (PDS) request; the compressed platform
/// data follows, `length` bytes of it.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ConfigurationReqBody {
    pub length: U16,
}

/// GPIO access mode for [`ControlGpioReqBody`].
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioMode {
    Read = 0,
    SetLow = 1,
    SetHigh = 2,
    /// Leave the pin floating.
    Tristate = 3,
}

/// Body of the GPIO control request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ControlGpioReqBody {
    pub gpio_label: u8,
    pub gpio_mode: u8,
}

/// Body of the GPIO control confirmation; `value` is the read level or
/// the detailed error cause.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ControlGpioCnfBody {
    pub status: U32,
    pub value: U32,
}

/// PTA (packet traffic arbitration) operating mode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtaMode {
    OneWireWlanMaster = 0,
    OneWireCoexMaster = 1,
    TwoWire = 2,
    ThreeWire = 3,
    FourWire = 4,
}

/// Body of the PTA settings request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PtaSettingsReqBody {
    pub pta_mode: u8,
    pub request_signal_active_level: u8,
    pub priority_signal_active_level: u8,
    pub freq_signal_active_level: u8,
    pub grant_signal_active_level: u8,
    pub coex_type: u8,
    pub default_grant_state: u8,
    pub simultaneous_rx_access: u8,
    pub priority_sampling_time: u8,
    pub tx_rx_sampling_time: u8,
    pub freq_sampling_time: u8,
    pub grant_valid_time: u8,
    pub fem_control_time: u8,
    pub first_slot_time: u8,
    pub periodic_tx_rx_sampling_time: U16,
    pub coex_quota: U16,
    pub wlan_quota: U16,
}

/// Arbitration priority between concurrent coexistence and WLAN requests.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PtaPriority {
    CoexMaximized = 0x0562,
    CoexHigh = 0x0462,
    Balanced = 0x1461,
    WlanHigh = 0x1851,
    WlanMaximized = 0x1A51,
}

/// Body of the PTA priority request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PtaPriorityReqBody {
    pub priority: U32,
}

/// Body of the PTA state request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PtaStateReqBody {
    pub pta_state: U32,
}

/// PTA on/off values.
pub const PTA_OFF: u32 = 0;
pub const PTA_ON: u32 = 1;

/// Body of the prevent-rollback request. The magic word guards the OTP
/// against mistakenly issued requests.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct PreventRollbackReqBody {
    pub magic_word: U32,
}
