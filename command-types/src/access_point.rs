// Licensed under the Apache-2.0 license

//! Soft-AP request and confirmation bodies

use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::station::{SsidDef, MAC_ADDR_SIZE, PASSWORD_SIZE};

/// Fixed body of the start-AP request. Beacon IEs and probe-response IEs
/// follow the fixed body, in that order.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StartApReqBody {
    pub ssid_def: SsidDef,
    pub hidden_ssid: u8,
    pub client_isolation: u8,
    pub security_mode: u8,
    pub mgmt_frame_protection: u8,
    pub channel: U16,
    pub password_length: U16,
    pub password: [u8; PASSWORD_SIZE],
    pub beacon_ie_data_length: U16,
    pub probe_resp_ie_data_length: U16,
}

/// Fixed body of the update-AP request; beacon IEs then probe-response
/// IEs follow.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct UpdateApReqBody {
    pub beacon_ie_data_length: U16,
    pub probe_resp_ie_data_length: U16,
}

/// Body of the disconnect-AP-client request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct DisconnectApClientReqBody {
    pub mac: [u8; MAC_ADDR_SIZE],
    pub reserved: [u8; 2],
}

/// Body of the unicast filter request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetUnicastFilterReqBody {
    pub filter: U32,
}

/// Body of the whitelist / blacklist add requests.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MacFilterAddrReqBody {
    pub mac: [u8; MAC_ADDR_SIZE],
    pub reserved: [u8; 2],
}

/// Body of the max-AP-client-count request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetMaxApClientCountReqBody {
    pub count: U32,
}

/// Body of the AP-client-inactivity request, in seconds.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetMaxApClientInactivityReqBody {
    pub inactivity_timeout: U32,
}

/// Body of the get-AP-client-signal-strength request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GetApClientSignalStrengthReqBody {
    pub mac: [u8; MAC_ADDR_SIZE],
    pub reserved: [u8; 2],
}

/// Body of the get-AP-client-signal-strength confirmation.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GetApClientSignalStrengthCnfBody {
    pub status: U32,
    pub rcpi: U32,
}
