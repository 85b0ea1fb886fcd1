// Licensed under the Apache-2.0 license

//! Station-mode request and confirmation bodies

use zerocopy::little_endian::{I32, U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// MAC address length.
pub const MAC_ADDR_SIZE: usize = 6;

/// BSSID length.
pub const BSSID_SIZE: usize = MAC_ADDR_SIZE;

/// Maximum SSID length carried in an [`SsidDef`].
pub const SSID_SIZE: usize = 32;

/// Maximum passkey length.
pub const PASSWORD_SIZE: usize = 64;

/// Maximum number of SSIDs in a scan request.
pub const SCAN_SSID_LIST_MAX: usize = 2;

/// IPv6 address length for NS offloading.
pub const NS_IP_ADDR_SIZE: usize = 16;

/// A MAC address on the wire.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout, Default)]
pub struct MacAddress {
    pub octet: [u8; MAC_ADDR_SIZE],
}

impl From<[u8; MAC_ADDR_SIZE]> for MacAddress {
    fn from(octet: [u8; MAC_ADDR_SIZE]) -> Self {
        MacAddress { octet }
    }
}

/// Length-prefixed SSID container used by connect, scan and AP requests.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SsidDef {
    pub ssid_length: U32,
    pub ssid: [u8; SSID_SIZE],
}

impl SsidDef {
    /// Build from an SSID slice, truncating at [`SSID_SIZE`].
    pub fn new(ssid: &[u8]) -> Self {
        let mut def = SsidDef {
            ssid_length: U32::new(ssid.len().min(SSID_SIZE) as u32),
            ssid: [0; SSID_SIZE],
        };
        let len = ssid.len().min(SSID_SIZE);
        def.ssid[..len].copy_from_slice(&ssid[..len]);
        def
    }
}

/// Security mode requested for a connection or network.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityMode {
    Open = 0,
    Wep = 1,
    WpaWpa2Psk = 2,
    Wpa2Psk = 3,
}

/// Body of the connect (join) request. Vendor-specific IEs follow the
/// fixed body, `ie_data_length` bytes of them.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct ConnectReqBody {
    pub ssid_def: SsidDef,
    pub bssid: [u8; BSSID_SIZE],
    pub channel: U16,
    pub security_mode: u8,
    pub prevent_roaming: u8,
    pub mgmt_frame_protection: U16,
    pub password_length: U16,
    pub password: [u8; PASSWORD_SIZE],
    pub ie_data_length: U16,
}

/// Body of the IBSS join request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct JoinIbssReqBody {
    pub ssid_def: SsidDef,
    pub channel: U32,
    pub security_mode: U16,
    pub password_length: U16,
    pub password: [u8; PASSWORD_SIZE],
}

/// Scan mode selector.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Passive = 0,
    Active = 1,
}

/// Fixed body of the scan request. The channel list, SSID list, probe
/// request IEs and BSSID follow in that order.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct StartScanReqBody {
    pub scan_mode: U16,
    pub channel_list_count: U16,
    pub ssid_list_count: U16,
    pub ie_data_length: U16,
}

/// Body of the set-MAC-address request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetMacAddressReqBody {
    pub mac_addr: [u8; MAC_ADDR_SIZE],
    pub reserved: [u8; 2],
}

/// Power management mode while connected.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Radio always active.
    Active = 0,
    /// Doze between beacons.
    Beacon = 1,
    /// Doze between DTIMs.
    Dtim = 2,
}

/// Body of the set-power-mode request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetPmModeReqBody {
    pub power_mode: U16,
    pub listen_interval: U16,
}

/// Body of the get-signal-strength confirmation.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GetSignalStrengthCnfBody {
    pub status: U32,
    pub rcpi: U32,
}

/// Body of the ARP offloading request; unused slots stay zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Default)]
pub struct SetArpIpAddressReqBody {
    pub arp_ip_addr: [U32; 2],
}

/// Body of the NS offloading request; unused slots stay zero.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetNsIpAddressReqBody {
    pub ns_ip_addr: [[u8; NS_IP_ADDR_SIZE]; 2],
}

/// Body of the broadcast filter request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetBroadcastFilterReqBody {
    pub filter: U32,
}

/// Body of the multicast whitelist add/remove requests.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct MulticastAddrReqBody {
    pub mac: [u8; MAC_ADDR_SIZE],
    pub reserved: [u8; 2],
}

/// Body of the scan parameter request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetScanParametersReqBody {
    pub active_channel_time: U16,
    pub passive_channel_time: U16,
    pub num_of_probe_requests: U16,
    pub reserved: U16,
}

/// Fixed body of the roam parameter request; the channel list follows.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetRoamParametersReqBody {
    pub rcpi_threshold: u8,
    pub rcpi_hysteresis: u8,
    pub beacon_lost_count: u8,
    pub channel_list_count: u8,
}

/// Body of the TX rate parameter request.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetTxRateParametersReqBody {
    pub reserved: U32,
    pub rate_set_bitmask: [u8; 4],
}

/// Body of the max-TX-power request, in units of 0.1 dBm.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SetMaxTxPowerReqBody {
    pub max_tx_power: I32,
}

/// Body of the get-max-TX-power confirmation, in units of 0.1 dBm.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GetMaxTxPowerCnfBody {
    pub status: U32,
    pub max_tx_power_rf_port1: I32,
    pub max_tx_power_rf_port2: I32,
}

/// Body of the get-PMK confirmation.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct GetPmkCnfBody {
    pub status: U32,
    pub password_length: U32,
    pub password: [u8; PASSWORD_SIZE],
}

/// Body of the send-frame request; the Ethernet payload follows.
#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
pub struct SendFrameReqBody {
    pub frame_type: u8,
    pub priority: u8,
    pub packet_id: U16,
    pub packet_data_length: U32,
}

/// `frame_type` value for Ethernet data frames.
pub const FRAME_TYPE_DATA: u8 = 2;
