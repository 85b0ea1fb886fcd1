// Licensed under the Apache-2.0 license

//! Station-mode commands

use alloc::vec::Vec;

use wn720_host_command_types::station::{
    ConnectReqBody, GetMaxTxPowerCnfBody, GetPmkCnfBody, GetSignalStrengthCnfBody,
    JoinIbssReqBody, MacAddress, PowerMode, ScanMode, SecurityMode, SetArpIpAddressReqBody,
    SetMacAddressReqBody, SetMaxTxPowerReqBody, SetNsIpAddressReqBody, SetPmModeReqBody,
    SetRoamParametersReqBody, SetScanParametersReqBody, SetTxRateParametersReqBody, SsidDef,
    StartScanReqBody, BSSID_SIZE, NS_IP_ADDR_SIZE, PASSWORD_SIZE, SCAN_SSID_LIST_MAX, SSID_SIZE,
};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_transport::{CommandPipe, Error, Result};
use zerocopy::IntoBytes;

/// Set the MAC address used on an interface.
pub fn set_mac_address(
    pipe: &mut CommandPipe,
    mac: &MacAddress,
    interface: Interface,
) -> Result<()> {
    let body = SetMacAddressReqBody {
        mac_addr: mac.octet,
        reserved: [0; 2],
    };
    pipe.send_command(RequestId::SetMacAddress, body.as_bytes(), interface, false)?;
    Ok(())
}

/// Join a Wi-Fi network as a station.
///
/// `bssid` restricts the join to one AP; `None` joins any AP broadcasting
/// the SSID. `ie_data` is appended to probe requests verbatim.
#[allow(clippy::too_many_arguments)]
pub fn connect(
    pipe: &mut CommandPipe,
    ssid: &[u8],
    bssid: Option<&MacAddress>,
    channel: u16,
    security_mode: SecurityMode,
    prevent_roaming: bool,
    mgmt_frame_protection: bool,
    passkey: &[u8],
    ie_data: &[u8],
) -> Result<()> {
    if ssid.len() > SSID_SIZE || passkey.len() > PASSWORD_SIZE {
        return Err(Error::InvalidParameter);
    }

    let mut body = ConnectReqBody {
        ssid_def: SsidDef::new(ssid),
        bssid: [0xFF; BSSID_SIZE],
        channel: channel.into(),
        security_mode: security_mode as u8,
        prevent_roaming: prevent_roaming as u8,
        mgmt_frame_protection: (mgmt_frame_protection as u16).into(),
        password_length: (passkey.len() as u16).into(),
        password: [0; PASSWORD_SIZE],
        ie_data_length: (ie_data.len() as u16).into(),
    };
    body.password[..passkey.len()].copy_from_slice(passkey);
    if let Some(bssid) = bssid {
        body.bssid.copy_from_slice(&bssid.octet);
    }

    let mut payload = Vec::with_capacity(core::mem::size_of::<ConnectReqBody>() + ie_data.len());
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(ie_data);

    pipe.send_command(RequestId::Connect, &payload, Interface::Station, false)?;
    Ok(())
}

/// Leave the currently joined network.
pub fn disconnect(pipe: &mut CommandPipe) -> Result<()> {
    pipe.send_command(RequestId::Disconnect, &[], Interface::Station, false)?;
    Ok(())
}

/// Start a scan. The channel list, SSID list, probe-request IEs and an
/// optional unicast BSSID are concatenated after the fixed body, in that
/// order.
pub fn start_scan(
    pipe: &mut CommandPipe,
    scan_mode: ScanMode,
    channel_list: &[u8],
    ssid_list: &[SsidDef],
    ie_data: &[u8],
    bssid: Option<&MacAddress>,
) -> Result<()> {
    if ssid_list.len() > SCAN_SSID_LIST_MAX {
        return Err(Error::InvalidParameter);
    }

    let body = StartScanReqBody {
        scan_mode: (scan_mode as u16).into(),
        channel_list_count: (channel_list.len() as u16).into(),
        ssid_list_count: (ssid_list.len() as u16).into(),
        ie_data_length: (ie_data.len() as u16).into(),
    };

    let params_len = channel_list.len()
        + ssid_list.len() * core::mem::size_of::<SsidDef>()
        + ie_data.len()
        + BSSID_SIZE;
    let mut payload =
        Vec::with_capacity(core::mem::size_of::<StartScanReqBody>() + params_len);
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(channel_list);
    for ssid in ssid_list {
        payload.extend_from_slice(ssid.as_bytes());
    }
    payload.extend_from_slice(ie_data);
    match bssid {
        Some(bssid) => payload.extend_from_slice(&bssid.octet),
        None => payload.extend_from_slice(&[0xFF; BSSID_SIZE]),
    }

    pipe.send_command(RequestId::StartScan, &payload, Interface::Station, false)?;
    Ok(())
}

/// Abort an ongoing scan.
pub fn stop_scan(pipe: &mut CommandPipe) -> Result<()> {
    pipe.send_command(RequestId::StopScan, &[], Interface::Station, false)?;
    Ok(())
}

/// Join or create an IBSS network.
pub fn join_ibss(
    pipe: &mut CommandPipe,
    ssid: &[u8],
    channel: u32,
    security_mode: SecurityMode,
    passkey: &[u8],
) -> Result<()> {
    if ssid.len() > SSID_SIZE || passkey.len() > PASSWORD_SIZE {
        return Err(Error::InvalidParameter);
    }

    let mut body = JoinIbssReqBody {
        ssid_def: SsidDef::new(ssid),
        channel: channel.into(),
        security_mode: (security_mode as u16).into(),
        password_length: (passkey.len() as u16).into(),
        password: [0; PASSWORD_SIZE],
    };
    body.password[..passkey.len()].copy_from_slice(passkey);

    pipe.send_command(RequestId::JoinIbss, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Leave the IBSS network.
pub fn leave_ibss(pipe: &mut CommandPipe) -> Result<()> {
    pipe.send_command(RequestId::LeaveIbss, &[], Interface::Station, false)?;
    Ok(())
}

/// Set the connected-state power mode. `interval` is the number of
/// beacons or DTIM periods to doze through.
pub fn set_power_mode(pipe: &mut CommandPipe, mode: PowerMode, interval: u16) -> Result<()> {
    let body = SetPmModeReqBody {
        power_mode: (mode as u16).into(),
        listen_interval: interval.into(),
    };
    pipe.send_command(RequestId::SetPmMode, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// RCPI of the last packets received from the AP. 0-220, where 220 is
/// 0 dBm and each step is 0.5 dBm.
pub fn get_signal_strength(pipe: &mut CommandPipe) -> Result<u32> {
    let reply =
        pipe.send_command_with_reply(RequestId::GetSignalStrength, &[], Interface::Station)?;
    reply.decoded_status(RequestId::GetSignalStrength)?;
    let body: GetSignalStrengthCnfBody = reply.body()?;
    Ok(body.rcpi.get())
}

/// Offload ARP responses for up to two IPv4 addresses.
pub fn set_arp_ip_address(pipe: &mut CommandPipe, addresses: &[u32]) -> Result<()> {
    if addresses.len() > 2 {
        return Err(Error::InvalidParameter);
    }
    let mut body = SetArpIpAddressReqBody::default();
    for (slot, addr) in body.arp_ip_addr.iter_mut().zip(addresses) {
        *slot = (*addr).into();
    }
    pipe.send_command(RequestId::SetArpIpAddress, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Offload neighbor solicitation for up to two IPv6 addresses.
pub fn set_ns_ip_address(
    pipe: &mut CommandPipe,
    addresses: &[[u8; NS_IP_ADDR_SIZE]],
) -> Result<()> {
    if addresses.len() > 2 {
        return Err(Error::InvalidParameter);
    }
    let mut body = SetNsIpAddressReqBody {
        ns_ip_addr: [[0; NS_IP_ADDR_SIZE]; 2],
    };
    for (slot, addr) in body.ns_ip_addr.iter_mut().zip(addresses) {
        *slot = *addr;
    }
    pipe.send_command(RequestId::SetNsIpAddress, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Configure channel dwell times and probe count for future scans.
pub fn set_scan_parameters(
    pipe: &mut CommandPipe,
    active_channel_time: u16,
    passive_channel_time: u16,
    num_probe_requests: u16,
) -> Result<()> {
    let body = SetScanParametersReqBody {
        active_channel_time: active_channel_time.into(),
        passive_channel_time: passive_channel_time.into(),
        num_of_probe_requests: num_probe_requests.into(),
        reserved: 0.into(),
    };
    pipe.send_command(RequestId::SetScanParameters, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Configure roaming triggers. Takes effect at the next connection.
pub fn set_roam_parameters(
    pipe: &mut CommandPipe,
    rcpi_threshold: u8,
    rcpi_hysteresis: u8,
    beacon_lost_count: u8,
    channel_list: &[u8],
) -> Result<()> {
    let body = SetRoamParametersReqBody {
        rcpi_threshold,
        rcpi_hysteresis,
        beacon_lost_count,
        channel_list_count: channel_list.len() as u8,
    };
    let mut payload =
        Vec::with_capacity(core::mem::size_of::<SetRoamParametersReqBody>() + channel_list.len());
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(channel_list);

    pipe.send_command(RequestId::SetRoamParameters, &payload, Interface::Station, false)?;
    Ok(())
}

/// Restrict the rate set used in station mode.
pub fn set_tx_rate_parameters(pipe: &mut CommandPipe, rate_set_bitmask: [u8; 4]) -> Result<()> {
    let body = SetTxRateParametersReqBody {
        reserved: 0.into(),
        rate_set_bitmask,
    };
    pipe.send_command(RequestId::SetTxRateParameters, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Cap the transmit power, in units of 0.1 dBm.
pub fn set_max_tx_power(
    pipe: &mut CommandPipe,
    max_tx_power: i32,
    interface: Interface,
) -> Result<()> {
    let body = SetMaxTxPowerReqBody {
        max_tx_power: max_tx_power.into(),
    };
    pipe.send_command(RequestId::SetMaxTxPower, body.as_bytes(), interface, false)?;
    Ok(())
}

/// Read back the maximum transmit power per RF port, in units of
/// 0.1 dBm.
pub fn get_max_tx_power(pipe: &mut CommandPipe, interface: Interface) -> Result<(i32, i32)> {
    let reply = pipe.send_command_with_reply(RequestId::GetMaxTxPower, &[], interface)?;
    reply.decoded_status(RequestId::GetMaxTxPower)?;
    let body: GetMaxTxPowerCnfBody = reply.body()?;
    Ok((
        body.max_tx_power_rf_port1.get(),
        body.max_tx_power_rf_port2.get(),
    ))
}

/// Retrieve the pairwise master key of the current secure connection.
/// Returns the key length and the key material.
pub fn get_pmk(
    pipe: &mut CommandPipe,
    interface: Interface,
) -> Result<(u32, [u8; PASSWORD_SIZE])> {
    let reply = pipe.send_command_with_reply(RequestId::GetPmk, &[], interface)?;
    reply.decoded_status(RequestId::GetPmk)?;
    let body: GetPmkCnfBody = reply.body()?;
    Ok((body.password_length.get(), body.password))
}
