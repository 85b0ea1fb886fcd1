// Licensed under the Apache-2.0 license

//! Soft-AP commands

use alloc::vec::Vec;

use wn720_host_command_types::access_point::{
    DisconnectApClientReqBody, GetApClientSignalStrengthCnfBody,
    GetApClientSignalStrengthReqBody, SetMaxApClientCountReqBody,
    SetMaxApClientInactivityReqBody, StartApReqBody, UpdateApReqBody,
};
use wn720_host_command_types::station::{
    MacAddress, SecurityMode, SsidDef, PASSWORD_SIZE, SSID_SIZE,
};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_transport::{CommandPipe, Error, Result};
use zerocopy::IntoBytes;

/// Start the soft-AP. Beacon IEs and probe-response IEs follow the fixed
/// body, in that order.
#[allow(clippy::too_many_arguments)]
pub fn start_ap(
    pipe: &mut CommandPipe,
    channel: u16,
    ssid: &[u8],
    hidden_ssid: bool,
    client_isolation: bool,
    security_mode: SecurityMode,
    mgmt_frame_protection: bool,
    passkey: &[u8],
    beacon_ie_data: &[u8],
    probe_response_ie_data: &[u8],
) -> Result<()> {
    if ssid.len() > SSID_SIZE || passkey.len() > PASSWORD_SIZE {
        return Err(Error::InvalidParameter);
    }

    let mut body = StartApReqBody {
        ssid_def: SsidDef::new(ssid),
        hidden_ssid: hidden_ssid as u8,
        client_isolation: client_isolation as u8,
        security_mode: security_mode as u8,
        mgmt_frame_protection: mgmt_frame_protection as u8,
        channel: channel.into(),
        password_length: (passkey.len() as u16).into(),
        password: [0; PASSWORD_SIZE],
        beacon_ie_data_length: (beacon_ie_data.len() as u16).into(),
        probe_resp_ie_data_length: (probe_response_ie_data.len() as u16).into(),
    };
    body.password[..passkey.len()].copy_from_slice(passkey);

    let mut payload = Vec::with_capacity(
        core::mem::size_of::<StartApReqBody>() + beacon_ie_data.len() + probe_response_ie_data.len(),
    );
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(beacon_ie_data);
    payload.extend_from_slice(probe_response_ie_data);

    pipe.send_command(RequestId::StartAp, &payload, Interface::SoftAp, false)?;
    Ok(())
}

/// Update the IEs advertised by a running soft-AP.
pub fn update_ap(
    pipe: &mut CommandPipe,
    beacon_ie_data: &[u8],
    probe_response_ie_data: &[u8],
) -> Result<()> {
    let body = UpdateApReqBody {
        beacon_ie_data_length: (beacon_ie_data.len() as u16).into(),
        probe_resp_ie_data_length: (probe_response_ie_data.len() as u16).into(),
    };

    let mut payload = Vec::with_capacity(
        core::mem::size_of::<UpdateApReqBody>() + beacon_ie_data.len() + probe_response_ie_data.len(),
    );
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(beacon_ie_data);
    payload.extend_from_slice(probe_response_ie_data);

    pipe.send_command(RequestId::UpdateAp, &payload, Interface::SoftAp, false)?;
    Ok(())
}

/// Stop the soft-AP.
pub fn stop_ap(pipe: &mut CommandPipe) -> Result<()> {
    pipe.send_command(RequestId::StopAp, &[], Interface::SoftAp, false)?;
    Ok(())
}

/// Disconnect one client from the soft-AP.
pub fn disconnect_ap_client(pipe: &mut CommandPipe, client: &MacAddress) -> Result<()> {
    let body = DisconnectApClientReqBody {
        mac: client.octet,
        reserved: [0; 2],
    };
    pipe.send_command(RequestId::DisconnectApClient, body.as_bytes(), Interface::SoftAp, false)?;
    Ok(())
}

/// Cap the number of simultaneously associated clients. Must be issued
/// after the soft-AP is started; the setting does not survive a stop or
/// a chip reset.
pub fn set_max_ap_client(pipe: &mut CommandPipe, max_clients: u32) -> Result<()> {
    let body = SetMaxApClientCountReqBody {
        count: max_clients.into(),
    };
    pipe.send_command(RequestId::SetMaxApClientCount, body.as_bytes(), Interface::SoftAp, false)?;
    Ok(())
}

/// Disassociate clients idle for longer than `inactivity_timeout`
/// seconds.
pub fn set_max_ap_client_inactivity(
    pipe: &mut CommandPipe,
    inactivity_timeout: u32,
) -> Result<()> {
    let body = SetMaxApClientInactivityReqBody {
        inactivity_timeout: inactivity_timeout.into(),
    };
    pipe.send_command(
        RequestId::SetMaxApClientInactivity,
        body.as_bytes(),
        Interface::SoftAp,
        false,
    )?;
    Ok(())
}

/// RCPI of the last packets received from one associated client.
pub fn get_ap_client_signal_strength(
    pipe: &mut CommandPipe,
    client: &MacAddress,
) -> Result<u32> {
    let body = GetApClientSignalStrengthReqBody {
        mac: client.octet,
        reserved: [0; 2],
    };
    let reply = pipe.send_command_with_reply(
        RequestId::GetApClientSignalStrength,
        body.as_bytes(),
        Interface::SoftAp,
    )?;
    reply.decoded_status(RequestId::GetApClientSignalStrength)?;
    let cnf: GetApClientSignalStrengthCnfBody = reply.body()?;
    Ok(cnf.rcpi.get())
}
