// Licensed under the Apache-2.0 license

//! Address and frame filter commands

use wn720_host_command_types::access_point::{MacFilterAddrReqBody, SetUnicastFilterReqBody};
use wn720_host_command_types::station::{
    MacAddress, MulticastAddrReqBody, SetBroadcastFilterReqBody,
};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_transport::{CommandPipe, Result};
use zerocopy::IntoBytes;

fn multicast_body(mac_address: &MacAddress) -> MulticastAddrReqBody {
    MulticastAddrReqBody {
        mac: mac_address.octet,
        reserved: [0; 2],
    }
}

/// Add a multicast address to the filter whitelist.
pub fn add_multicast_address(
    pipe: &mut CommandPipe,
    mac_address: &MacAddress,
    interface: Interface,
) -> Result<()> {
    let body = multicast_body(mac_address);
    pipe.send_command(RequestId::AddMulticastAddr, body.as_bytes(), interface, false)?;
    Ok(())
}

/// Remove a multicast address from the filter whitelist.
pub fn remove_multicast_address(
    pipe: &mut CommandPipe,
    mac_address: &MacAddress,
    interface: Interface,
) -> Result<()> {
    let body = multicast_body(mac_address);
    pipe.send_command(RequestId::RemoveMulticastAddr, body.as_bytes(), interface, false)?;
    Ok(())
}

/// Enable or disable broadcast filtering in station mode.
pub fn set_broadcast_filter(pipe: &mut CommandPipe, filter: bool) -> Result<()> {
    let body = SetBroadcastFilterReqBody {
        filter: (filter as u32).into(),
    };
    pipe.send_command(RequestId::SetBroadcastFilter, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Enable or disable unicast filtering on the soft-AP interface.
pub fn set_unicast_filter(pipe: &mut CommandPipe, filter: bool) -> Result<()> {
    let body = SetUnicastFilterReqBody {
        filter: (filter as u32).into(),
    };
    pipe.send_command(RequestId::SetUnicastFilter, body.as_bytes(), Interface::SoftAp, false)?;
    Ok(())
}

/// Add a MAC address to the device whitelist. The broadcast address
/// allows every client.
pub fn add_whitelist_address(pipe: &mut CommandPipe, mac_address: &MacAddress) -> Result<()> {
    let body = MacFilterAddrReqBody {
        mac: mac_address.octet,
        reserved: [0; 2],
    };
    pipe.send_command(RequestId::AddWhitelistAddr, body.as_bytes(), Interface::SoftAp, false)?;
    Ok(())
}

/// Add a MAC address to the device blacklist. The broadcast address
/// denies every client.
pub fn add_blacklist_address(pipe: &mut CommandPipe, mac_address: &MacAddress) -> Result<()> {
    let body = MacFilterAddrReqBody {
        mac: mac_address.octet,
        reserved: [0; 2],
    };
    pipe.send_command(RequestId::AddBlacklistAddr, body.as_bytes(), Interface::SoftAp, false)?;
    Ok(())
}
