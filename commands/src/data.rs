// Licensed under the Apache-2.0 license

//! Data path: Ethernet frame transmission
//!
//! Data frames share the request framing but never wait for a
//! confirmation; delivery is reported asynchronously through the receive
//! path.

use alloc::vec::Vec;

use wn720_host_command_types::station::{SendFrameReqBody, FRAME_TYPE_DATA};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_hal::BufferKind;
use wn720_host_transport::{CommandPipe, Result};
use zerocopy::IntoBytes;

/// Queue one Ethernet frame for transmission on `interface` with the
/// given priority level.
pub fn send_ethernet_frame(
    pipe: &mut CommandPipe,
    frame_data: &[u8],
    interface: Interface,
    priority: u8,
) -> Result<()> {
    let packet_id = pipe.context_mut().next_data_frame_id();
    let body = SendFrameReqBody {
        frame_type: FRAME_TYPE_DATA,
        priority,
        packet_id: packet_id.into(),
        packet_data_length: (frame_data.len() as u32).into(),
    };

    let mut payload =
        Vec::with_capacity(core::mem::size_of::<SendFrameReqBody>() + frame_data.len());
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(frame_data);

    pipe.send_request_only(RequestId::SendFrame, &payload, interface, BufferKind::DataFrame)
}
