// Licensed under the Apache-2.0 license

//! Transport core tests: framing, credit flow control, timeout recovery
//! and the receive path.

use wn720_host_command_types::registers::ControlRegister;
use wn720_host_command_types::{IndicationId, Interface, RequestId};
use wn720_host_hal::BufferKind;
use wn720_host_transport::{CommandPipe, Error, PlainLink};

use crate::common::{frame, status_confirmation, MockHost};

fn plain_pipe(host: &mut MockHost, credit_cap: u16) -> CommandPipe<'_> {
    let mut pipe = CommandPipe::new(host, Box::new(PlainLink));
    pipe.context_mut().set_input_buffer_max(credit_cap);
    pipe
}

#[test]
fn header_only_command_round_trip() {
    let mut host = MockHost::new();
    host.push_confirmation(
        RequestId::Disconnect.into(),
        status_confirmation(RequestId::Disconnect.into(), 0),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    pipe.send_command(RequestId::Disconnect, &[], Interface::Station, false)
        .unwrap();

    assert_eq!(host.transmitted.len(), 1);
    // id, info (station), 16-bit LE length: a 4-byte header-only frame.
    assert_eq!(host.transmitted[0], vec![0x44, 0x00, 0x04, 0x00]);
    assert_eq!(host.waited_events, vec![u8::from(RequestId::Disconnect)]);
    // Buffer returned to the pool on the success path.
    assert_eq!(host.allocations, host.frees);
    assert_eq!(host.lock_count, host.unlock_count);
}

#[test]
fn odd_payloads_are_padded_to_the_even_bus_boundary() {
    let mut host = MockHost::new();
    host.push_confirmation(
        RequestId::Connect.into(),
        status_confirmation(RequestId::Connect.into(), 0),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    pipe.send_command(RequestId::Connect, &[0xAB], Interface::Station, false)
        .unwrap();

    let wire = &host.transmitted[0];
    assert_eq!(wire.len(), 6);
    assert_eq!(wire[2..4], [0x06, 0x00]);
    assert_eq!(wire[4], 0xAB);
    assert_eq!(wire[5], 0x00);
}

#[test]
fn credit_never_exceeds_the_configured_maximum() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 3);

    // Requests without confirmation waits pile up in-flight credit.
    for _ in 0..3 {
        pipe.send_request_only(RequestId::StopScan, &[], Interface::Station, BufferKind::Control)
            .unwrap();
    }
    assert_eq!(pipe.context().used_buffers(), 3);

    // The fourth send is refused locally; nothing reaches the wire.
    let result =
        pipe.send_request_only(RequestId::StopScan, &[], Interface::Station, BufferKind::Control);
    assert_eq!(result, Err(Error::NoBufferCredit));
    assert_eq!(pipe.context().used_buffers(), 3);
    assert_eq!(host.transmitted.len(), 3);
}

#[test]
fn timeout_rolls_back_exactly_one_credit() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 4);

    // One request stays in flight so the counter is nonzero.
    pipe.send_request_only(RequestId::StopScan, &[], Interface::Station, BufferKind::Control)
        .unwrap();
    assert_eq!(pipe.context().used_buffers(), 1);

    // No confirmation scripted: the command times out and releases the
    // credit it took, and only that one.
    let result = pipe.send_command(RequestId::Disconnect, &[], Interface::Station, false);
    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(pipe.context().used_buffers(), 1);

    let result = pipe.send_command(RequestId::Disconnect, &[], Interface::Station, false);
    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(pipe.context().used_buffers(), 1);

    // Buffers were returned on every path.
    assert_eq!(host.allocations, host.frees);
}

#[test]
fn want_reply_hands_back_the_raw_confirmation() {
    let mut host = MockHost::new();
    let mut body = 0u32.to_le_bytes().to_vec();
    body.extend_from_slice(&220u32.to_le_bytes());
    host.push_confirmation(
        RequestId::GetSignalStrength.into(),
        frame(RequestId::GetSignalStrength.into(), 0, &body),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    let reply = pipe
        .send_command(RequestId::GetSignalStrength, &[], Interface::Station, true)
        .unwrap()
        .unwrap();

    assert_eq!(reply.raw_status().unwrap(), 0);
    assert_eq!(reply.body_bytes().len(), 8);
    reply.decoded_status(RequestId::GetSignalStrength).unwrap();
}

#[test]
fn confirmation_status_words_decode_per_namespace() {
    let mut host = MockHost::new();
    // 0x6 in the management namespace: no matching access point.
    host.push_confirmation(
        RequestId::Connect.into(),
        status_confirmation(RequestId::Connect.into(), 0x6),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    let result = pipe.send_command(RequestId::Connect, &[], Interface::Station, false);
    assert_eq!(result, Err(Error::NoMatchingAp));
}

#[test]
fn transmit_failure_releases_the_buffer_and_takes_no_credit() {
    let mut host = MockHost::new();
    host.fail_transmit = true;

    let mut pipe = plain_pipe(&mut host, 4);
    let result = pipe.send_command(RequestId::Disconnect, &[], Interface::Station, false);
    assert!(matches!(result, Err(Error::Hal(_))));
    assert_eq!(pipe.context().used_buffers(), 0);
    assert_eq!(host.allocations, host.frees);
    assert_eq!(host.lock_count, host.unlock_count);
}

#[test]
fn receive_posts_the_frame_and_releases_a_credit() {
    let mut host = MockHost::new();
    let confirmation = status_confirmation(RequestId::Connect.into(), 0);
    let wire_len = confirmation.len();
    host.push_rx(confirmation.clone(), 0);

    let mut pipe = plain_pipe(&mut host, 4);
    pipe.send_request_only(RequestId::Connect, &[], Interface::Station, BufferKind::Control)
        .unwrap();
    assert_eq!(pipe.context().used_buffers(), 1);

    let mut ctrl = ControlRegister(0);
    ctrl.set_next_output_words((wire_len / 2) as u16);
    pipe.receive_frame(&mut ctrl).unwrap();

    assert_eq!(pipe.context().used_buffers(), 0);
    assert_eq!(host.posted_events, vec![confirmation]);
    // The piggybacked control word replaced the caller's value.
    assert_eq!(ctrl.0, 0);
    assert_eq!(host.allocations, host.frees);
}

#[test]
fn indications_do_not_touch_the_credit_count() {
    let mut host = MockHost::new();
    let indication = frame(IndicationId::ScanComplete.into(), 0, &0u32.to_le_bytes());
    let wire_len = indication.len();
    host.push_rx(indication.clone(), 0);

    let mut pipe = plain_pipe(&mut host, 4);
    pipe.send_request_only(RequestId::StartScan, &[], Interface::Station, BufferKind::Control)
        .unwrap();
    assert_eq!(pipe.context().used_buffers(), 1);

    let mut ctrl = ControlRegister(0);
    ctrl.set_next_output_words((wire_len / 2) as u16);
    pipe.receive_frame(&mut ctrl).unwrap();

    assert_eq!(pipe.context().used_buffers(), 1);
    assert_eq!(host.posted_events, vec![indication]);
}

#[test]
fn no_pending_frame_is_reported_as_such() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 4);

    let mut ctrl = ControlRegister(0);
    let result = pipe.receive_frame(&mut ctrl);
    assert_eq!(result, Err(Error::NoPacketPending));
    assert_eq!(host.lock_count, host.unlock_count);
}
