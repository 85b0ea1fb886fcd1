// Licensed under the Apache-2.0 license

//! Command façade tests: payload assembly, sub-block ordering and the
//! join end-to-end scenario.

use wn720_host_command_types::station::{ScanMode, SecurityMode, SsidDef};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_commands::{data, general, station};
use wn720_host_transport::{CommandPipe, Error, PlainLink};

use crate::common::{frame, status_confirmation, MockHost};

fn plain_pipe(host: &mut MockHost, credit_cap: u16) -> CommandPipe<'_> {
    let mut pipe = CommandPipe::new(host, Box::new(PlainLink));
    pipe.context_mut().set_input_buffer_max(credit_cap);
    pipe
}

#[test]
fn join_with_empty_ies_sizes_the_request_exactly() {
    let mut host = MockHost::new();
    host.push_confirmation(
        RequestId::Connect.into(),
        status_confirmation(RequestId::Connect.into(), 0),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    station::connect(
        &mut pipe,
        b"lab7",
        None,
        11,
        SecurityMode::Wpa2Psk,
        false,
        false,
        b"pass8let",
        &[],
    )
    .unwrap();

    // Header (4) + fixed connect body (116) + no IE room, already even.
    let wire = &host.transmitted[0];
    assert_eq!(wire.len(), 120);
    assert_eq!(wire[0], u8::from(RequestId::Connect));
    assert_eq!(wire[1], 0x00);
    assert_eq!(u16::from_le_bytes([wire[2], wire[3]]), 120);

    // ssid_length = 4, passkey length = 8, absent BSSID wildcarded.
    assert_eq!(u32::from_le_bytes([wire[4], wire[5], wire[6], wire[7]]), 4);
    assert_eq!(&wire[8..12], b"lab7");
    assert_eq!(&wire[40..46], &[0xFF; 6]);
}

#[test]
fn join_timeout_reports_timeout_and_rolls_back_one_credit() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 4);

    let result = station::connect(
        &mut pipe,
        b"lab7",
        None,
        11,
        SecurityMode::Wpa2Psk,
        false,
        false,
        b"pass8let",
        &[],
    );
    assert_eq!(result, Err(Error::Timeout));
    assert_eq!(pipe.context().used_buffers(), 0);
    assert_eq!(host.transmitted.len(), 1);
}

#[test]
fn oversized_join_parameters_are_rejected_before_transmission() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 4);

    let long_ssid = [b'x'; 33];
    let result = station::connect(
        &mut pipe,
        &long_ssid,
        None,
        1,
        SecurityMode::Open,
        false,
        false,
        &[],
        &[],
    );
    assert_eq!(result, Err(Error::InvalidParameter));
    assert!(host.transmitted.is_empty());
}

#[test]
fn scan_concatenates_sub_blocks_in_wire_order() {
    let mut host = MockHost::new();
    host.push_confirmation(
        RequestId::StartScan.into(),
        status_confirmation(RequestId::StartScan.into(), 0),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    let channels = [1u8, 6, 11];
    let ssids = [SsidDef::new(b"lab")];
    let ie = [0xDD, 0x09];
    station::start_scan(&mut pipe, ScanMode::Active, &channels, &ssids, &ie, None).unwrap();

    let wire = &host.transmitted[0];
    // Header 4 + fixed body 8 + channels 3 + ssid 36 + ie 2 + bssid 6 =
    // 59, rounded up to 60.
    assert_eq!(wire.len(), 60);

    // Fixed body counts.
    assert_eq!(u16::from_le_bytes([wire[4], wire[5]]), 1); // active scan
    assert_eq!(u16::from_le_bytes([wire[6], wire[7]]), 3); // channels
    assert_eq!(u16::from_le_bytes([wire[8], wire[9]]), 1); // ssids
    assert_eq!(u16::from_le_bytes([wire[10], wire[11]]), 2); // ie bytes

    // Channel list, SSID list, IEs, then the wildcard BSSID.
    assert_eq!(&wire[12..15], &channels);
    assert_eq!(u32::from_le_bytes([wire[15], wire[16], wire[17], wire[18]]), 3);
    assert_eq!(&wire[19..22], b"lab");
    assert_eq!(&wire[51..53], &ie);
    assert_eq!(&wire[53..59], &[0xFF; 6]);
}

#[test]
fn configuration_chunks_are_length_prefixed() {
    let mut host = MockHost::new();
    host.push_confirmation(
        RequestId::Configuration.into(),
        status_confirmation(RequestId::Configuration.into(), 0),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    general::send_configuration(&mut pipe, b"{e:{a:0}}").unwrap();

    let wire = &host.transmitted[0];
    assert_eq!(wire[0], u8::from(RequestId::Configuration));
    assert_eq!(u16::from_le_bytes([wire[4], wire[5]]), 9);
    assert_eq!(&wire[6..15], b"{e:{a:0}}");
}

#[test]
fn ethernet_frames_are_sent_without_a_confirmation_wait() {
    let mut host = MockHost::new();
    let mut pipe = plain_pipe(&mut host, 4);

    // No confirmation scripted; a confirmation wait would time out.
    data::send_ethernet_frame(&mut pipe, &[0xAA; 60], Interface::Station, 2).unwrap();
    data::send_ethernet_frame(&mut pipe, &[0xBB; 60], Interface::Station, 2).unwrap();

    // Both frames hold the in-flight credit until their transmit
    // confirmations come back through the receive path.
    assert_eq!(pipe.context().used_buffers(), 2);

    assert_eq!(host.transmitted.len(), 2);
    let first = &host.transmitted[0];
    let second = &host.transmitted[1];
    assert_eq!(first[0], u8::from(RequestId::SendFrame));

    // Rolling packet ids, one per frame.
    let id_first = u16::from_le_bytes([first[6], first[7]]);
    let id_second = u16::from_le_bytes([second[6], second[7]]);
    assert_eq!(id_second, id_first + 1);
}

#[test]
fn signal_strength_extracts_the_rcpi_field() {
    let mut host = MockHost::new();
    let mut body = 0u32.to_le_bytes().to_vec();
    body.extend_from_slice(&220u32.to_le_bytes());
    host.push_confirmation(
        RequestId::GetSignalStrength.into(),
        frame(RequestId::GetSignalStrength.into(), 0, &body),
    );

    let mut pipe = plain_pipe(&mut host, 4);
    let rcpi = station::get_signal_strength(&mut pipe).unwrap();
    assert_eq!(rcpi, 220);
}
