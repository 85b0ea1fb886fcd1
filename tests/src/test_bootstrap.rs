// Licensed under the Apache-2.0 license

//! Bootstrap tests: the full init sequence, firmware transfer flow
//! control, keyset policy and best-effort deinitialization.

use wn720_host_command_types::registers::{
    RegisterId, ADDR_DOWNLOAD_FIFO_BASE, ADDR_DWL_CTRL_AREA_FW_HASH,
    ADDR_DWL_CTRL_AREA_HOST_STATUS, ADDR_DWL_CTRL_AREA_SIGNATURE, DOWNLOAD_FIFO_SIZE,
    HOST_STATE_OK_TO_JUMP,
};
use wn720_host_command_types::secure::is_encrypted_frame;
use wn720_host_command_types::RequestId;
use wn720_host_device::{firmware, Wn720Device};
use wn720_host_hal::SoftLinkCipher;
use wn720_host_transport::{Error, PlainLink, SecureLink};

use crate::common::{firmware_image, status_confirmation, MockHost, TEST_CHIP_KEYSET};

#[test]
fn init_walks_the_whole_bootstrap_sequence() {
    let mut host = MockHost::new();
    host.push_startup(4, 0);
    host.push_confirmation(
        RequestId::Configuration.into(),
        status_confirmation(RequestId::Configuration.into(), 0),
    );
    host.pds = vec![b"{e:{a:0}}".to_vec()];

    let mut device = Wn720Device::new(&mut host, Box::new(PlainLink));
    device.init().unwrap();

    let pipe = device.pipe();
    assert!(pipe.context().is_started());
    assert_eq!(pipe.context().input_buffer_max(), 4);

    let identity = *pipe.context().identity();
    assert_eq!(identity.firmware.major, 3);
    assert_eq!(identity.firmware.minor, 12);
    assert_eq!(identity.firmware.build, 4);
    assert_eq!(&identity.opn, b"WN7201B000XXXX");
    assert_eq!(identity.mac_addr[0].octet, [0x00, 0x0D, 0x6F, 0x02, 0x11, 0x22]);

    // Host-side effects of the sequence.
    assert!(host.irq_enabled);
    assert_eq!(host.wake_pin_history, vec![true]);
    assert_eq!(
        host.aux.get(&ADDR_DWL_CTRL_AREA_HOST_STATUS),
        Some(&HOST_STATE_OK_TO_JUMP)
    );

    // Signature and hash blocks were staged into the control area.
    assert!(host
        .aux_block_writes
        .iter()
        .any(|(addr, data)| *addr == ADDR_DWL_CTRL_AREA_SIGNATURE && data.len() == 64));
    assert!(host
        .aux_block_writes
        .iter()
        .any(|(addr, data)| *addr == ADDR_DWL_CTRL_AREA_FW_HASH && data.len() == 8));

    // The 2048-byte image went through the FIFO in two full blocks.
    let fifo_writes: Vec<_> = host
        .aux_block_writes
        .iter()
        .filter(|(addr, _)| (ADDR_DOWNLOAD_FIFO_BASE..ADDR_DOWNLOAD_FIFO_BASE + DOWNLOAD_FIFO_SIZE)
            .contains(addr))
        .collect();
    assert_eq!(fifo_writes.len(), 2);
    assert!(fifo_writes.iter().all(|(_, data)| data.len() == 1024));

    // Message-passing mode: the direct access bit is cleared, the frame
    // interrupt routed to the host.
    let config = host.registers32[&RegisterId::Config];
    assert_eq!(config & 0x400, 0);
    assert_ne!(config & 0x1_0000, 0);

    // The platform-data chunk was sent as a configuration command.
    assert!(host
        .transmitted
        .iter()
        .any(|frame| frame[0] == u8::from(RequestId::Configuration)));
}

#[test]
fn init_establishes_the_secure_channel_in_trusted_mode() {
    let mut host = MockHost::new();
    host.mac_key = Some([0x77; 32]);
    host.push_startup(4, 3); // trusted enforced

    let mut exchange_body = 0u32.to_le_bytes().to_vec();
    exchange_body.extend_from_slice(&[0xD0; 32]);
    host.push_confirmation(
        RequestId::SecureLinkExchangePubKeys.into(),
        crate::common::frame(
            RequestId::SecureLinkExchangePubKeys.into(),
            0,
            &exchange_body,
        ),
    );
    host.push_confirmation(
        RequestId::SecureLinkConfigure.into(),
        status_confirmation(RequestId::SecureLinkConfigure.into(), 0),
    );

    let link = SecureLink::new(Box::new(SoftLinkCipher));
    let mut device = Wn720Device::new(&mut host, Box::new(link));
    device.init().unwrap();

    assert!(device.pipe().context().is_started());

    // The key exchange went out in the clear; the bitmap configuration
    // after it travels encrypted under the fresh session key.
    let exchange = host
        .transmitted
        .iter()
        .find(|frame| frame[0] == u8::from(RequestId::SecureLinkExchangePubKeys))
        .expect("exchange request transmitted");
    assert!(!is_encrypted_frame(exchange));
    let last = host.transmitted.last().unwrap();
    assert!(is_encrypted_frame(last));
}

#[test]
fn keyset_mismatch_aborts_init_with_invalid_key() {
    let mut host = MockHost::new();
    host.firmware = firmware_image("4C", 2048);
    host.push_startup(4, 0);

    let mut device = Wn720Device::new(&mut host, Box::new(PlainLink));
    let result = device.init();

    assert_eq!(result, Err(Error::InvalidKey));
    assert!(!device.pipe().context().is_started());
    // The failing path released the bus and host resources.
    assert!(!host.bus_up);
    assert!(!host.host_up);
    assert_eq!(TEST_CHIP_KEYSET, 0x4B);
}

#[test]
fn stalled_consumer_times_out_and_never_overruns_the_fifo() {
    let mut host = MockHost::new();
    host.stall_consumer = true;
    host.firmware = firmware_image("4B", 40 * 1024);

    let result = firmware::download(&mut host);
    assert_eq!(result, Err(Error::FirmwareDownloadTimeout));

    // The producer filled the FIFO exactly and then refused to overrun
    // it: every staged block start fits the window left by the stalled
    // consumer at offset zero.
    let fifo_writes: Vec<_> = host
        .aux_block_writes
        .iter()
        .filter(|(addr, _)| (ADDR_DOWNLOAD_FIFO_BASE..ADDR_DOWNLOAD_FIFO_BASE + DOWNLOAD_FIFO_SIZE)
            .contains(addr))
        .collect();
    assert_eq!(fifo_writes.len() as u32, DOWNLOAD_FIFO_SIZE / 1024);
    for (addr, data) in &fifo_writes {
        assert!(addr - ADDR_DOWNLOAD_FIFO_BASE <= DOWNLOAD_FIFO_SIZE - 1024);
        assert_eq!(data.len(), 1024);
    }
}

#[test]
fn deinit_keeps_cleaning_up_after_a_failing_step() {
    let mut host = MockHost::new();
    host.irq_enabled = true;
    host.bus_up = true;
    // The shutdown request cannot reach the wire.
    host.fail_transmit = true;

    let mut device = Wn720Device::new(&mut host, Box::new(PlainLink));
    device.set_wake_up_bit(true).unwrap();

    let result = device.deinit();

    // The first failure is reported...
    assert!(matches!(result, Err(Error::Hal(_))));
    // ...but every later teardown step still ran.
    assert_eq!(host.registers16[&RegisterId::Control] & 0x1000, 0);
    assert_eq!(host.wake_pin_history, vec![false]);
    assert!(!host.irq_enabled);
    assert!(!host.bus_up);
}
