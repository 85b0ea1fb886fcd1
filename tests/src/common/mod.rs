// Licensed under the Apache-2.0 license

//! Scriptable host adapter for driver tests
//!
//! [`MockHost`] implements the whole [`HostBus`] surface: a register
//! map, an auxiliary-bus memory emulating the download-area handshake, a
//! scriptable confirmation channel and a firmware image source. Tests
//! inspect the captured traffic afterwards.

use std::collections::{HashMap, VecDeque};

use wn720_host_command_types::registers::{
    RegisterId, ADDR_DWL_CTRL_AREA_GET, ADDR_DWL_CTRL_AREA_HOST_STATUS,
    ADDR_DWL_CTRL_AREA_NCP_STATUS, ADDR_DWL_CTRL_AREA_PUT, ADDR_PTE_INFO, HOST_STATE_INFO_READ,
    HOST_STATE_NOT_READY, HOST_STATE_OK_TO_JUMP, HOST_STATE_READY, HOST_STATE_UPLOAD_COMPLETE,
    HOST_STATE_UPLOAD_PENDING, NCP_STATE_AUTH_OK, NCP_STATE_DOWNLOAD_PENDING,
    NCP_STATE_INFO_READY, NCP_STATE_READY,
};
use wn720_host_command_types::startup::StartupIndBody;
use wn720_host_command_types::{IndicationId, HEADER_SIZE};
use wn720_host_hal::{BufferKind, HalError, HalResult, HostBus};
use zerocopy::{FromZeros, IntoBytes};

/// Test keyset: the chip reports 0x4B and a matching image spells "4B".
pub const TEST_CHIP_KEYSET: u8 = 0x4B;

/// Session key the mock's key derivation hands out.
pub const TEST_SESSION_KEY: [u8; 32] = [0x11; 32];

/// Assemble a frame: header followed by a body.
pub fn frame(id: u8, info: u8, body: &[u8]) -> Vec<u8> {
    let length = (HEADER_SIZE + body.len()) as u16;
    let mut frame = vec![id, info];
    frame.extend_from_slice(&length.to_le_bytes());
    frame.extend_from_slice(body);
    frame
}

/// A confirmation frame carrying only a status word.
pub fn status_confirmation(id: u8, status: u32) -> Vec<u8> {
    frame(id, 0, &status.to_le_bytes())
}

/// A firmware image with the standard framing: a keyset block spelling
/// `keyset` as two hex characters at offsets 6-7, a signature block, a
/// hash block, then `payload_len` bytes of image data.
pub fn firmware_image(keyset: &str, payload_len: usize) -> Vec<u8> {
    let mut image = Vec::new();
    let mut keyset_block = *b"WN720_??";
    keyset_block[6..8].copy_from_slice(keyset.as_bytes());
    image.extend_from_slice(&keyset_block);
    image.extend_from_slice(&[0x5A; 64]);
    image.extend_from_slice(&[0xA7; 8]);
    image.extend((0..payload_len).map(|i| (i % 251) as u8));
    image
}

/// A startup indication body advertising `num_buffers` input buffers and
/// the given secure-channel capabilities.
pub fn startup_body(num_buffers: u16, capabilities: u8) -> StartupIndBody {
    let mut body = StartupIndBody::new_zeroed();
    body.hardware_id = 0x0720.into();
    body.num_inp_ch_bufs = num_buffers.into();
    body.size_inp_ch_buf = 1600.into();
    body.num_interfaces = 2;
    body.firmware_major = 3;
    body.firmware_minor = 12;
    body.firmware_build = 4;
    body.capabilities = capabilities;
    body.opn.copy_from_slice(b"WN7201B000XXXX");
    body.mac_addr_0 = [0x00, 0x0D, 0x6F, 0x02, 0x11, 0x22];
    body.mac_addr_1 = [0x00, 0x0D, 0x6F, 0x02, 0x11, 0x23];
    body
}

/// Scriptable [`HostBus`] double.
pub struct MockHost {
    // register map
    pub registers16: HashMap<RegisterId, u16>,
    pub registers32: HashMap<RegisterId, u32>,
    pub aux: HashMap<u32, u32>,
    pub aux_block_writes: Vec<(u32, Vec<u8>)>,
    /// When set, the firmware FIFO consumer never advances.
    pub stall_consumer: bool,

    // bus traffic
    pub locked: bool,
    pub lock_count: usize,
    pub unlock_count: usize,
    pub transmitted: Vec<Vec<u8>>,
    pub fail_transmit: bool,
    pub waited_events: Vec<u8>,
    pub posted_events: Vec<Vec<u8>>,
    pub pending_rx: VecDeque<Vec<u8>>,
    pub confirmations: HashMap<u8, VecDeque<Vec<u8>>>,

    // buffer pool accounting
    pub allocations: usize,
    pub frees: usize,

    // platform resources
    pub firmware: Vec<u8>,
    firmware_cursor: usize,
    pub pds: Vec<Vec<u8>>,
    pub mac_key: Option<[u8; 32]>,
    pub wake_pin_history: Vec<bool>,
    pub waits: u32,
    pub renegotiations_scheduled: usize,
    pub irq_enabled: bool,
    pub bus_up: bool,
    pub host_up: bool,
    pub fail_deinit_bus: bool,
}

impl Default for MockHost {
    fn default() -> Self {
        MockHost::new()
    }
}

impl MockHost {
    pub fn new() -> Self {
        let mut registers32 = HashMap::new();
        // Power-on configuration: CPU held in reset, clock gated,
        // direct access mode.
        registers32.insert(RegisterId::Config, 0x0000_0700);

        let mut aux = HashMap::new();
        aux.insert(ADDR_PTE_INFO + 12, (TEST_CHIP_KEYSET as u32) << 8);

        MockHost {
            registers16: HashMap::new(),
            registers32,
            aux,
            aux_block_writes: Vec::new(),
            stall_consumer: false,
            locked: false,
            lock_count: 0,
            unlock_count: 0,
            transmitted: Vec::new(),
            fail_transmit: false,
            waited_events: Vec::new(),
            posted_events: Vec::new(),
            pending_rx: VecDeque::new(),
            confirmations: HashMap::new(),
            allocations: 0,
            frees: 0,
            firmware: firmware_image("4B", 2048),
            firmware_cursor: 0,
            pds: Vec::new(),
            mac_key: None,
            wake_pin_history: Vec::new(),
            waits: 0,
            renegotiations_scheduled: 0,
            irq_enabled: false,
            bus_up: false,
            host_up: false,
            fail_deinit_bus: false,
        }
    }

    /// Script a confirmation frame for `id`.
    pub fn push_confirmation(&mut self, id: u8, frame: Vec<u8>) {
        self.confirmations.entry(id).or_default().push_back(frame);
    }

    /// Script the startup indication.
    pub fn push_startup(&mut self, num_buffers: u16, capabilities: u8) {
        let body = startup_body(num_buffers, capabilities);
        self.push_confirmation(
            IndicationId::Startup.into(),
            frame(IndicationId::Startup.into(), 0, body.as_bytes()),
        );
    }

    /// Queue a raw buffer for the receive path, piggybacked control
    /// register value included.
    pub fn push_rx(&mut self, mut wire: Vec<u8>, next_ctrl: u16) {
        wire.extend_from_slice(&next_ctrl.to_le_bytes());
        self.pending_rx.push_back(wire);
    }
}

impl HostBus for MockHost {
    fn init(&mut self) -> HalResult<()> {
        self.host_up = true;
        Ok(())
    }

    fn deinit(&mut self) -> HalResult<()> {
        self.host_up = false;
        Ok(())
    }

    fn init_bus(&mut self) -> HalResult<()> {
        self.bus_up = true;
        Ok(())
    }

    fn deinit_bus(&mut self) -> HalResult<()> {
        self.bus_up = false;
        if self.fail_deinit_bus {
            return Err(HalError::BusFault);
        }
        Ok(())
    }

    fn lock(&mut self) -> HalResult<()> {
        assert!(!self.locked, "bus lock is not recursive");
        self.locked = true;
        self.lock_count += 1;
        Ok(())
    }

    fn unlock(&mut self) -> HalResult<()> {
        assert!(self.locked, "unlock without lock");
        self.locked = false;
        self.unlock_count += 1;
        Ok(())
    }

    fn allocate_buffer(&mut self, _kind: BufferKind, len: usize) -> HalResult<Vec<u8>> {
        self.allocations += 1;
        Ok(vec![0xEE; len])
    }

    fn free_buffer(&mut self, _buffer: Vec<u8>, _kind: BufferKind) {
        self.frees += 1;
    }

    fn transmit_frame(&mut self, frame: &[u8]) -> HalResult<()> {
        assert!(self.locked, "transmit outside the bus lock");
        if self.fail_transmit {
            return Err(HalError::BusFault);
        }
        self.transmitted.push(frame.to_vec());
        Ok(())
    }

    fn read_frame(&mut self, buffer: &mut [u8]) -> HalResult<()> {
        assert!(self.locked, "frame read outside the bus lock");
        let wire = self.pending_rx.pop_front().ok_or(HalError::BusFault)?;
        if wire.len() != buffer.len() {
            return Err(HalError::BusFault);
        }
        buffer.copy_from_slice(&wire);
        Ok(())
    }

    fn reg_read_16(&mut self, reg: RegisterId) -> HalResult<u16> {
        let mut value = *self.registers16.get(&reg).unwrap_or(&0);
        if reg == RegisterId::Control && value & 0x1000 != 0 {
            // Wake-up requested: the chip reports ready.
            value |= 0x2000;
        }
        Ok(value)
    }

    fn reg_write_16(&mut self, reg: RegisterId, value: u16) -> HalResult<()> {
        self.registers16.insert(reg, value);
        Ok(())
    }

    fn reg_read_32(&mut self, reg: RegisterId) -> HalResult<u32> {
        Ok(*self.registers32.get(&reg).unwrap_or(&0))
    }

    fn reg_write_32(&mut self, reg: RegisterId, value: u32) -> HalResult<()> {
        self.registers32.insert(reg, value);
        Ok(())
    }

    fn aux_read_32(&mut self, address: u32) -> HalResult<u32> {
        if address == ADDR_DWL_CTRL_AREA_NCP_STATUS {
            // The chip-side download state machine follows the host
            // handshake writes.
            let host_state = *self.aux.get(&ADDR_DWL_CTRL_AREA_HOST_STATUS).unwrap_or(&0);
            let ncp_state = match host_state {
                HOST_STATE_NOT_READY => 0,
                HOST_STATE_READY => NCP_STATE_INFO_READY,
                HOST_STATE_INFO_READ => NCP_STATE_READY,
                HOST_STATE_UPLOAD_PENDING => NCP_STATE_DOWNLOAD_PENDING,
                HOST_STATE_UPLOAD_COMPLETE | HOST_STATE_OK_TO_JUMP => NCP_STATE_AUTH_OK,
                _ => 0,
            };
            return Ok(ncp_state);
        }
        if address == ADDR_DWL_CTRL_AREA_GET {
            if self.stall_consumer {
                return Ok(0);
            }
            // The consumer keeps pace with the producer.
            return Ok(*self.aux.get(&ADDR_DWL_CTRL_AREA_PUT).unwrap_or(&0));
        }
        Ok(*self.aux.get(&address).unwrap_or(&0))
    }

    fn aux_write_32(&mut self, address: u32, value: u32) -> HalResult<()> {
        self.aux.insert(address, value);
        Ok(())
    }

    fn aux_write(&mut self, address: u32, data: &[u8]) -> HalResult<()> {
        self.aux_block_writes.push((address, data.to_vec()));
        Ok(())
    }

    fn setup_waited_event(&mut self, id: u8) -> HalResult<()> {
        self.waited_events.push(id);
        Ok(())
    }

    fn wait_for_confirmation(&mut self, id: u8, _timeout_ms: u32) -> HalResult<Vec<u8>> {
        self.confirmations
            .get_mut(&id)
            .and_then(|queue| queue.pop_front())
            .ok_or(HalError::Timeout)
    }

    fn post_event(&mut self, frame: &[u8]) -> HalResult<()> {
        self.posted_events.push(frame.to_vec());
        Ok(())
    }

    fn set_wake_up_pin(&mut self, state: bool) -> HalResult<()> {
        self.wake_pin_history.push(state);
        Ok(())
    }

    fn wait_for_wake_up(&mut self) -> HalResult<()> {
        Ok(())
    }

    fn wait(&mut self, time_units: u32) {
        self.waits += time_units;
    }

    fn enable_platform_interrupt(&mut self) -> HalResult<()> {
        self.irq_enabled = true;
        Ok(())
    }

    fn disable_platform_interrupt(&mut self) -> HalResult<()> {
        self.irq_enabled = false;
        Ok(())
    }

    fn firmware_size(&mut self) -> HalResult<u32> {
        Ok(self.firmware.len() as u32)
    }

    fn firmware_data(&mut self, buffer: &mut [u8]) -> HalResult<()> {
        let end = self.firmware_cursor + buffer.len();
        if end > self.firmware.len() {
            return Err(HalError::ResourceUnavailable);
        }
        buffer.copy_from_slice(&self.firmware[self.firmware_cursor..end]);
        self.firmware_cursor = end;
        Ok(())
    }

    fn pds_chunk_count(&mut self) -> HalResult<usize> {
        Ok(self.pds.len())
    }

    fn pds_chunk(&mut self, index: usize) -> HalResult<Vec<u8>> {
        self.pds
            .get(index)
            .cloned()
            .ok_or(HalError::ResourceUnavailable)
    }

    fn secure_link_mac_key(&mut self) -> HalResult<[u8; 32]> {
        self.mac_key.ok_or(HalError::ResourceUnavailable)
    }

    fn host_public_key(&mut self) -> HalResult<[u8; 32]> {
        Ok([0x42; 32])
    }

    fn derive_session_key(&mut self, _device_pub_key: &[u8; 32]) -> HalResult<[u8; 32]> {
        Ok(TEST_SESSION_KEY)
    }

    fn schedule_renegotiation(&mut self) {
        self.renegotiations_scheduled += 1;
    }
}
