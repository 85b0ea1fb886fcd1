// Licensed under the Apache-2.0 license

//! Driver context
//!
//! Per-device state, constructed once at initialization and owned by the
//! transport core. All mutation happens while the bus lock is held; the
//! context is never global.

use wn720_host_command_types::startup::{StartupIndBody, OPN_SIZE};
use wn720_host_command_types::station::MacAddress;

/// Firmware version triple reported by the startup indication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FirmwareVersion {
    pub major: u8,
    pub minor: u8,
    pub build: u8,
}

/// Chip identity captured from the startup indication.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChipIdentity {
    pub firmware: FirmwareVersion,
    pub mac_addr: [MacAddress; 2],
    pub opn: [u8; OPN_SIZE],
}

/// Per-device driver state.
#[derive(Debug)]
pub struct DriverContext {
    started: bool,
    sleeping: bool,
    power_save_active: bool,
    used_buffers: u16,
    input_buffer_max: u16,
    data_frame_id: u16,
    identity: ChipIdentity,
}

impl Default for DriverContext {
    fn default() -> Self {
        DriverContext::new()
    }
}

impl DriverContext {
    pub fn new() -> Self {
        DriverContext {
            started: false,
            sleeping: false,
            power_save_active: false,
            used_buffers: 0,
            // Until the startup indication reports the real cap, allow a
            // single request in flight.
            input_buffer_max: 1,
            data_frame_id: 0,
            identity: ChipIdentity::default(),
        }
    }

    /// Requests currently in flight (sent, not yet confirmed).
    pub fn used_buffers(&self) -> u16 {
        self.used_buffers
    }

    /// Chip-advertised credit cap.
    pub fn input_buffer_max(&self) -> u16 {
        self.input_buffer_max
    }

    /// Override the credit cap. Normally set by
    /// [`DriverContext::absorb_startup`].
    pub fn set_input_buffer_max(&mut self, max: u16) {
        self.input_buffer_max = max;
    }

    /// True when another request may be sent.
    pub fn has_credit(&self) -> bool {
        self.used_buffers < self.input_buffer_max
    }

    /// Account for a transmitted request.
    pub fn consume_credit(&mut self) {
        self.used_buffers += 1;
    }

    /// Account for a confirmation receipt or a timed-out request.
    /// Saturates at zero; the credit count can never go negative.
    pub fn release_credit(&mut self) {
        self.used_buffers = self.used_buffers.saturating_sub(1);
    }

    /// Rolling identifier stamped on outgoing data frames.
    pub fn next_data_frame_id(&mut self) -> u16 {
        self.data_frame_id = self.data_frame_id.wrapping_add(1);
        self.data_frame_id
    }

    /// Capture chip identity and the credit cap from the startup
    /// indication.
    pub fn absorb_startup(&mut self, startup: &StartupIndBody) {
        self.identity.firmware = FirmwareVersion {
            major: startup.firmware_major,
            minor: startup.firmware_minor,
            build: startup.firmware_build,
        };
        self.identity.mac_addr = [
            MacAddress::from(startup.mac_addr_0),
            MacAddress::from(startup.mac_addr_1),
        ];
        self.identity.opn = startup.opn;
        self.input_buffer_max = startup.num_inp_ch_bufs.get();
    }

    pub fn identity(&self) -> &ChipIdentity {
        &self.identity
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn set_started(&mut self, started: bool) {
        self.started = started;
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    pub fn set_sleeping(&mut self, sleeping: bool) {
        self.sleeping = sleeping;
    }

    pub fn power_save_active(&self) -> bool {
        self.power_save_active
    }

    pub fn set_power_save_active(&mut self, active: bool) {
        self.power_save_active = active;
    }
}
