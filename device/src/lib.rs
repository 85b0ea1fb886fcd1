// Licensed under the Apache-2.0 license

//! WN720 Device Lifecycle
//!
//! Brings the chip from power-on to a running firmware and back down:
//! register handshake, bootloader activation, firmware transfer, startup
//! indication capture, secure-channel bring-up and platform-data
//! configuration. Initialization aborts on the first failing step and
//! tears everything down; deinitialization is deliberately best-effort,
//! every teardown step runs even after an earlier one fails.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use wn720_host_command_types::registers::{ConfigRegister, ControlRegister, RegisterId};
use wn720_host_command_types::secure::{EncryptionBitmap, MacKeyDestination};
use wn720_host_command_types::startup::{LinkMode, StartupIndBody};
use wn720_host_command_types::{IndicationId, Interface, RequestId, HEADER_SIZE};
use wn720_host_commands::{general, secure_link};
use wn720_host_hal::{BufferKind, HostBus};
use wn720_host_transport::{
    CommandPipe, Error, LinkLayer, Result, DEFAULT_REQUEST_TIMEOUT_MS,
};
use zerocopy::FromBytes;

pub mod bootstrap;
pub mod firmware;
pub mod retry;

pub use retry::poll_until;

/// Antenna configuration, applied through an inline platform-data chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntennaConfig {
    Antenna1Only = 0,
    Antenna2Only = 1,
    Tx1Rx2 = 2,
    Tx2Rx1 = 3,
    Diversity = 4,
}

// Platform-data keys for the antenna selection section.
const PDS_ANTENNA_SEL_KEY: char = 'j';
const PDS_KEY_A: char = 'a';
const PDS_KEY_B: char = 'b';

/// A WN720 device and the command pipe driving it.
pub struct Wn720Device<'h> {
    pipe: CommandPipe<'h>,
}

impl<'h> Wn720Device<'h> {
    /// Wrap a host adapter and a link layer. Nothing touches the
    /// hardware until [`Wn720Device::init`].
    pub fn new(host: &'h mut dyn HostBus, link: Box<dyn LinkLayer>) -> Self {
        Wn720Device {
            pipe: CommandPipe::new(host, link),
        }
    }

    /// The command pipe, for issuing façade commands once the device is
    /// running.
    pub fn pipe(&mut self) -> &mut CommandPipe<'h> {
        &mut self.pipe
    }

    /// Bring the chip from power-on to running firmware.
    ///
    /// Reset → register handshake → bootloader → firmware transfer →
    /// startup indication → secure channel → platform data. Any step
    /// failure aborts the sequence, disables the IRQ, tears down the bus
    /// and host resources and reports the failing status; no
    /// partial-success state is retained.
    pub fn init(&mut self) -> Result<()> {
        let result = self.init_sequence();
        if let Err(err) = result {
            log::warn!("init failed: {}", err);
            let _ = self.disable_irq();
            let _ = self.pipe.host_mut().deinit_bus();
            let _ = self.pipe.host_mut().deinit();
        }
        result
    }

    fn init_sequence(&mut self) -> Result<()> {
        self.pipe.host_mut().init_bus()?;
        log::debug!("bus initialized");

        bootstrap::init_chip(self.pipe.host_mut())?;
        log::debug!("chip initialized");

        bootstrap::run_bootloader(self.pipe.host_mut())?;
        log::debug!("bootloader running");

        // Arm the startup waiter before the firmware can possibly run.
        self.pipe
            .host_mut()
            .setup_waited_event(IndicationId::Startup.into())?;

        firmware::download(self.pipe.host_mut())?;
        log::debug!("firmware downloaded");

        self.enable_irq()?;
        self.set_access_mode_message()?;
        log::debug!("message mode set");

        let startup = self.wait_for_startup()?;
        self.pipe.context_mut().absorb_startup(&startup);
        self.pipe.host_mut().set_wake_up_pin(true)?;

        let link_mode = LinkMode::from_capabilities(startup.capabilities);
        self.bring_up_secure_channel(link_mode)?;

        let chunk_count = self.pipe.host_mut().pds_chunk_count()?;
        for index in 0..chunk_count {
            let chunk = self.pipe.host_mut().pds_chunk(index)?;
            general::send_configuration(&mut self.pipe, &chunk)?;
        }
        log::debug!("platform data configured");

        self.pipe.context_mut().set_started(true);
        Ok(())
    }

    fn wait_for_startup(&mut self) -> Result<StartupIndBody> {
        let frame = self
            .pipe
            .host_mut()
            .wait_for_confirmation(IndicationId::Startup.into(), DEFAULT_REQUEST_TIMEOUT_MS)?;
        if frame.len() < HEADER_SIZE {
            return Err(Error::Failure);
        }
        StartupIndBody::read_from_prefix(&frame[HEADER_SIZE..])
            .map(|(body, _)| body)
            .map_err(|_| Error::Failure)
    }

    /// Key exchange and encryption bitmap setup, driven by the link mode
    /// the chip advertised. In trusted modes the exchange must complete
    /// before any configuration can be sent.
    fn bring_up_secure_channel(&mut self, link_mode: LinkMode) -> Result<()> {
        if !self.pipe.link_mut().is_secure() {
            return Ok(());
        }
        match link_mode {
            LinkMode::Reserved | LinkMode::Untrusted => return Ok(()),
            LinkMode::TrustedEval | LinkMode::TrustedEnforced => {}
        }

        let mac_key = match self.pipe.host_mut().secure_link_mac_key() {
            Ok(key) => key,
            // No key provisioned; leave the channel down, like a host
            // that never enabled the feature.
            Err(_) => return Ok(()),
        };

        if link_mode == LinkMode::TrustedEval {
            // Evaluation parts boot without a burned key.
            secure_link::set_mac_key(&mut self.pipe, &mac_key, MacKeyDestination::Ram)?;
        }

        secure_link::renegotiate_session_key(&mut self.pipe)?;

        let mut bitmap = EncryptionBitmap::all_encrypted();
        if link_mode == LinkMode::TrustedEval {
            // Evaluation mode keeps the bitmap configuration itself in
            // the clear; enforced mode encrypts it too.
            bitmap.remove(RequestId::SecureLinkConfigure.into());
        }
        secure_link::configure_secure_link(&mut self.pipe, bitmap)?;
        log::debug!("secure channel established");
        Ok(())
    }

    /// Shut the chip down and release host resources.
    ///
    /// The inverse of [`Wn720Device::init`], executed best-effort: each
    /// step's failure is reported but never stops the remaining cleanup,
    /// unlike the init path. The first failure becomes the returned
    /// status.
    pub fn deinit(&mut self) -> Result<()> {
        let mut result = Ok(());

        best_effort(&mut result, self.send_shutdown_request(), "shutdown request");
        best_effort(&mut result, self.set_wake_up_bit(false), "wake bit");
        best_effort(
            &mut result,
            self.pipe.host_mut().set_wake_up_pin(false).map_err(Error::from),
            "wake pin",
        );
        best_effort(&mut result, self.disable_irq(), "disable irq");
        best_effort(
            &mut result,
            self.pipe.host_mut().deinit_bus().map_err(Error::from),
            "bus teardown",
        );

        self.pipe.context_mut().set_started(false);
        result
    }

    /// Send the shutdown request (it is never confirmed), then clear the
    /// wake-up bit and the wake-up pin so the chip can power down.
    pub fn shutdown(&mut self) -> Result<()> {
        self.send_shutdown_request()?;
        self.set_wake_up_bit(false)?;
        self.pipe.host_mut().set_wake_up_pin(false)?;
        self.pipe.context_mut().set_started(false);
        Ok(())
    }

    fn send_shutdown_request(&mut self) -> Result<()> {
        self.pipe
            .send_request_only(RequestId::ShutDown, &[], Interface::Station, BufferKind::Control)
    }

    /// Unmask the host interrupt and route received-frame interrupts to
    /// it.
    pub fn enable_irq(&mut self) -> Result<()> {
        let host = self.pipe.host_mut();
        host.enable_platform_interrupt()?;
        let mut config = ConfigRegister(host.reg_read_32(RegisterId::Config)?);
        config.set_data_irq_enabled(1);
        host.reg_write_32(RegisterId::Config, config.0)?;
        Ok(())
    }

    /// Stop received-frame interrupts and mask the host interrupt.
    pub fn disable_irq(&mut self) -> Result<()> {
        let host = self.pipe.host_mut();
        let mut config = ConfigRegister(host.reg_read_32(RegisterId::Config)?);
        config.set_data_irq_enabled(0);
        host.reg_write_32(RegisterId::Config, config.0)?;
        host.disable_platform_interrupt()?;
        Ok(())
    }

    /// Switch the chip from direct register access to message passing.
    pub fn set_access_mode_message(&mut self) -> Result<()> {
        let host = self.pipe.host_mut();
        let mut config = ConfigRegister(host.reg_read_32(RegisterId::Config)?);
        config.set_direct_access_mode(0);
        host.reg_write_32(RegisterId::Config, config.0)?;
        Ok(())
    }

    /// Drive the wake-up request bit in the control register.
    pub fn set_wake_up_bit(&mut self, state: bool) -> Result<()> {
        let host = self.pipe.host_mut();
        let mut control = ControlRegister(host.reg_read_16(RegisterId::Control)?);
        control.set_wake_up(state as u8);
        host.reg_write_16(RegisterId::Control, control.0)?;
        Ok(())
    }

    /// Let the chip sleep between beacons. Requires a connected-state
    /// power mode set through the power-mode command first.
    pub fn enable_device_power_save(&mut self) -> Result<()> {
        if self.pipe.context().power_save_active() {
            return Err(Error::Failure);
        }
        self.set_wake_up_bit(false)?;
        self.pipe.context_mut().set_power_save_active(true);
        self.pipe.host_mut().set_wake_up_pin(false)?;
        self.pipe.context_mut().set_sleeping(true);
        log::debug!("power save enabled");
        Ok(())
    }

    /// Hold the chip awake.
    pub fn disable_device_power_save(&mut self) -> Result<()> {
        if !self.pipe.context().power_save_active() {
            return Err(Error::Failure);
        }
        self.pipe.context_mut().set_power_save_active(false);
        self.pipe.host_mut().set_wake_up_pin(true)?;
        self.pipe.host_mut().wait_for_wake_up()?;
        self.pipe.context_mut().set_sleeping(false);
        self.set_wake_up_bit(true)?;
        log::debug!("power save disabled");
        Ok(())
    }

    /// Hardware revision and type from the configuration register.
    pub fn hardware_revision_and_type(&mut self) -> Result<(u8, u8)> {
        let config = ConfigRegister(self.pipe.host_mut().reg_read_32(RegisterId::Config)?);
        Ok((config.hardware_revision(), config.hardware_type()))
    }

    /// Select the antenna configuration through an inline platform-data
    /// chunk.
    pub fn set_antenna_config(&mut self, config: AntennaConfig) -> Result<()> {
        let pds = antenna_pds(config);
        general::send_configuration(&mut self.pipe, pds.as_bytes())
    }
}

fn antenna_pds(config: AntennaConfig) -> String {
    // Diversity hands antenna allocation to the chip.
    let internal = (config == AntennaConfig::Diversity) as u32;
    format!(
        "{{{}:{{{}:{:X},{}:{:X}}}}}",
        PDS_ANTENNA_SEL_KEY, PDS_KEY_A, config as u32, PDS_KEY_B, internal
    )
}

fn best_effort(result: &mut Result<()>, step: Result<()>, what: &str) {
    if let Err(err) = step {
        log::warn!("deinit: {} failed: {}", what, err);
        if result.is_ok() {
            *result = Err(err);
        }
    }
}
