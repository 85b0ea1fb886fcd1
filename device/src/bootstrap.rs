// Licensed under the Apache-2.0 license

//! Chip register handshake and bootloader activation

use wn720_host_command_types::registers::{
    ConfigRegister, ControlRegister, RegisterId, ADDR_DOWNLOAD_FIFO_BASE,
    ADDR_DWL_CTRL_AREA_NCP_STATUS, CHIP_READY_POLL_LIMIT, SRAM_ACCESS_SENTINEL, TUNING_SEQUENCE,
};
use wn720_host_hal::HostBus;
use wn720_host_transport::{Error, Result};

use crate::retry::poll_until;

/// Wake the chip and verify it came up in direct register access mode:
/// write the general-purpose tuning words, set the wake-up bit, poll the
/// ready bit, check the access-mode bit.
pub fn init_chip(host: &mut dyn HostBus) -> Result<()> {
    host.reg_read_32(RegisterId::Config)?;

    for word in TUNING_SEQUENCE {
        host.reg_write_32(RegisterId::TsetGenRw, word)?;
    }

    let mut control = ControlRegister(host.reg_read_16(RegisterId::Control)?);
    control.set_wake_up(1);
    host.reg_write_16(RegisterId::Control, control.0)?;

    poll_until(
        host,
        |h| h.reg_read_16(RegisterId::Control).map(u32::from).map_err(Error::from),
        |value| ControlRegister(value as u16).ready() == 1,
        CHIP_READY_POLL_LIMIT,
        1,
    )?;

    let config = ConfigRegister(host.reg_read_32(RegisterId::Config)?);
    if config.direct_access_mode() == 0 {
        // The chip must come out of reset in direct access mode.
        return Err(Error::Failure);
    }
    Ok(())
}

/// Release the internal CPU and prove SRAM access by writing the sentinel
/// through the auxiliary bus and reading it back.
pub fn run_bootloader(host: &mut dyn HostBus) -> Result<()> {
    host.aux_read_32(ADDR_DWL_CTRL_AREA_NCP_STATUS)?;

    let mut config = ConfigRegister(host.reg_read_32(RegisterId::Config)?);
    config.set_cpu_reset(0);
    config.set_cpu_clock_disabled(0);
    host.reg_write_32(RegisterId::Config, config.0)?;

    host.aux_write_32(ADDR_DOWNLOAD_FIFO_BASE, SRAM_ACCESS_SENTINEL)?;
    if host.aux_read_32(ADDR_DOWNLOAD_FIFO_BASE)? != SRAM_ACCESS_SENTINEL {
        return Err(Error::Failure);
    }
    Ok(())
}
