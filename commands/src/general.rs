// Licensed under the Apache-2.0 license

//! General API commands: platform data, GPIO, PTA, rollback protection

use alloc::vec::Vec;

use wn720_host_command_types::general::{
    ConfigurationReqBody, ControlGpioCnfBody, ControlGpioReqBody, GpioMode,
    PreventRollbackReqBody, PtaPriority, PtaPriorityReqBody, PtaSettingsReqBody, PtaStateReqBody,
};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_transport::{CommandPipe, Error, Result};
use zerocopy::IntoBytes;

/// Send one platform-data (PDS) chunk to the chip.
pub fn send_configuration(pipe: &mut CommandPipe, pds_data: &[u8]) -> Result<()> {
    if pds_data.len() > u16::MAX as usize {
        return Err(Error::InvalidParameter);
    }
    let body = ConfigurationReqBody {
        length: (pds_data.len() as u16).into(),
    };
    let mut payload =
        Vec::with_capacity(core::mem::size_of::<ConfigurationReqBody>() + pds_data.len());
    payload.extend_from_slice(body.as_bytes());
    payload.extend_from_slice(pds_data);

    pipe.send_command(RequestId::Configuration, &payload, Interface::Station, false)?;
    Ok(())
}

/// Read or drive a GPIO declared in the platform data. Returns the read
/// level or the detailed error cause.
pub fn control_gpio(pipe: &mut CommandPipe, gpio_label: u8, gpio_mode: GpioMode) -> Result<u32> {
    let body = ControlGpioReqBody {
        gpio_label,
        gpio_mode: gpio_mode as u8,
    };
    let reply =
        pipe.send_command_with_reply(RequestId::ControlGpio, body.as_bytes(), Interface::Station)?;
    reply.decoded_status(RequestId::ControlGpio)?;
    let cnf: ControlGpioCnfBody = reply.body()?;
    Ok(cnf.value.get())
}

/// Configure the packet traffic arbitration signals, timings and quotas.
pub fn pta_settings(pipe: &mut CommandPipe, settings: &PtaSettingsReqBody) -> Result<()> {
    pipe.send_command(RequestId::PtaSettings, settings.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Set the arbitration priority between coexistence and WLAN traffic.
pub fn pta_priority(pipe: &mut CommandPipe, priority: PtaPriority) -> Result<()> {
    let body = PtaPriorityReqBody {
        priority: (priority as u32).into(),
    };
    pipe.send_command(RequestId::PtaPriority, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Start or stop the PTA.
pub fn pta_state(pipe: &mut CommandPipe, enable: bool) -> Result<()> {
    let body = PtaStateReqBody {
        pta_state: (enable as u32).into(),
    };
    pipe.send_command(RequestId::PtaState, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Burn the rollback-prevention fuse. The magic word guards against
/// mistakenly issued requests.
pub fn prevent_rollback(pipe: &mut CommandPipe, magic_word: u32) -> Result<()> {
    let body = PreventRollbackReqBody {
        magic_word: magic_word.into(),
    };
    pipe.send_command(RequestId::PreventRollback, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}
