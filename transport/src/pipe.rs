// Licensed under the Apache-2.0 license

//! Command pipe
//!
//! The half-duplex request/confirmation engine. One command is prepared,
//! sealed and transmitted per bus-lock bracket; the confirmation wait
//! happens outside the lock so the interrupt-driven receive path can run
//! and satisfy it.

use alloc::boxed::Box;
use alloc::vec::Vec;

use wn720_host_command_types::registers::{ControlRegister, RegisterId, FRAME_TYPE_ETHERNET_DATA};
use wn720_host_command_types::{
    is_indication_id, FrameHeader, FrameInfo, GenericConfirmationBody, Interface, RequestId,
    HEADER_SIZE,
};
use wn720_host_hal::{BufferKind, HalError, HostBus};
use zerocopy::FromBytes;

use crate::buffer::{frame_len_for_payload, FrameBuffer};
use crate::context::DriverContext;
use crate::error::{decode_confirmation_status, Error, Result};
use crate::link::LinkLayer;

/// How long a command waits for its confirmation.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 5_000;

/// The control register value is piggybacked after every received frame.
const PIGGYBACK_SIZE: usize = 2;

/// A confirmation frame handed back to a caller that asked for the raw
/// reply.
#[derive(Debug, PartialEq)]
pub struct Confirmation {
    frame: Vec<u8>,
}

impl Confirmation {
    pub fn new(frame: Vec<u8>) -> Self {
        Confirmation { frame }
    }

    pub fn header(&self) -> Result<FrameHeader> {
        FrameHeader::read_from_frame(&self.frame).map_err(|_| Error::BufferTooSmall)
    }

    /// The confirmation body, header stripped.
    pub fn body_bytes(&self) -> &[u8] {
        &self.frame[HEADER_SIZE.min(self.frame.len())..]
    }

    /// Parse the body as a fixed confirmation layout.
    pub fn body<T: FromBytes>(&self) -> Result<T> {
        T::read_from_prefix(self.body_bytes())
            .map(|(body, _)| body)
            .map_err(|_| Error::BufferTooSmall)
    }

    /// The little-endian status word every confirmation starts with.
    pub fn raw_status(&self) -> Result<u32> {
        self.body::<GenericConfirmationBody>()
            .map(|body| body.status.get())
    }

    /// Decode the status word through the namespace selected by `id`.
    pub fn decoded_status(&self, id: RequestId) -> Result<()> {
        decode_confirmation_status(self.raw_status()?, id)
    }
}

/// The transport core: owns the driver context and funnels every command
/// through one credit-limited, lock-bracketed send path.
pub struct CommandPipe<'h> {
    host: &'h mut dyn HostBus,
    link: Box<dyn LinkLayer>,
    context: DriverContext,
}

impl<'h> CommandPipe<'h> {
    pub fn new(host: &'h mut dyn HostBus, link: Box<dyn LinkLayer>) -> Self {
        CommandPipe {
            host,
            link,
            context: DriverContext::new(),
        }
    }

    pub fn context(&self) -> &DriverContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut DriverContext {
        &mut self.context
    }

    pub fn host_mut(&mut self) -> &mut dyn HostBus {
        &mut *self.host
    }

    pub fn link_mut(&mut self) -> &mut dyn LinkLayer {
        &mut *self.link
    }

    /// Run `f` with exclusive bus access. The lock is released on every
    /// path; a failing release degrades the overall result to failure.
    fn with_bus_lock<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.host.lock().map_err(|_| Error::Hal(HalError::LockFailed))?;
        let mut result = f(self);
        if self.host.unlock().is_err() {
            result = Err(Error::Failure);
        }
        result
    }

    /// Send a command and decode its confirmation.
    ///
    /// An empty `payload` sends a header-only frame. With `want_reply`
    /// the raw confirmation is handed back for caller-specific field
    /// extraction; without it the status word is decoded and discarded.
    pub fn send_command(
        &mut self,
        id: RequestId,
        payload: &[u8],
        interface: Interface,
        want_reply: bool,
    ) -> Result<Option<Confirmation>> {
        let raw_id: u8 = id.into();
        let frame_len = frame_len_for_payload(payload.len());
        let secure = self.link.encryption_required(raw_id);

        let mut frame =
            FrameBuffer::allocate(&mut *self.host, BufferKind::Control, frame_len, secure)?;
        frame.header_mut().info = FrameInfo::for_interface(interface);
        frame.body_mut()[..payload.len()].copy_from_slice(payload);

        let result = self
            .send_request(raw_id, &mut frame)
            .and_then(|()| self.wait_confirmation(raw_id));

        frame.release(&mut *self.host);

        let confirmation = result?;
        if want_reply {
            Ok(Some(confirmation))
        } else {
            confirmation.decoded_status(id)?;
            Ok(None)
        }
    }

    /// Send a command that must return a confirmation.
    pub fn send_command_with_reply(
        &mut self,
        id: RequestId,
        payload: &[u8],
        interface: Interface,
    ) -> Result<Confirmation> {
        match self.send_command(id, payload, interface, true)? {
            Some(confirmation) => Ok(confirmation),
            None => Err(Error::Failure),
        }
    }

    /// Build and transmit a request without waiting for a confirmation.
    /// Used by the data path and the shutdown command, whose replies
    /// never arrive through the command channel.
    pub fn send_request_only(
        &mut self,
        id: RequestId,
        payload: &[u8],
        interface: Interface,
        kind: BufferKind,
    ) -> Result<()> {
        let raw_id: u8 = id.into();
        let frame_len = frame_len_for_payload(payload.len());
        let secure = self.link.encryption_required(raw_id);

        let mut frame = FrameBuffer::allocate(&mut *self.host, kind, frame_len, secure)?;
        frame.header_mut().info = FrameInfo::for_interface(interface);
        frame.body_mut()[..payload.len()].copy_from_slice(payload);

        let result = self.send_request(raw_id, &mut frame);
        frame.release(&mut *self.host);
        result
    }

    /// Transmit a prepared frame under the bus lock: stamp the header,
    /// seal, register the confirmation waiter, put it on the wire and
    /// take one buffer credit.
    pub fn send_request(&mut self, id: u8, frame: &mut FrameBuffer) -> Result<()> {
        let result = self.with_bus_lock(|pipe| {
            if !pipe.context.has_credit() {
                return Err(Error::NoBufferCredit);
            }
            if !pipe.link.allows_transmit(id) {
                return Err(Error::KeyRenegotiationPending);
            }

            let length = frame.frame_len() as u16;
            let header = frame.header_mut();
            header.id = id;
            header.length = length.into();

            pipe.link.seal(frame)?;
            pipe.host.setup_waited_event(id)?;
            pipe.host.transmit_frame(frame.transmit_view())?;
            pipe.context.consume_credit();
            Ok(())
        });
        if let Err(err) = result {
            log::debug!("send request {:#04x} error: {}", id, err);
        }
        result
    }

    /// Block for the confirmation matching `id`. A timeout rolls one
    /// buffer credit back: the request is presumed lost inside the chip.
    fn wait_confirmation(&mut self, id: u8) -> Result<Confirmation> {
        match self.host.wait_for_confirmation(id, DEFAULT_REQUEST_TIMEOUT_MS) {
            Ok(frame) => Ok(Confirmation::new(frame)),
            Err(HalError::Timeout) => {
                self.context.release_credit();
                log::debug!("confirmation {:#04x} timed out", id);
                Err(Error::Timeout)
            }
            Err(err) => Err(Error::Hal(err)),
        }
    }

    /// Pull one pending frame out of the chip and post it upstream.
    ///
    /// `ctrl_reg` carries the piggybacked control register value from the
    /// previous call; pass zero to force a register read. Runs entirely
    /// under the bus lock, like the transmit path, because both mutate
    /// the context.
    pub fn receive_frame(&mut self, ctrl_reg: &mut ControlRegister) -> Result<()> {
        let result = self.with_bus_lock(|pipe| pipe.receive_frame_locked(ctrl_reg));
        if let Err(err) = result {
            if err != Error::NoPacketPending {
                log::debug!("receive frame error: {}", err);
            }
        }
        result
    }

    fn receive_frame_locked(&mut self, ctrl_reg: &mut ControlRegister) -> Result<()> {
        let mut frame_size = ctrl_reg.next_output_length();
        if frame_size == 0 {
            *ctrl_reg = ControlRegister(self.host.reg_read_16(RegisterId::Control)?);
            frame_size = ctrl_reg.next_output_length();
            if frame_size == 0 {
                return Err(Error::NoPacketPending);
            }
        }

        let kind = if ctrl_reg.frame_type() == FRAME_TYPE_ETHERNET_DATA {
            BufferKind::DataFrame
        } else {
            BufferKind::Control
        };

        let read_length = frame_size + PIGGYBACK_SIZE;
        let mut buffer = self.host.allocate_buffer(kind, read_length)?;
        buffer.truncate(read_length);

        let result = self.process_received(&mut buffer, frame_size, ctrl_reg);
        self.host.free_buffer(buffer, kind);

        // Promote a watermark crossing observed during frame processing
        // into a scheduled renegotiation, still under the lock.
        self.link.after_receive(&mut *self.host);
        result
    }

    fn process_received(
        &mut self,
        buffer: &mut [u8],
        frame_size: usize,
        ctrl_reg: &mut ControlRegister,
    ) -> Result<()> {
        self.host.read_frame(buffer)?;

        // The chip appends the current control register value after the
        // frame so the next call can skip the register read.
        let piggyback = u16::from_le_bytes([buffer[frame_size], buffer[frame_size + 1]]);
        *ctrl_reg = ControlRegister(piggyback);

        let offset = self.link.open(&mut buffer[..frame_size])?;
        let header = FrameHeader::read_from_frame(&buffer[offset..]).map_err(|_| Error::Failure)?;
        let plain_len = header.length.get() as usize;
        if plain_len < HEADER_SIZE || offset + plain_len > frame_size {
            return Err(Error::Failure);
        }

        // A confirmation releases the credit its request consumed;
        // indications travel outside the credit scheme.
        if !is_indication_id(header.id) {
            self.context.release_credit();
        }

        self.host.post_event(&buffer[offset..offset + plain_len])?;
        Ok(())
    }
}
