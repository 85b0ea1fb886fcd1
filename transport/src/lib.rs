// Licensed under the Apache-2.0 license

//! WN720 Transport Core
//!
//! The request/confirmation engine every driver operation funnels
//! through: framing, buffer-credit flow control, the bus-lock bracket,
//! confirmation status decoding and the optional secure channel.
//!
//! The core is written once against the [`LinkLayer`] capability
//! interface; [`PlainLink`] and [`SecureLink`] are the two
//! implementations, chosen when the pipe is constructed.

#![no_std]

extern crate alloc;

pub mod buffer;
pub mod context;
pub mod error;
pub mod link;
pub mod pipe;
pub mod secure;

pub use buffer::{frame_len_for_payload, FrameBuffer};
pub use context::{ChipIdentity, DriverContext, FirmwareVersion};
pub use error::{decode_confirmation_status, Error, Result};
pub use link::{LinkLayer, PlainLink};
pub use pipe::{CommandPipe, Confirmation, DEFAULT_REQUEST_TIMEOUT_MS};
pub use secure::{PacketCounters, SecureLink, SecureLinkState, SessionKey};
