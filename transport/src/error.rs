// Licensed under the Apache-2.0 license

//! Unified driver error type and confirmation status decoding

use core::fmt;

use wn720_host_command_types::status::{GeneralStatus, MgmtStatus};
use wn720_host_command_types::RequestId;
use wn720_host_hal::HalError;

pub type Result<T> = core::result::Result<T, Error>;

/// Every fallible driver operation resolves to one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Generic failure.
    Failure,
    /// A parameter was rejected by the driver or the chip.
    InvalidParameter,
    /// The confirmation did not arrive in time; the request is presumed
    /// lost and its buffer credit has been rolled back.
    Timeout,
    /// All chip input buffers are in flight; the request was never sent.
    NoBufferCredit,
    /// The chip is in the wrong operating state for this command.
    WrongState,
    /// The requested channel is not permitted in this domain.
    ChannelNotAllowed,
    /// No access point matched the connect parameters.
    NoMatchingAp,
    /// The connection attempt was aborted.
    ConnectionAborted,
    /// The connection attempt timed out.
    ConnectionTimeout,
    /// The access point rejected the connection.
    ConnectionRejected,
    /// Authentication with the access point failed.
    AuthenticationFailure,
    /// The retry limit was exceeded.
    RetryExceeded,
    /// Transmit lifetime exceeded.
    TxLifetimeExceeded,
    /// The firmware keyset does not match the chip keyset.
    InvalidKey,
    /// The chip does not understand this command id.
    UnsupportedId,
    /// The command completed with a warning.
    Warning,
    /// No frame is pending inside the chip.
    NoPacketPending,
    /// A session-key renegotiation is in flight; only the key exchange
    /// may be sent.
    KeyRenegotiationPending,
    /// The firmware download FIFO made no progress within the polling
    /// budget.
    FirmwareDownloadTimeout,
    /// A frame or buffer was too small for the requested layout.
    BufferTooSmall,
    /// Error reported by the host adapter.
    Hal(HalError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Failure => write!(f, "command failed"),
            Error::InvalidParameter => write!(f, "invalid parameter"),
            Error::Timeout => write!(f, "confirmation timeout"),
            Error::NoBufferCredit => write!(f, "no buffer credit"),
            Error::WrongState => write!(f, "wrong operating state"),
            Error::ChannelNotAllowed => write!(f, "channel not allowed"),
            Error::NoMatchingAp => write!(f, "no matching access point"),
            Error::ConnectionAborted => write!(f, "connection aborted"),
            Error::ConnectionTimeout => write!(f, "connection timeout"),
            Error::ConnectionRejected => write!(f, "connection rejected by AP"),
            Error::AuthenticationFailure => write!(f, "authentication failure"),
            Error::RetryExceeded => write!(f, "retry limit exceeded"),
            Error::TxLifetimeExceeded => write!(f, "transmit lifetime exceeded"),
            Error::InvalidKey => write!(f, "firmware keyset mismatch"),
            Error::UnsupportedId => write!(f, "unsupported command id"),
            Error::Warning => write!(f, "completed with warning"),
            Error::NoPacketPending => write!(f, "no packet to receive"),
            Error::KeyRenegotiationPending => write!(f, "key renegotiation pending"),
            Error::FirmwareDownloadTimeout => write!(f, "firmware download timeout"),
            Error::BufferTooSmall => write!(f, "buffer too small"),
            Error::Hal(err) => write!(f, "host adapter error: {}", err),
        }
    }
}

impl From<HalError> for Error {
    fn from(err: HalError) -> Self {
        match err {
            HalError::Timeout => Error::Timeout,
            HalError::OutOfBuffers => Error::NoBufferCredit,
            other => Error::Hal(other),
        }
    }
}

/// Decode a confirmation status word into a driver result.
///
/// The namespace is selected by the command id: network-management
/// confirmations use one table, general API confirmations the other.
/// Unknown status words collapse to [`Error::Failure`], like the
/// original firmware interface promises nothing about them.
pub fn decode_confirmation_status(raw_status: u32, id: RequestId) -> Result<()> {
    if id.is_mgmt_api() {
        match MgmtStatus::try_from(raw_status) {
            Ok(MgmtStatus::Success) => Ok(()),
            Ok(MgmtStatus::InvalidParameter) => Err(Error::InvalidParameter),
            Ok(MgmtStatus::WrongState) => Err(Error::WrongState),
            Ok(MgmtStatus::GeneralFailure) => Err(Error::Failure),
            Ok(MgmtStatus::ChannelNotAllowed) => Err(Error::ChannelNotAllowed),
            Ok(MgmtStatus::Warning) => Err(Error::Warning),
            Ok(MgmtStatus::NoMatchingAp) => Err(Error::NoMatchingAp),
            Ok(MgmtStatus::ConnectionAborted) => Err(Error::ConnectionAborted),
            Ok(MgmtStatus::ConnectionTimeout) => Err(Error::ConnectionTimeout),
            Ok(MgmtStatus::ConnectionRejectedByAp) => Err(Error::ConnectionRejected),
            Ok(MgmtStatus::ConnectionAuthFailure) => Err(Error::AuthenticationFailure),
            Ok(MgmtStatus::RetryExceeded) => Err(Error::RetryExceeded),
            Ok(MgmtStatus::TxLifetimeExceeded) => Err(Error::TxLifetimeExceeded),
            Err(_) => Err(Error::Failure),
        }
    } else {
        match GeneralStatus::try_from(raw_status) {
            Ok(GeneralStatus::Success) => Ok(()),
            Ok(GeneralStatus::InvalidParameter) => Err(Error::InvalidParameter),
            Ok(GeneralStatus::GpioWarning) => Err(Error::Warning),
            Ok(GeneralStatus::UnsupportedMsgId) => Err(Error::UnsupportedId),
            Ok(_) | Err(_) => Err(Error::Failure),
        }
    }
}
