// Licensed under the Apache-2.0 license

//! Integration tests for the WN720 host driver
//!
//! Every test drives the public driver API against [`common::MockHost`],
//! a scriptable host adapter that emulates the chip's register map, the
//! download-area handshake and the confirmation channel.

pub mod common;

#[cfg(test)]
mod test_bootstrap;
#[cfg(test)]
mod test_commands;
#[cfg(test)]
mod test_transport;
