// Licensed under the Apache-2.0 license

//! WN720 Command Façade
//!
//! One typed builder per chip operation. Each builder assembles its
//! payload — fixed body first, then any variable trailing data in the
//! order the firmware expects — and delegates to
//! [`CommandPipe::send_command`](wn720_host_transport::CommandPipe),
//! which owns framing, credit accounting and timeout recovery for every
//! command uniformly.

#![no_std]

extern crate alloc;

pub mod access_point;
pub mod data;
pub mod filters;
pub mod general;
pub mod secure_link;
pub mod station;
