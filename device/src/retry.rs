// Licensed under the Apache-2.0 license

//! Bounded polling
//!
//! One retry loop for every busy-poll in the bootstrap path: register
//! ready bits, download-area state words and the FIFO consumer offset all
//! go through [`poll_until`] instead of repeating the loop shape per use
//! site.

use wn720_host_hal::HostBus;
use wn720_host_transport::{Error, Result};

/// Repeatedly evaluate `read` until `done` accepts its value, waiting
/// `delay_units` between attempts (zero means back-to-back polls).
/// Returns the accepted value, or [`Error::Timeout`] after `max_retries`
/// rejected reads.
pub fn poll_until<R, P>(
    host: &mut dyn HostBus,
    mut read: R,
    mut done: P,
    max_retries: u32,
    delay_units: u32,
) -> Result<u32>
where
    R: FnMut(&mut dyn HostBus) -> Result<u32>,
    P: FnMut(u32) -> bool,
{
    for _ in 0..max_retries {
        let value = read(host)?;
        if done(value) {
            return Ok(value);
        }
        if delay_units > 0 {
            host.wait(delay_units);
        }
    }
    Err(Error::Timeout)
}
