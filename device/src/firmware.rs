// Licensed under the Apache-2.0 license

//! Firmware image transfer
//!
//! The image is streamed in fixed-size blocks through a circular FIFO in
//! chip SRAM. The host advances a producer offset (`put`), the chip a
//! consumer offset (`get`); the producer never runs more than
//! FIFO size − block size ahead. Keyset, signature and hash blocks
//! precede the executable image and are staged into the download control
//! area before the upload starts.

use alloc::vec;

use wn720_host_command_types::registers::{
    ADDR_DOWNLOAD_FIFO_BASE, ADDR_DWL_CTRL_AREA_FW_HASH, ADDR_DWL_CTRL_AREA_FW_VERSION,
    ADDR_DWL_CTRL_AREA_GET, ADDR_DWL_CTRL_AREA_HOST_STATUS, ADDR_DWL_CTRL_AREA_IMAGE_SIZE,
    ADDR_DWL_CTRL_AREA_INFO, ADDR_DWL_CTRL_AREA_NCP_STATUS, ADDR_DWL_CTRL_AREA_PUT,
    ADDR_DWL_CTRL_AREA_SIGNATURE, ADDR_PTE_INFO, DOWNLOAD_BLOCK_SIZE, DOWNLOAD_FIFO_SIZE,
    DOWNLOAD_POLL_LIMIT, FW_HASH_SIZE, FW_KEYSET_FIELD_OFFSET, FW_KEYSET_SIZE, FW_SIGNATURE_SIZE,
    FW_VERSION_VALUE, HOST_STATE_INFO_READ, HOST_STATE_NOT_READY, HOST_STATE_OK_TO_JUMP,
    HOST_STATE_READY, HOST_STATE_UPLOAD_COMPLETE, HOST_STATE_UPLOAD_PENDING, NCP_STATE_AUTH_OK,
    NCP_STATE_DOWNLOAD_PENDING, NCP_STATE_INFO_READY, NCP_STATE_READY,
};
use wn720_host_hal::HostBus;
use wn720_host_transport::{Error, Result};

use crate::retry::poll_until;

/// Download the firmware image and wait for its authentication.
pub fn download(host: &mut dyn HostBus) -> Result<()> {
    host.init()?;
    let result = download_inner(host);
    // The platform resources are torn down on success and failure alike.
    if host.deinit().is_err() {
        log::warn!("firmware download: host deinit failed");
    }
    result
}

fn download_inner(host: &mut dyn HostBus) -> Result<()> {
    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_NOT_READY)?;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_PUT, 0)?;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_GET, 0)?;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_READY)?;

    poll_ncp_state(host, NCP_STATE_INFO_READY)?;

    host.aux_read_32(ADDR_DWL_CTRL_AREA_INFO)?;

    // Chip keyset lives in byte 1 of the PTE info word at offset 12.
    let pte_word = host.aux_read_32(ADDR_PTE_INFO + 12)?;
    let chip_keyset = (pte_word >> 8) as u8;

    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_INFO_READ)?;
    poll_ncp_state(host, NCP_STATE_READY)?;

    // Bootloader scratch initialization, required on early silicon.
    host.aux_write_32(ADDR_DOWNLOAD_FIFO_BASE, 0xFFFF_FFFF)?;

    let total_size = host.firmware_size()? as usize;
    let framing = FW_KEYSET_SIZE + FW_SIGNATURE_SIZE + FW_HASH_SIZE;
    if total_size <= framing {
        return Err(Error::InvalidParameter);
    }
    let image_length = total_size - framing;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_IMAGE_SIZE, image_length as u32)?;

    let mut keyset = [0u8; FW_KEYSET_SIZE];
    host.firmware_data(&mut keyset)?;
    compare_keysets(chip_keyset, &keyset)?;

    let mut signature = [0u8; FW_SIGNATURE_SIZE];
    host.firmware_data(&mut signature)?;
    host.aux_write(ADDR_DWL_CTRL_AREA_SIGNATURE, &signature)?;

    let mut hash = [0u8; FW_HASH_SIZE];
    host.firmware_data(&mut hash)?;
    host.aux_write(ADDR_DWL_CTRL_AREA_FW_HASH, &hash)?;

    host.aux_write_32(ADDR_DWL_CTRL_AREA_FW_VERSION, FW_VERSION_VALUE)?;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_UPLOAD_PENDING)?;

    upload_image(host, image_length)?;

    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_UPLOAD_COMPLETE)?;
    poll_ncp_state(host, NCP_STATE_AUTH_OK)?;
    host.aux_write_32(ADDR_DWL_CTRL_AREA_HOST_STATUS, HOST_STATE_OK_TO_JUMP)?;
    Ok(())
}

fn upload_image(host: &mut dyn HostBus, image_length: usize) -> Result<()> {
    let block_size_max = DOWNLOAD_BLOCK_SIZE as usize;
    let window = DOWNLOAD_FIFO_SIZE - DOWNLOAD_BLOCK_SIZE;
    let num_blocks = (image_length - 1) / block_size_max + 1;

    let mut block = vec![0u8; block_size_max];
    let mut put: u32 = 0;

    for _ in 0..num_blocks {
        if host.aux_read_32(ADDR_DWL_CTRL_AREA_NCP_STATUS)? != NCP_STATE_DOWNLOAD_PENDING {
            return Err(Error::Failure);
        }

        // Wait for the consumer to free a block of FIFO space.
        poll_until(
            host,
            |h| h.aux_read_32(ADDR_DWL_CTRL_AREA_GET).map_err(Error::from),
            |get| put.wrapping_sub(get) <= window,
            DOWNLOAD_POLL_LIMIT,
            0,
        )
        .map_err(|err| match err {
            Error::Timeout => Error::FirmwareDownloadTimeout,
            other => other,
        })?;

        let block_size = block_size_max.min(image_length - put as usize);
        host.firmware_data(&mut block[..block_size])?;

        let block_address = ADDR_DOWNLOAD_FIFO_BASE + (put % DOWNLOAD_FIFO_SIZE);
        host.aux_write(block_address, &block[..block_size])?;

        log::debug!("fw> {}/{}", put, image_length);

        put += block_size as u32;
        host.aux_write_32(ADDR_DWL_CTRL_AREA_PUT, put)?;
    }
    Ok(())
}

fn poll_ncp_state(host: &mut dyn HostBus, expected: u32) -> Result<()> {
    poll_until(
        host,
        |h| h.aux_read_32(ADDR_DWL_CTRL_AREA_NCP_STATUS).map_err(Error::from),
        |value| value == expected,
        DOWNLOAD_POLL_LIMIT,
        1,
    )?;
    Ok(())
}

/// Compare the firmware's embedded keyset against the chip-reported one.
///
/// The keyset block spells the keyset as two hex characters at offsets
/// 6-7; it must numerically equal the chip keyset byte. A mismatch is a
/// distinct invalid-key error, not a generic failure.
pub fn compare_keysets(chip_keyset: u8, firmware_keyset: &[u8]) -> Result<()> {
    let field = firmware_keyset
        .get(FW_KEYSET_FIELD_OFFSET..FW_KEYSET_FIELD_OFFSET + 2)
        .ok_or(Error::InvalidKey)?;
    let text = core::str::from_utf8(field).map_err(|_| Error::InvalidKey)?;
    let value = u8::from_str_radix(text, 16).map_err(|_| Error::InvalidKey)?;

    if value == chip_keyset {
        Ok(())
    } else {
        Err(Error::InvalidKey)
    }
}
