// Licensed under the Apache-2.0 license

//! Secure-channel management commands

use wn720_host_command_types::secure::{
    EncryptionBitmap, ExchangePubKeysCnfBody, ExchangePubKeysReqBody, MacKeyDestination,
    SecureLinkConfigureReqBody, SetMacKeyReqBody, KEY_EXCHANGE_ALGORITHM_CURVE25519, KEY_SIZE,
};
use wn720_host_command_types::{Interface, RequestId};
use wn720_host_hal::HostBus;
use wn720_host_transport::{CommandPipe, Result};
use zerocopy::IntoBytes;

/// Install the secure-channel MAC key on the device, in RAM (evaluation
/// parts) or OTP (production parts).
pub fn set_mac_key(
    pipe: &mut CommandPipe,
    key: &[u8; KEY_SIZE],
    destination: MacKeyDestination,
) -> Result<()> {
    let body = SetMacKeyReqBody {
        key_dest: (destination as u32).into(),
        key_value: *key,
    };
    pipe.send_command(RequestId::SetSecureLinkMacKey, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}

/// Run the session key exchange and install the resulting key.
///
/// The exchange request is the one command that always travels in the
/// clear and that a pending renegotiation lets through. On success the
/// link returns to its default state with fresh counters.
pub fn renegotiate_session_key(pipe: &mut CommandPipe) -> Result<()> {
    let host_pub_key = pipe.host_mut().host_public_key()?;
    let body = ExchangePubKeysReqBody {
        algorithm: KEY_EXCHANGE_ALGORITHM_CURVE25519.into(),
        host_pub_key,
    };

    let reply = pipe.send_command_with_reply(
        RequestId::SecureLinkExchangePubKeys,
        body.as_bytes(),
        Interface::Station,
    )?;
    reply.decoded_status(RequestId::SecureLinkExchangePubKeys)?;
    let cnf: ExchangePubKeysCnfBody = reply.body()?;

    let session_key = pipe.host_mut().derive_session_key(&cnf.device_pub_key)?;
    pipe.link_mut().install_session_key(session_key);
    Ok(())
}

/// Push a per-command encryption bitmap to the chip and adopt it
/// locally. The local copy is installed first so the configure request
/// itself already honours the new policy.
pub fn configure_secure_link(pipe: &mut CommandPipe, bitmap: EncryptionBitmap) -> Result<()> {
    let body = SecureLinkConfigureReqBody {
        encryption_bitmap: *bitmap.as_bytes(),
        disable_session_key_protection: 0.into(),
    };

    pipe.link_mut().set_encryption_bitmap(bitmap);
    pipe.send_command(RequestId::SecureLinkConfigure, body.as_bytes(), Interface::Station, false)?;
    Ok(())
}
