// Licensed under the Apache-2.0 license

//! Authenticated-encryption primitive
//!
//! The secure channel never implements cryptography itself; it drives an
//! external AEAD through this trait. The nonce is always the three
//! per-direction packet counters serialized little-endian (12 bytes), so
//! any 96-bit-nonce AEAD with a 16-byte tag fits.

use wn720_host_command_types::secure::{KEY_SIZE, NONCE_SIZE, TAG_SIZE};

use crate::error::{HalError, HalResult};

/// Authenticated encryption with a 256-bit key, 96-bit nonce and 128-bit
/// tag.
pub trait LinkCipher {
    /// Encrypt `data` in place and return the authentication tag.
    fn encrypt(
        &mut self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        data: &mut [u8],
    ) -> HalResult<[u8; TAG_SIZE]>;

    /// Decrypt `data` in place, verifying `tag`. A forged or corrupted
    /// tag must fail with [`HalError::CipherRejected`] and leave no
    /// plaintext behind.
    fn decrypt(
        &mut self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        data: &mut [u8],
        tag: &[u8; TAG_SIZE],
    ) -> HalResult<()>;
}

/// AES-256-GCM software implementation of [`LinkCipher`].
#[cfg(feature = "soft-cipher")]
pub struct SoftLinkCipher;

#[cfg(feature = "soft-cipher")]
impl LinkCipher for SoftLinkCipher {
    fn encrypt(
        &mut self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        data: &mut [u8],
    ) -> HalResult<[u8; TAG_SIZE]> {
        use aes_gcm::aead::AeadInPlace;
        use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        let tag = cipher
            .encrypt_in_place_detached(Nonce::from_slice(nonce), &[], data)
            .map_err(|_| HalError::CipherFailed)?;
        Ok(tag.into())
    }

    fn decrypt(
        &mut self,
        key: &[u8; KEY_SIZE],
        nonce: &[u8; NONCE_SIZE],
        data: &mut [u8],
        tag: &[u8; TAG_SIZE],
    ) -> HalResult<()> {
        use aes_gcm::aead::AeadInPlace;
        use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce, Tag};

        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));
        cipher
            .decrypt_in_place_detached(Nonce::from_slice(nonce), &[], data, Tag::from_slice(tag))
            .map_err(|_| HalError::CipherRejected)
    }
}
