//! src/crypto/kdf.rs
//! File key derivation: SHA-512 over `secret || file_hash`, out-param, zero-exposure

use sha2::{Digest, Sha512};

use crate::aliases::{Aes256Key32, FileHash32, Iv16, KeyMaterial64};
use crate::consts::{AES_IV_SIZE, AES_KEY_SIZE, KEY_MATERIAL_SIZE};

/// Key and IV for one file, wiped on drop.
pub struct FileKey {
    pub key: Aes256Key32,
    pub iv: Iv16,
}

/// Derive the AES-256 key and CBC IV of a file directly into caller buffers.
///
/// `SHA-512(secret || file_hash)` is split into the key (bytes `0..32`) and the
/// IV (bytes `32..48`); the remaining 16 bytes are discarded.
#[inline(always)]
pub fn derive_file_key(
    secret: &[u8],
    file_hash: &FileHash32,
    out_key: &mut Aes256Key32,
    out_iv: &mut Iv16,
) {
    let mut hasher = Sha512::new();
    hasher.update(secret);
    hasher.update(file_hash.expose_secret());

    let mut material = KeyMaterial64::new([0u8; KEY_MATERIAL_SIZE]);
    material
        .expose_secret_mut()
        .copy_from_slice(hasher.finalize().as_slice());

    let digest = material.expose_secret();
    out_key
        .expose_secret_mut()
        .copy_from_slice(&digest[..AES_KEY_SIZE]);
    out_iv
        .expose_secret_mut()
        .copy_from_slice(&digest[AES_KEY_SIZE..AES_KEY_SIZE + AES_IV_SIZE]);
}

/// Convenience: derive and return a fresh [`FileKey`]
#[inline(always)]
pub fn derive_file_key_new(secret: &[u8], file_hash: &FileHash32) -> FileKey {
    let mut key = Aes256Key32::new([0u8; 32]);
    let mut iv = Iv16::new([0u8; 16]);
    derive_file_key(secret, file_hash, &mut key, &mut iv);
    FileKey { key, iv }
}
