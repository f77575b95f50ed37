//! # Constants
//!
//! This module defines the sizes and limits used throughout the library for
//! key derivation, block decryption and padding validation.

/// AES block size in bytes.
///
/// The ciphertext of a file must be a positive multiple of this value.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-256 key size in bytes.
pub const AES_KEY_SIZE: usize = 32;

/// CBC initialization vector size in bytes.
pub const AES_IV_SIZE: usize = 16;

/// Size of the expected plaintext digest (SHA-256 output).
///
/// A decoded `file_hash` of any other length is rejected before decryption.
pub const FILE_HASH_SIZE: usize = 32;

/// Size of the SHA-512 output split into key and IV.
pub const KEY_MATERIAL_SIZE: usize = 64;

/// Smallest padding prefix a well-formed file can carry.
///
/// The padding length is stored in the first decrypted byte, so the upper
/// bound is 255.
pub const MIN_PADDING_LEN: u8 = 32;

/// Default number of ciphertext bytes read from the source per refill.
///
/// Always a multiple of [`AES_BLOCK_SIZE`].
pub const DEFAULT_CHUNK_SIZE: usize = 81_920;
