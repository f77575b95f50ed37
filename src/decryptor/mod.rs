// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: `decrypt_file(Some(input), Some(&credentials), Some(output))?`.
//! Building blocks: [`CbcBlockReader`] and [`strip_and_verify`] for custom flows.

pub(crate) mod decrypt;
pub(crate) mod stream;
pub(crate) mod validate;

pub use decrypt::{decrypt_file, Decrypter, FileDecryptor};
pub use stream::{strip_and_verify, CbcBlockReader, IntegrityContext};
