// src/lib.rs

//! Streaming decryption and integrity verification for Telegram Passport files.
//!
//! An encrypted file is AES-256-CBC ciphertext whose key and IV are derived from
//! the file `secret` and the SHA-256 `file_hash` of its content. The decrypted
//! data starts with a padding prefix whose length is stored in its first byte.
//! [`decrypt_file`] strips that prefix, streams the content to a destination and
//! verifies its digest, without holding the whole file in memory.

pub mod aliases;
pub mod builders;
pub mod consts;
pub mod credentials;
pub mod crypto;
pub mod decryptor;
pub mod error;
pub mod streams;
pub mod utils;

// High-level API
pub use builders::DecryptorBuilder;
pub use credentials::FileCredentials;
pub use decryptor::{decrypt_file, Decrypter, FileDecryptor};
pub use error::{CipherError, FileDecryptionError, IntegrityFailure, StreamDefect};
pub use streams::{ContentSink, ContentSource, ForwardSource, SeekableSource, WriterSink};

// Low-level KDF: needed for custom flows built on `CbcBlockReader`
pub use crypto::kdf::{derive_file_key, derive_file_key_new, FileKey};
