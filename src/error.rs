//! # Error Types
//!
//! All operations return [`Result<T, FileDecryptionError>`](FileDecryptionError).
//! Integrity and cipher failures carry their own enums so callers can match on
//! the exact condition without parsing messages.

use std::fmt;
use thiserror::Error;

/// The error type for all file decryption operations.
#[derive(Error, Debug)]
pub enum FileDecryptionError {
    /// A required input was not supplied.
    ///
    /// The contained value names the missing parameter: `encryptedContent`,
    /// `fileCredentials`, `Secret`, `FileHash` or `destination`.
    #[error("Value cannot be null. (Parameter '{0}')")]
    NullArgument(&'static str),

    /// A supplied stream lacks a capability the operation needs, or is empty.
    #[error("Stream {defect}. (Parameter '{param}')")]
    InvalidStream {
        param: &'static str,
        defect: StreamDefect,
    },

    /// A credential field is not valid base64.
    #[error("{field} is not a valid base64 string: {source}")]
    InvalidEncoding {
        field: &'static str,
        #[source]
        source: base64::DecodeError,
    },

    /// The ciphertext, the expected digest or the recovered plaintext is malformed
    /// or has been tampered with.
    #[error(transparent)]
    Integrity(#[from] IntegrityFailure),

    /// The block cipher rejected its input.
    ///
    /// Only reachable for non-seekable sources, whose length cannot be checked
    /// before decryption starts.
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// I/O error while reading the source or writing the destination.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Missing stream capability reported by [`FileDecryptionError::InvalidStream`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamDefect {
    NotReadable,
    Empty,
    NotWritable,
}

impl fmt::Display for StreamDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamDefect::NotReadable => "does not support reading",
            StreamDefect::Empty => "is empty",
            StreamDefect::NotWritable => "does not support writing",
        })
    }
}

/// Integrity conditions detected before or after decryption.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityFailure {
    /// Seekable ciphertext length is not a multiple of the AES block size.
    #[error("Data length is not divisible by 16: {0}.")]
    LengthNotBlockAligned(u64),

    /// Decoded `file_hash` is not a SHA-256 digest.
    #[error("Hash length is not 32: {0}.")]
    HashLength(usize),

    /// First plaintext byte does not describe a padding region inside the data.
    #[error("Data padding length is invalid: {0}.")]
    InvalidPadding(u8),

    /// SHA-256 of the content differs from `file_hash`.
    ///
    /// The position is the number of content bytes already written to the
    /// destination; they are not rolled back.
    #[error("Data hash mismatch at position {0}.")]
    HashMismatch(u64),
}

/// Low-level block cipher failure.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    /// The source ended with `trailing` bytes that do not fill a whole block.
    #[error("The input data is not a complete block.")]
    IncompleteBlock { trailing: usize },
}
