//! # File Credentials
//!
//! The `secret` / `file_hash` pair that unlocks one encrypted file, in its base64
//! wire form. Both fields are optional so that a partially filled value coming
//! from an upstream decoder can be rejected with a precise error.

use std::fmt;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::aliases::{EncodedSecret, FileHash32, SecretBytes};
use crate::consts::FILE_HASH_SIZE;
use crate::error::{FileDecryptionError, IntegrityFailure};

/// Standard alphabet with required padding. Unused bits in the final symbol
/// are ignored rather than rejected.
const WIRE_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Parameter names used in error reports.
pub(crate) const SECRET_FIELD: &str = "Secret";
pub(crate) const FILE_HASH_FIELD: &str = "FileHash";

/// Credentials for decrypting a single file.
///
/// ```
/// use passport_file_decrypt::FileCredentials;
///
/// let credentials = FileCredentials::new(
///     "vF7nut7clg/H/pEaTJigo4mQJ0s8B+HGCWKTWtOTIdo=",
///     "v3q47iscI6TS94CMo7HGQUOxw28LIf82NJBkImzP57c=",
/// );
/// assert!(credentials.secret.is_some());
/// ```
#[derive(Default)]
pub struct FileCredentials {
    /// Base64-encoded secret used to derive the file key.
    pub secret: Option<EncodedSecret>,
    /// Base64-encoded SHA-256 of the file content.
    pub file_hash: Option<EncodedSecret>,
}

impl FileCredentials {
    /// Credentials with both fields set.
    #[must_use]
    pub fn new(secret: impl Into<String>, file_hash: impl Into<String>) -> Self {
        Self::default().with_secret(secret).with_file_hash(file_hash)
    }

    #[must_use]
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(EncodedSecret::new(secret.into()));
        self
    }

    #[must_use]
    pub fn with_file_hash(mut self, file_hash: impl Into<String>) -> Self {
        self.file_hash = Some(EncodedSecret::new(file_hash.into()));
        self
    }
}

impl fmt::Debug for FileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |field: &Option<EncodedSecret>| field.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("FileCredentials")
            .field("secret", &redact(&self.secret))
            .field("file_hash", &redact(&self.file_hash))
            .finish()
    }
}

/// Decode one base64 credential field into a secure buffer.
///
/// Spaces, tabs and line breaks anywhere in the field are skipped.
pub(crate) fn decode_field(
    field: &'static str,
    encoded: &EncodedSecret,
) -> Result<SecretBytes, FileDecryptionError> {
    let wire = encoded.expose_secret().as_bytes();
    let decoded = if wire.iter().copied().any(is_wire_whitespace) {
        let compact = SecretBytes::new(
            wire.iter()
                .copied()
                .filter(|b| !is_wire_whitespace(*b))
                .collect::<Vec<u8>>(),
        );
        WIRE_BASE64.decode(compact.expose_secret())
    } else {
        WIRE_BASE64.decode(wire)
    };

    decoded
        .map(SecretBytes::new)
        .map_err(|source| FileDecryptionError::InvalidEncoding { field, source })
}

#[inline]
fn is_wire_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Narrow a decoded digest to exactly [`FILE_HASH_SIZE`] bytes.
pub(crate) fn expect_file_hash(decoded: &SecretBytes) -> Result<FileHash32, FileDecryptionError> {
    let bytes = decoded.expose_secret();
    if bytes.len() != FILE_HASH_SIZE {
        return Err(IntegrityFailure::HashLength(bytes.len()).into());
    }

    let mut file_hash = FileHash32::new([0u8; FILE_HASH_SIZE]);
    file_hash.expose_secret_mut().copy_from_slice(bytes);
    Ok(file_hash)
}
