//! src/decryptor/validate.rs
//! Ordered pre-flight guards: each check runs only when every earlier one held

use crate::aliases::{EncodedSecret, FileHash32, SecretBytes};
use crate::consts::AES_BLOCK_SIZE;
use crate::credentials::{
    decode_field, expect_file_hash, FileCredentials, FILE_HASH_FIELD, SECRET_FIELD,
};
use crate::error::{FileDecryptionError, IntegrityFailure, StreamDefect};
use crate::streams::{ContentSink, ContentSource};

pub(crate) const ENCRYPTED_CONTENT_PARAM: &str = "encryptedContent";
pub(crate) const FILE_CREDENTIALS_PARAM: &str = "fileCredentials";
pub(crate) const DESTINATION_PARAM: &str = "destination";

/// Inputs that passed every guard.
pub(crate) struct ValidatedRequest<S, D> {
    pub source: S,
    pub destination: D,
    pub secret: SecretBytes,
    pub file_hash: FileHash32,
    /// Ciphertext length when the source is seekable.
    pub source_len: Option<u64>,
}

/// Run all guards in their contractual order.
pub(crate) fn validate_request<S, D>(
    encrypted_content: Option<S>,
    file_credentials: Option<&FileCredentials>,
    destination: Option<D>,
) -> Result<ValidatedRequest<S, D>, FileDecryptionError>
where
    S: ContentSource,
    D: ContentSink,
{
    let mut source = require(encrypted_content, ENCRYPTED_CONTENT_PARAM)?;
    let credentials = require(file_credentials, FILE_CREDENTIALS_PARAM)?;
    let encoded_secret = require(credentials.secret.as_ref(), SECRET_FIELD)?;
    let encoded_hash = require(credentials.file_hash.as_ref(), FILE_HASH_FIELD)?;
    let destination = require(destination, DESTINATION_PARAM)?;

    ensure_readable(&source)?;
    let source_len = check_seekable_len(&mut source)?;
    ensure_writable(&destination)?;

    let (secret, file_hash) = decode_credentials(encoded_secret, encoded_hash)?;

    Ok(ValidatedRequest {
        source,
        destination,
        secret,
        file_hash,
        source_len,
    })
}

#[inline]
fn require<T>(value: Option<T>, param: &'static str) -> Result<T, FileDecryptionError> {
    value.ok_or(FileDecryptionError::NullArgument(param))
}

fn ensure_readable<S: ContentSource>(source: &S) -> Result<(), FileDecryptionError> {
    if !source.can_read() {
        return Err(FileDecryptionError::InvalidStream {
            param: ENCRYPTED_CONTENT_PARAM,
            defect: StreamDefect::NotReadable,
        });
    }
    Ok(())
}

/// Length checks for seekable sources only. The read position is not inspected
/// or reset; forward-only sources are checked by the cipher pass instead.
fn check_seekable_len<S: ContentSource>(source: &mut S) -> Result<Option<u64>, FileDecryptionError> {
    let Some(len) = source.seekable_len()? else {
        return Ok(None);
    };

    if len == 0 {
        return Err(FileDecryptionError::InvalidStream {
            param: ENCRYPTED_CONTENT_PARAM,
            defect: StreamDefect::Empty,
        });
    }
    if len % AES_BLOCK_SIZE as u64 != 0 {
        return Err(IntegrityFailure::LengthNotBlockAligned(len).into());
    }
    Ok(Some(len))
}

fn ensure_writable<D: ContentSink>(destination: &D) -> Result<(), FileDecryptionError> {
    if !destination.can_write() {
        return Err(FileDecryptionError::InvalidStream {
            param: DESTINATION_PARAM,
            defect: StreamDefect::NotWritable,
        });
    }
    Ok(())
}

/// Secret first, then hash, then the hash width.
fn decode_credentials(
    encoded_secret: &EncodedSecret,
    encoded_hash: &EncodedSecret,
) -> Result<(SecretBytes, FileHash32), FileDecryptionError> {
    let secret = decode_field(SECRET_FIELD, encoded_secret)?;
    let decoded_hash = decode_field(FILE_HASH_FIELD, encoded_hash)?;
    let file_hash = expect_file_hash(&decoded_hash)?;
    Ok((secret, file_hash))
}
