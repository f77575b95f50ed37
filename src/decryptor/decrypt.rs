//! src/decryptor/decrypt.rs
//! File decryption front-end: validate, derive, decrypt, strip, verify

use tracing::{debug, warn};

use crate::aliases::{Aes256Key32, Iv16};
use crate::builders::DecryptorBuilder;
use crate::consts::DEFAULT_CHUNK_SIZE;
use crate::credentials::FileCredentials;
use crate::crypto::kdf::derive_file_key;
use crate::decryptor::stream::{strip_and_verify, CbcBlockReader};
use crate::decryptor::validate::{validate_request, ValidatedRequest};
use crate::error::FileDecryptionError;
use crate::streams::{ContentSink, ContentSource};

/// Decrypts encrypted files into a destination stream.
///
/// Absent inputs are modelled as `None` and reported as
/// [`FileDecryptionError::NullArgument`] naming the missing parameter.
pub trait Decrypter {
    /// Decrypt `encrypted_content` with `file_credentials` into `destination`.
    ///
    /// On success the padding-stripped, digest-verified content has been fully
    /// written. On failure `destination` may hold a prefix of the content; it is
    /// never rolled back.
    fn decrypt_file<S, D>(
        &self,
        encrypted_content: Option<S>,
        file_credentials: Option<&FileCredentials>,
        destination: Option<D>,
    ) -> Result<(), FileDecryptionError>
    where
        S: ContentSource,
        D: ContentSink;
}

/// Streaming file decryptor. Build one with [`DecryptorBuilder`] or use
/// [`FileDecryptor::default`].
///
/// # Thread Safety
///
/// `FileDecryptor` only holds configuration. Every call owns its key, cipher
/// and digest state, so a single decryptor can serve concurrent calls from
/// multiple threads (or from `spawn_blocking` inside an async runtime).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDecryptor {
    pub(crate) chunk_size: usize,
}

impl FileDecryptor {
    /// Start configuring a decryptor.
    #[must_use]
    pub fn builder() -> DecryptorBuilder {
        DecryptorBuilder::new()
    }

    /// Ciphertext bytes read per source refill.
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Decrypt and return the number of content bytes written.
    pub fn decrypt_file_counted<S, D>(
        &self,
        encrypted_content: Option<S>,
        file_credentials: Option<&FileCredentials>,
        destination: Option<D>,
    ) -> Result<u64, FileDecryptionError>
    where
        S: ContentSource,
        D: ContentSink,
    {
        let ValidatedRequest {
            source,
            mut destination,
            secret,
            file_hash,
            source_len,
        } = validate_request(encrypted_content, file_credentials, destination)?;

        debug!(
            seekable = source_len.is_some(),
            ciphertext_len = ?source_len,
            chunk_size = self.chunk_size,
            "decrypting file"
        );

        let mut key = Aes256Key32::new([0u8; 32]);
        let mut iv = Iv16::new([0u8; 16]);
        derive_file_key(secret.expose_secret(), &file_hash, &mut key, &mut iv);
        drop(secret);

        let reader = CbcBlockReader::new(source, &key, &iv, self.chunk_size);
        drop(key);

        // A seekable source already passed the length check.
        let blocks = if source_len.is_some() {
            reader.aligned_source()
        } else {
            reader
        };

        match strip_and_verify(blocks, &file_hash, &mut destination) {
            Ok(written) => {
                debug!(bytes = written, "file decrypted");
                Ok(written)
            }
            Err(e) => {
                if matches!(e, FileDecryptionError::Integrity(_)) {
                    warn!(error = %e, "file integrity check failed");
                } else {
                    debug!(error = %e, "file decryption aborted");
                }
                Err(e)
            }
        }
    }
}

impl Default for FileDecryptor {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Decrypter for FileDecryptor {
    #[inline]
    fn decrypt_file<S, D>(
        &self,
        encrypted_content: Option<S>,
        file_credentials: Option<&FileCredentials>,
        destination: Option<D>,
    ) -> Result<(), FileDecryptionError>
    where
        S: ContentSource,
        D: ContentSink,
    {
        self.decrypt_file_counted(encrypted_content, file_credentials, destination)
            .map(|_| ())
    }
}

/// Decrypt a file with the default [`FileDecryptor`].
///
/// Validation runs in a fixed order before any cryptographic work: missing
/// inputs, stream capabilities, the length of seekable sources, base64 decoding
/// and the digest width. A seekable source is decrypted from its current read
/// position; it is not rewound.
///
/// # Example
///
/// ```no_run
/// use passport_file_decrypt::{decrypt_file, FileCredentials};
/// use std::fs::File;
///
/// let credentials = FileCredentials::new(
///     "vF7nut7clg/H/pEaTJigo4mQJ0s8B+HGCWKTWtOTIdo=",
///     "v3q47iscI6TS94CMo7HGQUOxw28LIf82NJBkImzP57c=",
/// );
/// let encrypted = File::open("selfie.jpg.enc")?;
/// let mut plaintext: Vec<u8> = Vec::new();
///
/// decrypt_file(Some(encrypted), Some(&credentials), Some(&mut plaintext))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[inline]
pub fn decrypt_file<S, D>(
    encrypted_content: Option<S>,
    file_credentials: Option<&FileCredentials>,
    destination: Option<D>,
) -> Result<(), FileDecryptionError>
where
    S: ContentSource,
    D: ContentSink,
{
    FileDecryptor::default().decrypt_file(encrypted_content, file_credentials, destination)
}
