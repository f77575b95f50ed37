//! src/builders/decryptor_builder.rs
//! FileDecryptor builder

use crate::consts::DEFAULT_CHUNK_SIZE;
use crate::decryptor::FileDecryptor;
use crate::utils::align_to_block;

/// Streaming decryptor builder
///
/// Defaults: chunk size of [`DEFAULT_CHUNK_SIZE`] bytes (81,920).
///
/// # Thread Safety
///
/// This type is `Send + Sync` and holds no secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecryptorBuilder {
    chunk_size: usize,
}

impl DecryptorBuilder {
    /// Create builder with defaults
    #[must_use]
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set how many ciphertext bytes are read from the source at a time.
    ///
    /// Rounded down to a multiple of 16, minimum 16.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = align_to_block(chunk_size);
        self
    }

    /// Current chunk size
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Finish configuration
    #[must_use]
    pub fn build(self) -> FileDecryptor {
        FileDecryptor {
            chunk_size: self.chunk_size,
        }
    }
}

impl Default for DecryptorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
