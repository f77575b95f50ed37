//! src/decryptor/stream/integrity.rs
//! Padding strip + SHA-256 verification over the decrypted block stream

use std::io::Write;

use sha2::{Digest, Sha256};

use crate::aliases::{Block16, FileHash32};
use crate::consts::{AES_BLOCK_SIZE, MIN_PADDING_LEN};
use crate::error::{FileDecryptionError, IntegrityFailure};

/// Running state of the strip-and-hash stage.
///
/// The first plaintext byte carries the padding length. That many bytes are
/// dropped; everything after them is written to the destination and hashed.
pub struct IntegrityContext<'a> {
    expected: &'a FileHash32,
    hasher: Sha256,
    padding_len: u8,
    skip_remaining: usize,
    bytes_written: u64,
}

impl<'a> IntegrityContext<'a> {
    /// Start from the first decrypted block, validating its padding length.
    pub fn from_first_block(
        first_block: &Block16,
        expected: &'a FileHash32,
    ) -> Result<Self, FileDecryptionError> {
        let padding_len = first_block.expose_secret()[0];
        if padding_len < MIN_PADDING_LEN {
            return Err(IntegrityFailure::InvalidPadding(padding_len).into());
        }

        Ok(Self {
            expected,
            hasher: Sha256::new(),
            padding_len,
            skip_remaining: padding_len as usize,
            bytes_written: 0,
        })
    }

    /// Content bytes written to the destination so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Strip what is left of the padding from `block` and emit the rest.
    pub fn absorb<W: Write>(
        &mut self,
        block: &Block16,
        destination: &mut W,
    ) -> Result<(), FileDecryptionError> {
        let skip = self.skip_remaining.min(AES_BLOCK_SIZE);
        self.skip_remaining -= skip;
        if skip == AES_BLOCK_SIZE {
            return Ok(());
        }

        let content = &block.expose_secret()[skip..];
        destination.write_all(content)?;
        self.hasher.update(content);
        self.bytes_written += content.len() as u64;
        Ok(())
    }

    /// Check the padding fit inside the data and compare digests.
    ///
    /// Returns the number of content bytes written.
    pub fn finish<W: Write>(self, destination: &mut W) -> Result<u64, FileDecryptionError> {
        if self.skip_remaining > 0 {
            return Err(IntegrityFailure::InvalidPadding(self.padding_len).into());
        }

        destination.flush()?;

        let digest = self.hasher.finalize();
        if digest.as_slice() != self.expected.expose_secret().as_slice() {
            return Err(IntegrityFailure::HashMismatch(self.bytes_written).into());
        }
        Ok(self.bytes_written)
    }
}

/// Run the strip-and-hash stage over a plaintext block stream.
///
/// An empty stream has no padding byte and is reported as padding length `0`.
/// Content written before a failure stays in `destination`.
pub fn strip_and_verify<I, W>(
    blocks: I,
    expected: &FileHash32,
    destination: &mut W,
) -> Result<u64, FileDecryptionError>
where
    I: IntoIterator<Item = Result<Block16, FileDecryptionError>>,
    W: Write,
{
    let mut blocks = blocks.into_iter();

    let first_block = match blocks.next().transpose()? {
        Some(block) => block,
        None => return Err(IntegrityFailure::InvalidPadding(0).into()),
    };

    let mut ctx = IntegrityContext::from_first_block(&first_block, expected)?;
    ctx.absorb(&first_block, destination)?;
    drop(first_block);

    for block in blocks {
        ctx.absorb(&block?, destination)?;
    }

    ctx.finish(destination)
}
