//! # Decryption Context
//!
//! Streaming AES-256-CBC over any [`Read`]. Ciphertext is pulled in fixed-size
//! chunks and handed out one plaintext block at a time, so memory use is one
//! chunk plus a few blocks regardless of file size.

use std::io::{ErrorKind, Read};

use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use tracing::debug;

use crate::aliases::{Aes256Key32, Block16, Iv16};
use crate::consts::AES_BLOCK_SIZE;
use crate::error::{CipherError, FileDecryptionError};
use crate::utils::{align_to_block, xor_blocks};

/// CBC decryption context yielding plaintext blocks.
///
/// ## Buffer Layout
///
/// - `chunk[consumed..filled]`: ciphertext read from the source but not yet decrypted
/// - `previous_block`: last ciphertext block (the IV before the first block)
///
/// Implements [`Iterator`]; the iterator is fused after end of stream or the
/// first error.
pub struct CbcBlockReader<R> {
    input: R,
    cipher: Aes256Dec,
    previous_block: Block16,
    chunk: Vec<u8>,
    consumed: usize,
    filled: usize,
    blocks_out: u64,
    eof: bool,
    finished: bool,
    aligned_source: bool,
}

impl<R: Read> CbcBlockReader<R> {
    /// Create a context reading `input` in chunks of `chunk_size` bytes.
    ///
    /// `chunk_size` is rounded down to a whole number of blocks (minimum one).
    pub fn new(input: R, key: &Aes256Key32, iv: &Iv16, chunk_size: usize) -> Self {
        Self {
            input,
            cipher: Aes256Dec::new(key.expose_secret().into()),
            previous_block: Block16::new(*iv.expose_secret()),
            chunk: vec![0u8; align_to_block(chunk_size)],
            consumed: 0,
            filled: 0,
            blocks_out: 0,
            eof: false,
            finished: false,
            aligned_source: false,
        }
    }

    /// Mark the source as one whose total length is already known to be a whole
    /// number of blocks.
    ///
    /// A partial final block can then only come from a read position inside a
    /// block. It is dropped instead of raising [`CipherError::IncompleteBlock`],
    /// and the misread plaintext fails the padding or digest check downstream.
    #[must_use]
    pub fn aligned_source(mut self) -> Self {
        self.aligned_source = true;
        self
    }

    /// Number of ciphertext bytes decrypted so far.
    #[inline]
    pub fn bytes_decrypted(&self) -> u64 {
        self.blocks_out * AES_BLOCK_SIZE as u64
    }

    /// Decrypt the next block.
    ///
    /// Returns `Ok(None)` at a clean end of stream. A source ending inside a
    /// block yields [`CipherError::IncompleteBlock`] as soon as its end is
    /// buffered, before the blocks preceding it in the same chunk are handed out,
    /// unless the source was marked with [`aligned_source`](Self::aligned_source).
    pub fn next_block(&mut self) -> Result<Option<Block16>, FileDecryptionError> {
        if self.finished {
            return Ok(None);
        }

        if self.filled - self.consumed < AES_BLOCK_SIZE {
            self.refill()?;
            if self.filled == self.consumed {
                self.finished = true;
                return Ok(None);
            }
        }

        let mut ciphertext = [0u8; AES_BLOCK_SIZE];
        ciphertext.copy_from_slice(&self.chunk[self.consumed..self.consumed + AES_BLOCK_SIZE]);
        self.consumed += AES_BLOCK_SIZE;

        let mut aes_block = AesBlock::from(ciphertext);
        self.cipher.decrypt_block(&mut aes_block);

        let mut plaintext = Block16::new([0u8; 16]);
        xor_blocks(
            aes_block.as_ref(),
            self.previous_block.expose_secret(),
            plaintext.expose_secret_mut(),
        );
        self.previous_block = Block16::new(ciphertext);
        self.blocks_out += 1;

        Ok(Some(plaintext))
    }

    /// Move the undecrypted tail to the front and read until the chunk is full
    /// or the source is exhausted.
    ///
    /// Once the source is exhausted the buffered ciphertext must be a whole
    /// number of blocks.
    fn refill(&mut self) -> Result<(), FileDecryptionError> {
        let pending = self.filled - self.consumed;
        self.chunk.copy_within(self.consumed..self.filled, 0);
        self.consumed = 0;
        self.filled = pending;

        while !self.eof && self.filled < self.chunk.len() {
            match self.input.read(&mut self.chunk[self.filled..]) {
                Ok(0) => self.eof = true,
                Ok(n) => self.filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Err(e.into());
                }
            }
        }

        let trailing = self.filled % AES_BLOCK_SIZE;
        if self.eof && trailing != 0 {
            if self.aligned_source {
                debug!(trailing, "read position inside a block, dropping partial tail");
                self.filled -= trailing;
                return Ok(());
            }
            self.finished = true;
            return Err(CipherError::IncompleteBlock { trailing }.into());
        }
        Ok(())
    }
}

impl<R: Read> Iterator for CbcBlockReader<R> {
    type Item = Result<Block16, FileDecryptionError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_block().transpose()
    }
}
