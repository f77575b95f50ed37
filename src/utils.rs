//! Utility functions used across the library.

use crate::consts::AES_BLOCK_SIZE;

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the CBC decryption path to chain each decrypted block with the
/// previous ciphertext block (or the IV for the first block).
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. Callers pass
/// `expose_secret()` of [`Block16`](crate::aliases::Block16) / [`Iv16`](crate::aliases::Iv16)
/// buffers, which are exactly 16 bytes.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < AES_BLOCK_SIZE {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Rounds `size` down to a whole number of AES blocks, never below one block.
#[inline]
pub const fn align_to_block(size: usize) -> usize {
    let aligned = size - size % AES_BLOCK_SIZE;
    if aligned < AES_BLOCK_SIZE {
        AES_BLOCK_SIZE
    } else {
        aligned
    }
}
