//! # Secure-Gate Type Aliases
//!
//! Type aliases for secure memory management using [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every buffer that ever holds key material, digests or plaintext is wiped on drop
//! and requires an explicit `.expose_secret()` to read.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - Generic secure stack buffer for any size `N`
//!
//! ### Fixed-Size Secrets
//! - [`Aes256Key32`] - 32-byte AES-256 key
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`Block16`] - one decrypted AES block
//! - [`FileHash32`] - decoded expected plaintext digest
//! - [`KeyMaterial64`] - raw SHA-512 output before it is split into key and IV
//!
//! ### Dynamic Secrets
//! - [`EncodedSecret`] - base64 wire string (secret or file hash)
//! - [`SecretBytes`] - decoded secret of arbitrary length

use secure_gate::dynamic_alias;
use secure_gate::fixed_alias;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

// Semantic sub-types
pub type Block16 = SpanBuffer<16>; // one AES block
pub type KeyMaterial64 = SpanBuffer<64>; // SHA-512(secret || file_hash)

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
dynamic_alias!(pub EncodedSecret, String); // base64 wire form
dynamic_alias!(pub SecretBytes, Vec<u8>); // decoded secret

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size concrete secrets: alphabetical order
// ─────────────────────────────────────────────────────────────────────────────
fixed_alias!(pub Aes256Key32, 32); // file key
fixed_alias!(pub FileHash32, 32); // expected SHA-256 of the content
fixed_alias!(pub Iv16, 16); // file IV
