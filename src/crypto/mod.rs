// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! The file key derivation is re-exported at the crate root for custom flows.

pub mod kdf;
