//! # Builders
//!
//! Builder patterns for configuring decryption.
//!
//! ## Modules
//!
//! - [`decryptor_builder`] - Builder for [`FileDecryptor`](crate::FileDecryptor)
//!
//! ## Usage
//!
//! Builders provide a fluent API with sensible defaults and optional customization.

pub mod decryptor_builder;

pub use decryptor_builder::DecryptorBuilder;
