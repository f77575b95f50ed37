// src/decryptor/stream/mod.rs
pub(crate) mod context;
pub(crate) mod integrity;

pub use context::CbcBlockReader;
pub use integrity::{strip_and_verify, IntegrityContext};
