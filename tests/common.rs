//! tests/common.rs
//! Common fixtures shared across test files: a test-only file encryptor,
//! fixed credentials and streams with restricted capabilities.

use std::io::{self, Read, Write};

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use passport_file_decrypt::aliases::FileHash32;
use passport_file_decrypt::consts::{AES_BLOCK_SIZE, MIN_PADDING_LEN};
use passport_file_decrypt::utils::xor_blocks;
use passport_file_decrypt::{
    derive_file_key_new, ContentSink, ContentSource, FileCredentials, FileKey,
};
use sha2::{Digest, Sha256};

/// Secret used by the fixed known-answer vector (bytes 0x40..0x60).
#[allow(dead_code)]
pub const KAT_SECRET_B64: &str = "QEFCQ0RFRkdISUpLTE1OT1BRUlNUVVZXWFlaW1xdXl8=";

/// SHA-256 of [`KAT_CONTENT`].
#[allow(dead_code)]
pub const KAT_FILE_HASH_B64: &str = "tHzA8QS2LUx8MLzWj9jmdhPih9xK2MMQ7xDLreqcQ4A=";

#[allow(dead_code)]
pub const KAT_CONTENT: &[u8] = b"The quick brown fox jumps over the lazy dog.\n";

/// 35-byte padding prefix + content, AES-256-CBC encrypted (generated independently).
#[allow(dead_code)]
pub const KAT_CIPHERTEXT_HEX: &str = "356c831cb6cfb7225d58185a158a9e98c55178f060d2180801e93ed518bfec91\
b166a48d69341723432ddcd8c47b00ab7eb50c12c9ec540169fc7e88fa38eaa4\
4a5727b1371ab3ce5a67f5736dd1abe6";

/// Raw secret used by generated fixtures.
#[allow(dead_code)]
pub const TEST_SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";

/// Common content used across multiple tests
#[allow(dead_code)]
pub const TEST_DATA: &[u8] = b"driver_license-selfie.jpg bytes would go here";

#[allow(dead_code)]
pub fn kat_credentials() -> FileCredentials {
    FileCredentials::new(KAT_SECRET_B64, KAT_FILE_HASH_B64)
}

#[allow(dead_code)]
pub fn kat_ciphertext() -> Vec<u8> {
    hex::decode(KAT_CIPHERTEXT_HEX).unwrap()
}

/// Install a test subscriber once; honours `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[allow(dead_code)]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Smallest valid padding that aligns `content_len` to the block size.
#[allow(dead_code)]
pub fn padding_for(content_len: usize) -> u8 {
    let mut padding = MIN_PADDING_LEN as usize;
    while (padding + content_len) % AES_BLOCK_SIZE != 0 {
        padding += 1;
    }
    padding as u8
}

/// Prefix `content` with `padding_len` bytes, the first of which stores the length.
#[allow(dead_code)]
pub fn pad(content: &[u8], padding_len: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(padding_len as usize + content.len());
    if padding_len > 0 {
        data.push(padding_len);
        data.extend((1..padding_len).map(|i| i.wrapping_mul(31)));
    }
    data.extend_from_slice(content);
    data
}

/// AES-256-CBC encrypt block-aligned `plaintext` under the key derived from
/// `secret` and `file_hash`.
#[allow(dead_code)]
pub fn encrypt_cbc(plaintext: &[u8], secret: &[u8], file_hash: &[u8; 32]) -> Vec<u8> {
    assert_eq!(plaintext.len() % AES_BLOCK_SIZE, 0, "plaintext must be aligned");

    let FileKey { key, iv } = derive_file_key_new(secret, &FileHash32::new(*file_hash));
    let cipher = Aes256Enc::new(key.expose_secret().into());

    let mut prev_block = *iv.expose_secret();
    let mut ciphertext = Vec::with_capacity(plaintext.len());
    for chunk in plaintext.chunks_exact(AES_BLOCK_SIZE) {
        let mut xored = [0u8; 16];
        xor_blocks(chunk, &prev_block, &mut xored);
        let mut aes_block = AesBlock::from(xored);
        cipher.encrypt_block(&mut aes_block);
        prev_block.copy_from_slice(aes_block.as_slice());
        ciphertext.extend_from_slice(aes_block.as_slice());
    }
    ciphertext
}

/// Encrypt `content` the way a well-formed file is produced.
#[allow(dead_code)]
pub fn seal(content: &[u8], secret: &[u8]) -> (Vec<u8>, FileCredentials) {
    let file_hash = sha256(content);
    let plaintext = pad(content, padding_for(content.len()));
    let ciphertext = encrypt_cbc(&plaintext, secret, &file_hash);
    (ciphertext, credentials_for(secret, &file_hash))
}

#[allow(dead_code)]
pub fn credentials_for(secret: &[u8], file_hash: &[u8]) -> FileCredentials {
    FileCredentials::new(STANDARD.encode(secret), STANDARD.encode(file_hash))
}

/// Deterministic pseudo-random content.
#[allow(dead_code)]
pub fn sample_content(len: usize) -> Vec<u8> {
    let mut state: u32 = 0x9e37_79b9 ^ len as u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

// —————————————————————————————————————————————————————————————————————————————
// Streams with restricted capabilities
// —————————————————————————————————————————————————————————————————————————————

/// A source opened for writing only.
#[allow(dead_code)]
pub struct WriteOnlySource;

impl Read for WriteOnlySource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "write-only"))
    }
}

impl ContentSource for WriteOnlySource {
    fn can_read(&self) -> bool {
        false
    }
}

/// A destination opened for reading only.
#[allow(dead_code)]
#[derive(Default)]
pub struct ReadOnlySink;

impl Write for ReadOnlySink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "read-only"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl ContentSink for ReadOnlySink {
    fn can_write(&self) -> bool {
        false
    }
}

/// Forward-only reader returning at most `max_read` bytes per call and an
/// `Interrupted` error before every other read.
#[allow(dead_code)]
pub struct TrickleReader<R> {
    inner: R,
    max_read: usize,
    interrupt_next: bool,
}

#[allow(dead_code)]
impl<R: Read> TrickleReader<R> {
    pub fn new(inner: R, max_read: usize) -> Self {
        Self {
            inner,
            max_read,
            interrupt_next: true,
        }
    }
}

impl<R: Read> Read for TrickleReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.interrupt_next {
            self.interrupt_next = false;
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        self.interrupt_next = true;
        let len = buf.len().min(self.max_read);
        self.inner.read(&mut buf[..len])
    }
}

impl<R: Read> ContentSource for TrickleReader<R> {}
