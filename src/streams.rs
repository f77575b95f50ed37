//! # Stream Capabilities
//!
//! [`ContentSource`] and [`ContentSink`] describe what the engine may do with the
//! streams it is handed. They extend [`Read`] / [`Write`] with the capability
//! probes the validation front-end runs before any cryptographic work:
//!
//! - `can_read` / `can_write`: whether the stream accepts the operation at all
//! - `seekable_len`: the total length of a seekable source, measured without
//!   moving its read cursor; `None` for sources that can only be read forward
//!
//! On unix a [`File`] answers `can_read` / `can_write` from the access mode of
//! its descriptor, so a file opened write-only is rejected as a source and one
//! opened read-only is rejected as a destination.
//!
//! The common std types implement the traits directly. Anything else can be
//! wrapped with [`SeekableSource`], [`ForwardSource`] or [`WriterSink`].

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
#[cfg(unix)]
use std::os::unix::io::AsRawFd;

#[cfg(unix)]
use nix::fcntl::{fcntl, FcntlArg, OFlag};

/// A byte source holding encrypted file content.
pub trait ContentSource: Read {
    /// Whether the source supports reading.
    fn can_read(&self) -> bool {
        true
    }

    /// Total length in bytes when the source is seekable, independent of the
    /// current read position. The read position is left untouched.
    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        Ok(None)
    }
}

/// A byte sink receiving decrypted file content.
pub trait ContentSink: Write {
    /// Whether the sink supports writing.
    fn can_write(&self) -> bool {
        true
    }
}

/// Measure the end offset of a seekable stream and restore its position.
fn measure_len<S: Seek + ?Sized>(stream: &mut S) -> io::Result<u64> {
    let position = stream.stream_position()?;
    let len = stream.seek(SeekFrom::End(0))?;
    if position != len {
        stream.seek(SeekFrom::Start(position))?;
    }
    Ok(len)
}

// ─────────────────────────────────────────────────────────────────────────────
// Adapters
// ─────────────────────────────────────────────────────────────────────────────

/// Treat any `Read + Seek` type as a seekable source.
#[derive(Debug)]
pub struct SeekableSource<R>(R);

impl<R: Read + Seek> SeekableSource<R> {
    pub fn new(inner: R) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read> Read for SeekableSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read + Seek> ContentSource for SeekableSource<R> {
    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        measure_len(&mut self.0).map(Some)
    }
}

/// Treat any reader as a forward-only source, even when it could seek.
///
/// Its length is only discovered by reading to the end.
#[derive(Debug)]
pub struct ForwardSource<R>(R);

impl<R: Read> ForwardSource<R> {
    pub fn new(inner: R) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: Read> Read for ForwardSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl<R: Read> ContentSource for ForwardSource<R> {}

/// Treat any writer as a destination.
#[derive(Debug)]
pub struct WriterSink<W>(W);

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self(inner)
    }

    pub fn into_inner(self) -> W {
        self.0
    }
}

impl<W: Write> Write for WriterSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl<W: Write> ContentSink for WriterSink<W> {}

// ─────────────────────────────────────────────────────────────────────────────
// std sources
// ─────────────────────────────────────────────────────────────────────────────

impl<T: AsRef<[u8]>> ContentSource for Cursor<T> {
    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        Ok(Some(self.get_ref().as_ref().len() as u64))
    }
}

/// Access mode the descriptor was opened with, `None` when it cannot be queried.
#[cfg(unix)]
fn access_mode(file: &File) -> Option<OFlag> {
    let flags = fcntl(file.as_raw_fd(), FcntlArg::F_GETFL).ok()?;
    Some(OFlag::from_bits_truncate(flags) & OFlag::O_ACCMODE)
}

impl ContentSource for File {
    #[cfg(unix)]
    fn can_read(&self) -> bool {
        access_mode(self).is_none_or(|mode| mode != OFlag::O_WRONLY)
    }

    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        let metadata = self.metadata()?;
        if !metadata.is_file() {
            // pipes, sockets and character devices
            return Ok(None);
        }
        Ok(Some(metadata.len()))
    }
}

impl ContentSource for &[u8] {}

impl ContentSource for io::Empty {}

impl<S: ContentSource + ?Sized> ContentSource for &mut S {
    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        (**self).seekable_len()
    }
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn seekable_len(&mut self) -> io::Result<Option<u64>> {
        (**self).seekable_len()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// std sinks
// ─────────────────────────────────────────────────────────────────────────────

impl ContentSink for Vec<u8> {}

impl ContentSink for Cursor<Vec<u8>> {}

impl ContentSink for Cursor<&mut Vec<u8>> {}

impl ContentSink for Cursor<&mut [u8]> {}

impl ContentSink for File {
    #[cfg(unix)]
    fn can_write(&self) -> bool {
        access_mode(self).is_none_or(|mode| mode != OFlag::O_RDONLY)
    }
}

impl ContentSink for io::Sink {}

impl<D: ContentSink + ?Sized> ContentSink for &mut D {
    fn can_write(&self) -> bool {
        (**self).can_write()
    }
}

impl<D: ContentSink + ?Sized> ContentSink for Box<D> {
    fn can_write(&self) -> bool {
        (**self).can_write()
    }
}
