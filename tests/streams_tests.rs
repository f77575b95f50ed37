//! tests/streams_tests.rs
//! Capability probes of the source/sink traits and adapters

mod common;
use common::*;

use passport_file_decrypt::{ContentSink, ContentSource, ForwardSource, SeekableSource, WriterSink};
use std::fs::{File, OpenOptions};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};

#[test]
fn cursor_reports_total_length_regardless_of_position() {
    let mut cursor = Cursor::new(vec![0u8; 48]);
    cursor.set_position(20);

    assert_eq!(cursor.seekable_len().unwrap(), Some(48));
    assert_eq!(cursor.position(), 20, "probe must not move the cursor");
}

#[test]
fn seekable_adapter_restores_position() {
    let mut source = SeekableSource::new(Cursor::new(vec![1u8; 64]));
    let mut head = [0u8; 10];
    source.read_exact(&mut head).unwrap();

    assert_eq!(source.seekable_len().unwrap(), Some(64));

    let mut inner = source.into_inner();
    assert_eq!(inner.stream_position().unwrap(), 10);
    assert_eq!(inner.seek(SeekFrom::End(0)).unwrap(), 64);
}

#[test]
fn forward_adapter_hides_length() {
    let mut source = ForwardSource::new(Cursor::new(vec![0u8; 32]));
    assert_eq!(source.seekable_len().unwrap(), None);
    assert!(source.can_read());
}

#[test]
fn byte_slices_are_forward_only() {
    let mut bytes: &[u8] = b"0123456789abcdef";
    assert_eq!(bytes.seekable_len().unwrap(), None);
}

#[test]
fn file_reports_length_without_moving() {
    let mut written = tempfile::NamedTempFile::new().unwrap();
    written.write_all(&[0u8; 80]).unwrap();

    let mut file = File::open(written.path()).unwrap();
    file.seek(SeekFrom::Start(16)).unwrap();
    assert_eq!(file.seekable_len().unwrap(), Some(80));
    assert_eq!(file.stream_position().unwrap(), 16);
}

#[cfg(unix)]
#[test]
fn file_capabilities_follow_open_mode() {
    let temp = tempfile::NamedTempFile::new().unwrap();

    let read_only = File::open(temp.path()).unwrap();
    assert!(read_only.can_read());
    assert!(!read_only.can_write());

    let write_only = OpenOptions::new().write(true).open(temp.path()).unwrap();
    assert!(!write_only.can_read());
    assert!(write_only.can_write());

    let read_write = OpenOptions::new().read(true).write(true).open(temp.path()).unwrap();
    assert!(read_write.can_read());
    assert!(read_write.can_write());

    let append = OpenOptions::new().append(true).open(temp.path()).unwrap();
    assert!(!append.can_read());
    assert!(append.can_write());
}

#[test]
fn references_and_boxes_forward_capabilities() {
    let mut unreadable = WriteOnlySource;
    assert!(!(&mut unreadable).can_read());

    let boxed: Box<dyn ContentSource> = Box::new(WriteOnlySource);
    assert!(!boxed.can_read());

    let mut read_only = ReadOnlySink;
    assert!(!(&mut read_only).can_write());

    let boxed_sink: Box<dyn ContentSink> = Box::new(Vec::<u8>::new());
    assert!(boxed_sink.can_write());
}

#[test]
fn writer_sink_passes_bytes_through() {
    let mut sink = WriterSink::new(Vec::<u8>::new());
    sink.write_all(b"content").unwrap();
    sink.flush().unwrap();

    assert!(sink.can_write());
    assert_eq!(sink.into_inner(), b"content");
}
