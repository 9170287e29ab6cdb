use alloc::vec::Vec;

use chrdev::{ChrdevError, FileOps};

use crate::config::MESSAGE_CAPACITY;
use crate::fops::EchoFileOps;

fn write(fops: &EchoFileOps, data: &[u8]) -> Result<usize, ChrdevError> {
    let mut offset = 0u64;
    fops.write(data, &mut offset)
}

fn read(fops: &EchoFileOps, buf: &mut [u8]) -> Result<usize, ChrdevError> {
    let mut offset = 0u64;
    fops.read(buf, &mut offset)
}

#[test]
fn test_open_allocates_session_buffer() {
    let fops = EchoFileOps::new();
    assert_eq!(fops.buffer_capacity(), None);

    fops.open().unwrap();
    assert_eq!(fops.buffer_capacity(), Some(MESSAGE_CAPACITY));
}

#[test]
fn test_second_open_is_rejected() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    assert_eq!(fops.open().unwrap_err(), ChrdevError::Busy);

    // 被拒绝的 open 不破坏活跃会话
    assert_eq!(fops.buffer_capacity(), Some(MESSAGE_CAPACITY));
}

#[test]
fn test_open_release_cycle() {
    let fops = EchoFileOps::new();

    fops.open().unwrap();
    write(&fops, b"stale").unwrap();
    fops.release();
    assert_eq!(fops.buffer_capacity(), None);

    // 重新打开得到新的空缓冲区，与上一个会话的内容无关
    fops.open().unwrap();
    assert_eq!(fops.buffer_capacity(), Some(MESSAGE_CAPACITY));
    assert_eq!(fops.message_snapshot().unwrap(), Vec::<u8>::new());
}

#[test]
fn test_release_without_open_is_noop() {
    let fops = EchoFileOps::new();
    fops.release();
    fops.release();
    assert_eq!(fops.buffer_capacity(), None);
}

#[test]
fn test_open_count_accumulates() {
    let fops = EchoFileOps::new();
    for _ in 0..3 {
        fops.open().unwrap();
        fops.release();
    }
    assert_eq!(fops.open_count(), 3);
}

#[test]
fn test_write_formats_echo() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    let written = write(&fops, b"hi").unwrap();
    assert_eq!(written, 12);
    assert_eq!(fops.message_snapshot().unwrap(), b"hi(2 letras)");
}

#[test]
fn test_write_empty_input() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    let written = write(&fops, b"").unwrap();
    assert_eq!(written, 10);
    assert_eq!(fops.message_snapshot().unwrap(), b"(0 letras)");
}

#[test]
fn test_write_truncates_text_at_nul() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    // 文本在 NUL 处截断，计数仍是完整输入长度
    let written = write(&fops, b"hi\0xx").unwrap();
    assert_eq!(written, 12);
    assert_eq!(fops.message_snapshot().unwrap(), b"hi(5 letras)");
}

#[test]
fn test_last_write_wins() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    write(&fops, b"first").unwrap();
    write(&fops, b"no").unwrap();
    assert_eq!(fops.message_snapshot().unwrap(), b"no(2 letras)");
}

#[test]
fn test_write_without_open_fails() {
    let fops = EchoFileOps::new();
    assert_eq!(write(&fops, b"hi").unwrap_err(), ChrdevError::BadFileDescriptor);
}

#[test]
fn test_write_at_exact_capacity() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    // 244 字节正文 + "(244 letras)" = 256 字节，恰好占满
    let payload = alloc::vec![b'a'; 244];
    let written = write(&fops, &payload).unwrap();
    assert_eq!(written, MESSAGE_CAPACITY);
}

#[test]
fn test_oversized_write_is_rejected_and_buffer_unchanged() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();
    write(&fops, b"hi").unwrap();

    let payload = alloc::vec![b'a'; 250];
    let err = write(&fops, &payload).unwrap_err();

    assert_eq!(err, ChrdevError::NoSpace);
    assert_eq!(fops.message_snapshot().unwrap(), b"hi(2 letras)");
}

#[test]
fn test_read_always_reports_eof() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    let mut buf = [0u8; 64];
    assert_eq!(read(&fops, &mut buf).unwrap(), 0);

    // 有内容、有偏移、请求长度不同，读取结果都一样
    write(&fops, b"hi").unwrap();
    assert_eq!(read(&fops, &mut buf).unwrap(), 0);
    assert_eq!(read(&fops, &mut buf[..1]).unwrap(), 0);

    let mut offset = 5u64;
    assert_eq!(fops.read(&mut buf, &mut offset).unwrap(), 0);
    assert_eq!(offset, 5);
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn test_read_never_echoes_any_written_input() {
    let fops = EchoFileOps::new();
    fops.open().unwrap();

    // 空输入、普通输入、恰好占满容量的输入：读端一律空
    let full = [b'a'; 244];
    let cases: [&[u8]; 3] = [b"", b"hi", &full];
    for payload in cases {
        write(&fops, payload).unwrap();
        let mut buf = [0u8; MESSAGE_CAPACITY];
        assert_eq!(read(&fops, &mut buf).unwrap(), 0);
    }
}
