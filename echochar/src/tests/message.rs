use crate::config::MESSAGE_CAPACITY;
use crate::message::MessageBuffer;

use chrdev::ChrdevError;

#[test]
fn test_allocate_has_requested_capacity() {
    let buffer = MessageBuffer::allocate(MESSAGE_CAPACITY).unwrap();
    assert_eq!(buffer.capacity(), MESSAGE_CAPACITY);
    assert_eq!(buffer.len(), 0);
    assert!(buffer.is_empty());
}

#[test]
fn test_overwrite_replaces_whole_content() {
    let mut buffer = MessageBuffer::allocate(MESSAGE_CAPACITY).unwrap();

    buffer.overwrite(b"first message").unwrap();
    assert_eq!(buffer.as_bytes(), b"first message");

    // 覆盖写不追加，长内容换短内容也不会留下尾巴
    buffer.overwrite(b"2nd").unwrap();
    assert_eq!(buffer.as_bytes(), b"2nd");
    assert_eq!(buffer.len(), 3);
}

#[test]
fn test_overwrite_at_exact_capacity() {
    let mut buffer = MessageBuffer::allocate(MESSAGE_CAPACITY).unwrap();
    let content = alloc::vec![b'x'; MESSAGE_CAPACITY];

    buffer.overwrite(&content).unwrap();
    assert_eq!(buffer.len(), MESSAGE_CAPACITY);
}

#[test]
fn test_overwrite_over_capacity_is_rejected() {
    let mut buffer = MessageBuffer::allocate(MESSAGE_CAPACITY).unwrap();
    buffer.overwrite(b"keep me").unwrap();

    let oversized = alloc::vec![b'x'; MESSAGE_CAPACITY + 1];
    let err = buffer.overwrite(&oversized).unwrap_err();

    assert_eq!(err, ChrdevError::NoSpace);
    // 拒绝发生在任何修改之前
    assert_eq!(buffer.as_bytes(), b"keep me");
}

#[test]
fn test_empty_overwrite() {
    let mut buffer = MessageBuffer::allocate(MESSAGE_CAPACITY).unwrap();
    buffer.overwrite(b"something").unwrap();
    buffer.overwrite(b"").unwrap();
    assert!(buffer.is_empty());
}
