//! CharDeviceFile session-object tests.
//!
//! The mock model is installed as the process-global `ChrdevOps` once for
//! this test binary; each test registers its own device and therefore gets
//! its own major number, so tests can run in parallel.

use std::sync::{Arc, OnceLock};
use std::sync::atomic::{AtomicUsize, Ordering};

use chrdev::{CharDeviceFile, ChrdevError, DeviceHandle, FileOps, OpenFlags, makedev};
use test_support::MockChrdevModel;

fn model() -> &'static MockChrdevModel {
    static MODEL: OnceLock<&'static MockChrdevModel> = OnceLock::new();
    MODEL.get_or_init(|| {
        let model = Box::leak(Box::new(MockChrdevModel::new()));
        // SAFETY: installed once, before any session is opened
        unsafe { chrdev::register_chrdev_ops(model) };
        model
    })
}

/// Echoing dispatch entry that counts its open/release calls.
struct CountingFops {
    opens: AtomicUsize,
    releases: AtomicUsize,
    fail_open: bool,
}

impl CountingFops {
    fn new() -> Self {
        Self {
            opens: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            fail_open: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail_open: true,
            ..Self::new()
        }
    }
}

impl FileOps for CountingFops {
    fn open(&self) -> Result<(), ChrdevError> {
        if self.fail_open {
            return Err(ChrdevError::NoMemory);
        }
        self.opens.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn read(&self, buf: &mut [u8], offset: &mut u64) -> Result<usize, ChrdevError> {
        let data = b"pong";
        let n = data.len().min(buf.len());
        buf[..n].copy_from_slice(&data[..n]);
        *offset += n as u64;
        Ok(n)
    }

    fn write(&self, buf: &[u8], offset: &mut u64) -> Result<usize, ChrdevError> {
        *offset += buf.len() as u64;
        Ok(buf.len())
    }

    fn release(&self) {
        self.releases.fetch_add(1, Ordering::Relaxed);
    }
}

fn register(name: &str, fops: Arc<dyn FileOps>) -> DeviceHandle {
    DeviceHandle::register_with(model(), name, name, fops).unwrap()
}

#[test]
fn test_open_unknown_device_fails() {
    model();
    let err = CharDeviceFile::open(makedev(3, 0), OpenFlags::O_RDWR).unwrap_err();
    assert_eq!(err, ChrdevError::NoDevice);
}

#[test]
fn test_open_dispatches_to_driver() {
    let fops = Arc::new(CountingFops::new());
    let handle = register("sess-open", fops.clone());

    let file = CharDeviceFile::open(handle.devno(), OpenFlags::O_RDWR).unwrap();
    assert_eq!(fops.opens.load(Ordering::Relaxed), 1);
    assert_eq!(file.dev(), handle.devno());

    drop(file);
    assert_eq!(fops.releases.load(Ordering::Relaxed), 1);
}

#[test]
fn test_failed_open_does_not_release() {
    let fops = Arc::new(CountingFops::failing());
    let handle = register("sess-fail", fops.clone());

    let err = CharDeviceFile::open(handle.devno(), OpenFlags::O_RDWR).unwrap_err();
    assert_eq!(err, ChrdevError::NoMemory);
    assert_eq!(fops.releases.load(Ordering::Relaxed), 0);
}

#[test]
fn test_read_write_roundtrip_offsets() {
    let fops = Arc::new(CountingFops::new());
    let handle = register("sess-rw", fops);

    let file = CharDeviceFile::open(handle.devno(), OpenFlags::O_RDWR).unwrap();
    assert_eq!(file.write(b"ping").unwrap(), 4);
    assert_eq!(file.offset(), 4);

    let mut buf = [0u8; 8];
    let n = file.read(&mut buf).unwrap();
    assert_eq!(&buf[..n], b"pong");
    assert_eq!(file.offset(), 8);
}

#[test]
fn test_access_mode_is_enforced() {
    let fops = Arc::new(CountingFops::new());
    let handle = register("sess-mode", fops);

    let mut buf = [0u8; 4];

    let wronly = CharDeviceFile::open(handle.devno(), OpenFlags::O_WRONLY).unwrap();
    assert_eq!(wronly.read(&mut buf).unwrap_err(), ChrdevError::PermissionDenied);
    assert_eq!(wronly.write(b"x").unwrap(), 1);

    let rdonly = CharDeviceFile::open(handle.devno(), OpenFlags::O_RDONLY).unwrap();
    assert_eq!(rdonly.write(b"x").unwrap_err(), ChrdevError::PermissionDenied);
    assert!(rdonly.read(&mut buf).is_ok());
}

#[test]
fn test_unregister_hides_device() {
    let fops = Arc::new(CountingFops::new());
    let handle = register("sess-unreg", fops);
    let devno = handle.devno();

    drop(handle);
    let err = CharDeviceFile::open(devno, OpenFlags::O_RDWR).unwrap_err();
    assert_eq!(err, ChrdevError::NoDevice);
}
