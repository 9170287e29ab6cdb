//! 字符设备文件对象
//!
//! 一次 open/release 会话的显式载体：构造时按设备号查找派发入口
//! 并调用驱动的 `open`，drop 时调用 `release`。会话状态（偏移量、
//! 打开标志）由文件对象自身持有，不落在任何全局作用域。

use core::fmt;

use alloc::sync::Arc;
use sync::SpinLock;
use uapi::fcntl::OpenFlags;

use crate::error::ChrdevError;
use crate::file::FileOps;
use crate::ops::get_chrdev_driver;

/// 字符设备文件
pub struct CharDeviceFile {
    /// 设备号
    dev: u64,

    /// 派发入口（缓存）
    driver: Arc<dyn FileOps>,

    /// 打开标志位
    flags: OpenFlags,

    /// 偏移量（字符设备通常忽略，但按接口约定维护）
    offset: SpinLock<u64>,
}

impl fmt::Debug for CharDeviceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharDeviceFile")
            .field("dev", &self.dev)
            .field("flags", &self.flags)
            .field("offset", &self.offset())
            .finish()
    }
}

impl CharDeviceFile {
    /// 打开设备号对应的字符设备，建立会话
    ///
    /// 设备号没有对应驱动时返回 [`ChrdevError::NoDevice`]；
    /// 驱动 `open` 失败时原样传播，不建立会话。
    pub fn open(dev: u64, flags: OpenFlags) -> Result<Self, ChrdevError> {
        let driver = get_chrdev_driver(dev).ok_or(ChrdevError::NoDevice)?;
        driver.open()?;

        Ok(Self {
            dev,
            driver,
            flags,
            offset: SpinLock::new(0),
        })
    }

    /// 设备号
    pub fn dev(&self) -> u64 {
        self.dev
    }

    /// 打开标志
    pub fn flags(&self) -> OpenFlags {
        self.flags
    }

    /// 该会话是否允许读
    pub fn readable(&self) -> bool {
        self.flags.readable()
    }

    /// 该会话是否允许写
    pub fn writable(&self) -> bool {
        self.flags.writable()
    }

    /// 当前偏移量
    pub fn offset(&self) -> u64 {
        *self.offset.lock()
    }

    /// 从设备读取数据
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ChrdevError> {
        if !self.readable() {
            return Err(ChrdevError::PermissionDenied);
        }
        let mut offset = self.offset.lock();
        self.driver.read(buf, &mut *offset)
    }

    /// 向设备写入数据
    pub fn write(&self, buf: &[u8]) -> Result<usize, ChrdevError> {
        if !self.writable() {
            return Err(ChrdevError::PermissionDenied);
        }
        let mut offset = self.offset.lock();
        self.driver.write(buf, &mut *offset)
    }
}

impl Drop for CharDeviceFile {
    /// 会话结束，通知驱动释放会话期资源
    fn drop(&mut self) {
        self.driver.release();
    }
}
