//! 文件打开标志
//!
//! 与 Linux `open(2)` 的标志位布局保持一致。访问模式占最低两位，
//! 不是独立的位标志，因此通过 [`OpenFlags::access_mode`] 解码。

use bitflags::bitflags;

bitflags! {
    /// `open(2)` 风格的打开标志
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        /// 只写打开
        const O_WRONLY = 0o1;
        /// 读写打开
        const O_RDWR = 0o2;
        /// 不存在则创建
        const O_CREAT = 0o100;
        /// 截断
        const O_TRUNC = 0o1000;
        /// 追加写
        const O_APPEND = 0o2000;
        /// 非阻塞
        const O_NONBLOCK = 0o4000;
        /// exec 时关闭
        const O_CLOEXEC = 0o2000000;
    }
}

/// 访问模式掩码（最低两位）
pub const O_ACCMODE: u32 = 0o3;

impl OpenFlags {
    /// 只读打开（访问模式 0，不占位标志）
    pub const O_RDONLY: OpenFlags = OpenFlags::empty();

    /// 解码访问模式（`O_RDONLY` / `O_WRONLY` / `O_RDWR`）
    pub fn access_mode(&self) -> u32 {
        self.bits() & O_ACCMODE
    }

    /// 该打开方式是否允许读
    pub fn readable(&self) -> bool {
        matches!(self.access_mode(), 0o0 | 0o2)
    }

    /// 该打开方式是否允许写
    pub fn writable(&self) -> bool {
        matches!(self.access_mode(), 0o1 | 0o2)
    }
}
