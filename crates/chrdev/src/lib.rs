//! 字符设备模型层
//!
//! 此 crate 提供字符设备驱动与宿主设备模型之间的抽象，包括：
//!
//! - [`FileOps`] trait - 驱动侧的文件操作派发接口
//! - [`ChrdevOps`] trait - 宿主侧的设备模型接口（major 分配、class、设备节点）
//! - [`DeviceHandle`] - 三段式设备注册与逆序回收的 RAII 句柄
//! - [`CharDeviceFile`] - 一次 open/release 会话的文件对象
//! - 设备号编码 ([`makedev`] / [`major`] / [`minor`])
//!
//! # 架构解耦
//!
//! 设备模型通过 trait 抽象与驱动 crate 解耦：
//! 使用前必须调用 [`register_chrdev_ops`] 注册实现。

#![no_std]

extern crate alloc;

pub mod dev;
pub mod error;
pub mod file;
pub mod impls;
pub mod ops;

mod handle;

// Re-export ops
pub use ops::{ChrdevOps, ClassId, chrdev_ops, get_chrdev_driver, register_chrdev_ops};

// Re-export error
pub use error::{ChrdevError, RegisterError, RegisterStage};

// Re-export dev
pub use dev::{major, makedev, minor};

// Re-export file
pub use file::FileOps;

// Re-export handle
pub use handle::DeviceHandle;

// Re-export impls
pub use impls::CharDeviceFile;

// Re-export uapi types for convenience
pub use uapi::fcntl::OpenFlags;
