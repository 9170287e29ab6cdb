//! EchoChar - 简单的回显字符设备驱动
//!
//! 驱动注册一个名为 `echochar` 的字符设备（class `echo`，
//! 内核分配 major，minor 固定为 0）。用户进程写入任意字节序列，
//! 驱动把写入内容格式化为 `"<文本>(<长度> letras)"` 存入 256 字节的
//! 会话缓冲区；读取端按约定总是返回流结束。
//!
//! # 模块
//!
//! - [`config`] - 加载期配置（显示名、设备名、缓冲区容量）
//! - [`message`] - 会话缓冲区 [`MessageBuffer`]
//! - [`fops`] - 文件操作处理器 [`EchoFileOps`]
//! - [`module`] - 模块生命周期 [`EchoModule`]
//! - [`ops_impl`] - 内存设备模型（[`chrdev::ChrdevOps`] 的宿主侧实现）

#![no_std]

extern crate alloc;

pub mod config;
pub mod fops;
pub mod message;
pub mod module;
pub mod ops_impl;

pub use config::DriverConfig;
pub use fops::EchoFileOps;
pub use message::MessageBuffer;
pub use module::EchoModule;
pub use ops_impl::init_chrdev_ops;

#[cfg(test)]
mod tests;
