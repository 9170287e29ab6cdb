//! 测试支持 crate
//!
//! 提供设备模型的 Mock 实现和测试工具

#![no_std]

extern crate alloc;

pub mod mock;

pub use mock::{MockChrdevModel, MockEvent};
