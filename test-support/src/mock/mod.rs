//! 设备模型相关的 Mock 实现

mod chrdev;

pub use chrdev::{MockChrdevModel, MockEvent};
