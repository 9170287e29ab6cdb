//! 驱动单元测试
//!
//! 针对各组件的独立实例，不触碰全局设备模型；
//! 完整链路由 `tests/driver.rs` 的集成测试覆盖。

mod fops;
mod message;
