//! LogCore 单元测试
//!
//! 这些测试针对独立实例化的 [`crate::LogCore`]，不触碰全局单例，
//! 全局宏与注册机制由 `tests/macros.rs` 的集成测试覆盖。

/// Test-only logging helper (mirrors production macro behavior, but targets a local `LogCore`).
macro_rules! test_log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger._log($level, format_args!($($arg)*))
    };
}

mod basic;
