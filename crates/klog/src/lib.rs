//! 驱动日志子系统
//!
//! 该模块提供一个 **Linux 内核风格的日志系统**：`pr_info!` / `pr_alert!`
//! 等宏按 printk 级别记录消息，消息进入固定容量的环形缓冲区，
//! 并可选地即时输出到已注册的控制台。
//!
//! # 组件
//!
//! - 环形缓冲区 - 日志存储（缓冲区满时丢弃新条目并计数）
//! - [`LogLevel`] - 日志级别定义（从 Emergency 到 Debug）
//! - [`LogEntry`] - 日志条目，消息按固定长度就地存储
//! - [`macros`] - 面向用户的日志宏 (`pr_info!`, `pr_alert!`, 等)
//!
//! # 双输出策略
//!
//! 1. **环形缓冲区存储**：达到全局级别阈值（默认 Info 及以上）的日志
//!    写入缓冲区，供消费端（例如测试）通过 [`read_log`] 取出。
//! 2. **即时控制台输出**：达到控制台级别阈值（默认 Warning 及以上）的
//!    日志同时交给已注册的 [`LogOutput`] 立即打印。
//!
//! 控制台输出是可选的：未注册 [`LogOutput`] 时只做缓冲。

#![no_std]

extern crate alloc;

mod buffer;
mod config;
mod entry;
mod level;
mod log_core;
pub mod macros;

pub use config::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH,
};
pub use entry::LogEntry;
pub use level::LogLevel;
pub use log_core::LogCore;

use core::sync::atomic::{AtomicUsize, Ordering};

// ========== Trait 定义 ==========

/// 日志输出 trait
///
/// 实现此 trait 以提供日志的控制台输出能力。
/// 使用方需要在启动时通过 [`register_log_output`] 注册实现。
pub trait LogOutput: Send + Sync {
    /// 输出字符串到控制台
    fn write_str(&self, s: &str);
}

// ========== 全局注册机制 ==========

static LOG_OUTPUT_DATA: AtomicUsize = AtomicUsize::new(0);
static LOG_OUTPUT_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册日志输出
///
/// # Safety
///
/// - output 必须具有 `'static` 生命周期
/// - 只能调用一次，且必须在并发日志调用开始之前
pub unsafe fn register_log_output(output: &'static dyn LogOutput) {
    let ptr = output as *const dyn LogOutput;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    let (data, vtable) =
        unsafe { core::mem::transmute::<*const dyn LogOutput, (usize, usize)>(ptr) };
    LOG_OUTPUT_DATA.store(data, Ordering::Release);
    LOG_OUTPUT_VTABLE.store(vtable, Ordering::Release);
}

/// 获取已注册的日志输出，未注册时返回 None
pub(crate) fn get_log_output() -> Option<&'static dyn LogOutput> {
    let data = LOG_OUTPUT_DATA.load(Ordering::Acquire);
    let vtable = LOG_OUTPUT_VTABLE.load(Ordering::Acquire);
    if data == 0 || vtable == 0 {
        return None;
    }
    // SAFETY: 指针由 register_log_output 设置，保证有效
    Some(unsafe { &*core::mem::transmute::<(usize, usize), *const dyn LogOutput>((data, vtable)) })
}

// ========== 全局单例 ==========

/// 全局日志系统实例
///
/// 使用 const fn 在编译时初始化。所有日志宏和公共 API 都委托给此实例。
static GLOBAL_LOG: LogCore = LogCore::default();

// ========== 公共 API (精简封装) ==========

/// 核心日志实现（由宏调用）
#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments) {
    GLOBAL_LOG._log(level, args);
}

/// 检查日志级别是否启用（由宏调用）
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    level as u8 <= GLOBAL_LOG._get_global_level() as u8
}

/// 从缓冲区读取下一个日志条目
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG._read_log()
}

/// 返回未读日志条目的数量
pub fn log_len() -> usize {
    GLOBAL_LOG._log_len()
}

/// 返回因缓冲区满而被丢弃的日志计数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG._log_dropped_count()
}

/// 设置全局日志级别阈值
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG._set_global_level(level);
}

/// 获取当前全局日志级别
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG._get_global_level()
}

/// 设置控制台输出级别阈值
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG._set_console_level(level);
}

/// 获取当前控制台输出级别
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG._get_console_level()
}

#[cfg(test)]
mod tests;
