//! 日志系统核心实现
//!
//! 该模块将日志状态和逻辑封装到一个单独的 [`LogCore`] 结构体中，
//! 既可以作为全局单例，也可以独立实例化用于测试。

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::buffer::LogRingBuffer;
use crate::config::{DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL};
use crate::entry::LogEntry;
use crate::level::LogLevel;

/// 核心日志系统
///
/// 封装了环形缓冲区和两级过滤状态（全局级别、控制台级别）。
///
/// # 线程安全性
///
/// 级别阈值用原子操作维护，缓冲区自带同步，
/// 整个结构体可在线程间安全共享。
pub struct LogCore {
    buffer: LogRingBuffer,

    /// 全局日志级别阈值（控制日志是否缓冲）
    global_level: AtomicU8,

    /// 控制台输出级别阈值（控制是否立即打印）
    console_level: AtomicU8,
}

impl LogCore {
    /// 使用默认日志级别创建实例
    ///
    /// const fn，可用于 static 的零开销初始化。
    ///
    /// # 示例
    ///
    /// ```
    /// use klog::LogCore;
    ///
    /// static GLOBAL_LOG: LogCore = LogCore::default();
    /// let _ = &GLOBAL_LOG;
    /// ```
    pub const fn default() -> Self {
        Self {
            buffer: LogRingBuffer::new(),
            global_level: AtomicU8::new(DEFAULT_LOG_LEVEL as u8),
            console_level: AtomicU8::new(DEFAULT_CONSOLE_LEVEL as u8),
        }
    }

    /// 使用自定义日志级别创建实例（测试时常用）
    ///
    /// # 示例
    ///
    /// ```
    /// use klog::{LogCore, LogLevel};
    ///
    /// let _test_log = LogCore::new(LogLevel::Debug, LogLevel::Warning);
    /// ```
    pub fn new(global_level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: LogRingBuffer::new(),
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
        }
    }

    /// 核心日志记录实现
    ///
    /// 1. 按全局级别过滤
    /// 2. 就地构造条目（栈分配）
    /// 3. 写入环形缓冲区
    /// 4. 达到控制台级别时立即打印
    pub fn _log(&self, level: LogLevel, args: fmt::Arguments) {
        if !self.is_level_enabled(level) {
            return;
        }

        let entry = LogEntry::from_args(level, args);
        self.buffer.write(&entry);

        if self.is_console_level(level) {
            self.direct_print_entry(&entry);
        }
    }

    /// 从缓冲区读取下一个日志条目，无可用条目时返回 None
    pub fn _read_log(&self) -> Option<LogEntry> {
        self.buffer.read()
    }

    /// 返回未读日志条目的数量
    pub fn _log_len(&self) -> usize {
        self.buffer.len()
    }

    /// 返回由于缓冲区满而丢弃的日志计数
    pub fn _log_dropped_count(&self) -> usize {
        self.buffer.dropped_count()
    }

    /// 设置全局日志级别阈值，级别数值大于阈值的日志被丢弃
    pub fn _set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// 获取当前全局日志级别
    pub fn _get_global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Acquire))
    }

    /// 设置控制台输出级别阈值
    pub fn _set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// 获取当前控制台输出级别
    pub fn _get_console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    // ========== 内部辅助函数 ==========

    #[inline(always)]
    fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Acquire)
    }

    #[inline(always)]
    fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Acquire)
    }

    /// 将条目格式化后交给已注册的输出立即打印
    ///
    /// 未注册 [`crate::LogOutput`] 时为 no-op。
    fn direct_print_entry(&self, entry: &LogEntry) {
        use alloc::format;

        if let Some(output) = crate::get_log_output() {
            let formatted = format!("[{:<6}] {}\n", entry.level().as_str(), entry.message());
            output.write_str(&formatted);
        }
    }
}
