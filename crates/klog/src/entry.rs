//! 日志条目结构
//!
//! 条目在栈上就地构造，消息存入固定长度的内联数组，
//! 不依赖堆分配，因此在记录路径上不会因分配失败而丢日志。

use core::fmt;

use crate::config::MAX_LOG_MESSAGE_LENGTH;
use crate::level::LogLevel;

/// 单条日志条目
#[derive(Clone, Copy)]
pub struct LogEntry {
    level: LogLevel,
    len: usize,
    msg: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    /// 由 `format_args!` 的输出构造条目
    ///
    /// 超过 [`MAX_LOG_MESSAGE_LENGTH`] 的消息在 UTF-8 字符边界处
    /// 静默截断。
    pub fn from_args(level: LogLevel, args: fmt::Arguments<'_>) -> Self {
        let mut msg = [0u8; MAX_LOG_MESSAGE_LENGTH];
        let mut writer = EntryWriter {
            buf: &mut msg,
            len: 0,
        };
        // 截断由 writer 处理，fmt 层不会报错
        let _ = fmt::write(&mut writer, args);
        let len = writer.len;
        Self { level, len, msg }
    }

    /// 条目的级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 条目的消息文本
    pub fn message(&self) -> &str {
        // 写入端保证字符边界截断，这里的回退只是防御
        core::str::from_utf8(&self.msg[..self.len]).unwrap_or("")
    }
}

/// 向固定缓冲区写入并在字符边界截断的 fmt 适配器
struct EntryWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl fmt::Write for EntryWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let avail = self.buf.len() - self.len;
        let bytes = s.as_bytes();

        if bytes.len() <= avail {
            self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
            self.len += bytes.len();
            return Ok(());
        }

        // 只拷贝能放下的前缀，并退到字符边界
        let mut end = avail;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf[self.len..self.len + end].copy_from_slice(&bytes[..end]);
        self.len += end;
        Ok(())
    }
}
