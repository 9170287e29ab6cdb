//! 文件操作处理器
//!
//! 实现字符设备派发表需要的四个入口。会话状态是一个
//! `SpinLock<Option<MessageBuffer>>` 槽位：`open` 占用、`release`
//! 清空，`Some`/`None` 即 Active/Closed 两个会话状态。

use alloc::format;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

use chrdev::{ChrdevError, FileOps};
use klog::pr_info;
use sync::SpinLock;

use crate::config::MESSAGE_CAPACITY;
use crate::message::MessageBuffer;

/// 回显设备的文件操作处理器
pub struct EchoFileOps {
    /// 会话槽位：`Some` 表示有一个活跃会话持有缓冲区
    session: SpinLock<Option<MessageBuffer>>,

    /// 历史打开次数（跨会话累计）
    open_count: AtomicUsize,
}

impl EchoFileOps {
    /// 创建处理器，初始为无会话状态
    pub const fn new() -> Self {
        Self {
            session: SpinLock::new(None),
            open_count: AtomicUsize::new(0),
        }
    }

    /// 历史打开次数
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::Relaxed)
    }

    /// 当前会话缓冲区内容的快照（诊断用）
    ///
    /// 无活跃会话时返回 `None`。注意缓冲区内容不经由 `read`
    /// 暴露给用户进程，这里只是宿主侧的观测口。
    pub fn message_snapshot(&self) -> Option<Vec<u8>> {
        let session = self.session.lock();
        session.as_ref().map(|buffer| {
            let mut snapshot = Vec::with_capacity(buffer.len());
            snapshot.extend_from_slice(buffer.as_bytes());
            snapshot
        })
    }

    /// 当前会话缓冲区的容量，无会话时返回 `None`
    pub fn buffer_capacity(&self) -> Option<usize> {
        self.session.lock().as_ref().map(MessageBuffer::capacity)
    }
}

impl Default for EchoFileOps {
    fn default() -> Self {
        Self::new()
    }
}

impl FileOps for EchoFileOps {
    /// 建立会话：分配消息缓冲区
    ///
    /// 已有活跃会话时返回 [`ChrdevError::Busy`]；
    /// 缓冲区分配失败时返回 [`ChrdevError::NoMemory`]，不建立会话。
    fn open(&self) -> Result<(), ChrdevError> {
        let mut session = self.session.lock();
        if session.is_some() {
            return Err(ChrdevError::Busy);
        }

        let buffer = MessageBuffer::allocate(MESSAGE_CAPACITY)?;
        *session = Some(buffer);

        let count = self.open_count.fetch_add(1, Ordering::Relaxed) + 1;
        pr_info!("EchoChar: device has been opened {} time(s)", count);
        Ok(())
    }

    /// 读取：总是报告流结束
    ///
    /// 回显内容只进不出，缓冲区不经由读端暴露；
    /// 与偏移量、请求长度和缓冲区内容都无关。
    fn read(&self, _buf: &mut [u8], _offset: &mut u64) -> Result<usize, ChrdevError> {
        Ok(0)
    }

    /// 写入：整体覆盖缓冲区为 `"<文本>(<长度> letras)"`
    ///
    /// 文本部分按 C 字符串语义在第一个 NUL 处截断，长度计数
    /// 仍为完整输入长度。格式化结果超出缓冲区容量时返回
    /// [`ChrdevError::NoSpace`]，缓冲区内容保持不变。
    /// 返回值为格式化后的字节数。
    fn write(&self, buf: &[u8], _offset: &mut u64) -> Result<usize, ChrdevError> {
        let mut session = self.session.lock();
        let message = session.as_mut().ok_or(ChrdevError::BadFileDescriptor)?;

        let text = text_fragment(buf);
        let suffix = format!("({} letras)", buf.len());
        let formatted_len = text.len() + suffix.len();

        let mut formatted = Vec::with_capacity(formatted_len);
        formatted.extend_from_slice(text);
        formatted.extend_from_slice(suffix.as_bytes());

        message.overwrite(&formatted)?;

        pr_info!("EchoChar: received {} characters from the user", formatted_len);
        Ok(formatted_len)
    }

    /// 结束会话：释放消息缓冲区
    ///
    /// 没有活跃会话（例如 open 失败后的 release）时保持 no-op。
    fn release(&self) {
        let mut session = self.session.lock();
        if session.take().is_some() {
            pr_info!("EchoChar: device successfully closed");
        }
    }
}

/// 输入的 C 字符串文本片段：到第一个 NUL 为止
fn text_fragment(data: &[u8]) -> &[u8] {
    match data.iter().position(|&b| b == 0) {
        Some(pos) => &data[..pos],
        None => data,
    }
}
