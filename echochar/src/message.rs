//! 会话缓冲区
//!
//! 固定容量的可变字节存储，随会话打开分配、会话关闭释放。
//! 内容只整体覆盖，不追加。

use alloc::vec::Vec;

use chrdev::ChrdevError;

/// 固定容量的消息缓冲区
///
/// 同一时刻最多存在一个活跃分配（驱动只支持单会话），
/// 释放由所有权自然完成。
pub struct MessageBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl MessageBuffer {
    /// 分配指定容量的缓冲区
    ///
    /// 分配失败返回 [`ChrdevError::NoMemory`]，不 panic。
    pub fn allocate(capacity: usize) -> Result<Self, ChrdevError> {
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)
            .map_err(|_| ChrdevError::NoMemory)?;
        Ok(Self { data, capacity })
    }

    /// 整体覆盖缓冲区内容
    ///
    /// 超出容量时返回 [`ChrdevError::NoSpace`]，且原内容保持不变。
    pub fn overwrite(&mut self, content: &[u8]) -> Result<(), ChrdevError> {
        if content.len() > self.capacity {
            return Err(ChrdevError::NoSpace);
        }
        self.data.clear();
        self.data.extend_from_slice(content);
        Ok(())
    }

    /// 当前内容
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// 当前内容长度
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 缓冲区容量
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
