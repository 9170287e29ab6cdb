//! 日志存储的环形缓冲区
//!
//! 多生产者、单消费者。写入路径由内部微型自旋标志保护，
//! 缓冲区满时丢弃**新**条目并累加丢弃计数，保证已缓冲日志的
//! FIFO 顺序不被破坏。

use core::cell::UnsafeCell;
use core::hint;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::config::GLOBAL_LOG_BUFFER_SIZE;
use crate::entry::LogEntry;

/// 固定容量的日志环形缓冲区
pub(crate) struct LogRingBuffer {
    lock: AtomicBool,
    /// 读游标（单调递增，取模定位槽位）
    head: AtomicUsize,
    /// 写游标（单调递增，取模定位槽位）
    tail: AtomicUsize,
    dropped: AtomicUsize,
    slots: [UnsafeCell<Option<LogEntry>>; GLOBAL_LOG_BUFFER_SIZE],
}

// Safety: 槽位的读写都在 acquire/release 自旋标志的临界区内完成。
unsafe impl Sync for LogRingBuffer {}

impl LogRingBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            lock: AtomicBool::new(false),
            head: AtomicUsize::new(0),
            tail: AtomicUsize::new(0),
            dropped: AtomicUsize::new(0),
            slots: [const { UnsafeCell::new(None) }; GLOBAL_LOG_BUFFER_SIZE],
        }
    }

    fn acquire(&self) {
        while self
            .lock
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            hint::spin_loop();
        }
    }

    fn release(&self) {
        self.lock.store(false, Ordering::Release);
    }

    /// 写入一个条目；缓冲区满时丢弃并计数
    pub(crate) fn write(&self, entry: &LogEntry) {
        self.acquire();
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        if tail - head == GLOBAL_LOG_BUFFER_SIZE {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            self.release();
            return;
        }
        // SAFETY: 持有自旋标志，槽位独占访问
        unsafe {
            *self.slots[tail % GLOBAL_LOG_BUFFER_SIZE].get() = Some(*entry);
        }
        self.tail.store(tail + 1, Ordering::Relaxed);
        self.release();
    }

    /// 取出最旧的未读条目
    pub(crate) fn read(&self) -> Option<LogEntry> {
        self.acquire();
        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Relaxed);
        if head == tail {
            self.release();
            return None;
        }
        // SAFETY: 持有自旋标志，槽位独占访问
        let entry = unsafe { (*self.slots[head % GLOBAL_LOG_BUFFER_SIZE].get()).take() };
        self.head.store(head + 1, Ordering::Relaxed);
        self.release();
        entry
    }

    /// 未读条目数量
    pub(crate) fn len(&self) -> usize {
        self.acquire();
        let len = self.tail.load(Ordering::Relaxed) - self.head.load(Ordering::Relaxed);
        self.release();
        len
    }

    /// 累计丢弃条目数量
    pub(crate) fn dropped_count(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }
}
