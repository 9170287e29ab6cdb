//! 读写自旋锁实现
//!
//! 允许多个读者或单个写者并发访问。写者优先级不做保证，
//! 适用于注册表这类"初始化阶段写、运行期几乎只读"的数据。

use core::{
    hint,
    sync::atomic::{AtomicUsize, Ordering},
};

/// 写者占用标志位（最高位），低位为读者计数。
const WRITER: usize = 1 << (usize::BITS - 1);

/// 原始读写自旋锁。
///
/// 状态字编码：最高位表示写者占用，其余位为活跃读者计数。
#[derive(Debug)]
pub struct RawRwSpinLock {
    state: AtomicUsize,
}

impl RawRwSpinLock {
    /// 创建一个新的未锁定实例。
    pub const fn new() -> Self {
        RawRwSpinLock {
            state: AtomicUsize::new(0),
        }
    }
}

impl Default for RawRwSpinLock {
    fn default() -> Self {
        Self::new()
    }
}

// Safety: 读者计数与写者标志共用一个原子状态字，
// 所有转换均为 CAS 或配对的加减，不存在撕裂状态。
unsafe impl lock_api::RawRwLock for RawRwSpinLock {
    const INIT: RawRwSpinLock = RawRwSpinLock::new();

    type GuardMarker = lock_api::GuardSend;

    fn lock_shared(&self) {
        while !self.try_lock_shared() {
            while self.state.load(Ordering::Relaxed) & WRITER != 0 {
                hint::spin_loop();
            }
        }
    }

    fn try_lock_shared(&self) -> bool {
        let state = self.state.load(Ordering::Relaxed);
        if state & WRITER != 0 {
            return false;
        }
        self.state
            .compare_exchange(state, state + 1, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_shared(&self) {
        self.state.fetch_sub(1, Ordering::Release);
    }

    fn lock_exclusive(&self) {
        while !self.try_lock_exclusive() {
            while self.state.load(Ordering::Relaxed) != 0 {
                hint::spin_loop();
            }
        }
    }

    fn try_lock_exclusive(&self) -> bool {
        self.state
            .compare_exchange(0, WRITER, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock_exclusive(&self) {
        self.state.store(0, Ordering::Release);
    }
}

/// 读写锁，允许多读单写。
///
/// `new` 是 const fn，可直接用于 static。
pub type RwLock<T> = lock_api::RwLock<RawRwSpinLock, T>;

/// 读守卫。
pub type RwLockReadGuard<'a, T> = lock_api::RwLockReadGuard<'a, RawRwSpinLock, T>;

/// 写守卫。
pub type RwLockWriteGuard<'a, T> = lock_api::RwLockWriteGuard<'a, RawRwSpinLock, T>;
