//! 同步原语
//!
//! 向驱动各模块提供基本的锁原语，包括自旋锁和读写锁。
//! 锁的原始实现基于原子操作，守卫语义由 `lock_api` 提供。
//!
//! 驱动模型在宿主线程上同步执行，不涉及中断上下文，
//! 因此不需要中断保护层。

#![no_std]

mod raw_spin_lock;
mod rwlock;
mod spin_lock;

pub use raw_spin_lock::RawSpinLock;
pub use rwlock::{RawRwSpinLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use spin_lock::{SpinLock, SpinLockGuard};
