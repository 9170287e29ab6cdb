//! 设备模型操作 trait 定义和注册
//!
//! 此模块定义了设备注册层需要的宿主设备模型接口，通过 trait 抽象
//! 实现与具体模型（内存模型、测试 mock）的解耦。

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ChrdevError;
use crate::file::FileOps;

/// 设备 class 的不透明句柄
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassId(pub u64);

/// 宿主设备模型操作
///
/// 此 trait 抽象了字符设备注册所需的设备模型原语。
/// 宿主侧（驱动 crate 的 `ops_impl`）需要实现此 trait 并在启动时注册。
pub trait ChrdevOps: Send + Sync {
    /// 注册字符设备：自动分配一个 major 号并绑定派发入口
    fn register_chrdev(&self, name: &str, fops: Arc<dyn FileOps>) -> Result<u32, ChrdevError>;

    /// 注销字符设备，释放 major 号
    fn unregister_chrdev(&self, major: u32, name: &str);

    /// 创建设备 class
    fn class_create(&self, name: &str) -> Result<ClassId, ChrdevError>;

    /// 销毁设备 class
    fn class_destroy(&self, class: ClassId);

    /// 在 class 下创建设备节点
    fn device_create(&self, class: ClassId, dev: u64, name: &str) -> Result<(), ChrdevError>;

    /// 销毁设备节点
    fn device_destroy(&self, class: ClassId, dev: u64);

    /// 按设备号查找已注册的派发入口
    fn get_chrdev_driver(&self, dev: u64) -> Option<Arc<dyn FileOps>>;
}

// ========== ChrdevOps 注册 ==========

static CHRDEV_OPS_DATA: AtomicUsize = AtomicUsize::new(0);
static CHRDEV_OPS_VTABLE: AtomicUsize = AtomicUsize::new(0);

/// 注册设备模型实现
///
/// # Safety
/// 必须在并发使用开始之前调用，且只能调用一次
pub unsafe fn register_chrdev_ops(ops: &'static dyn ChrdevOps) {
    let ptr = ops as *const dyn ChrdevOps;
    // SAFETY: 将 fat pointer 拆分为 data 和 vtable 两部分存储
    let (data, vtable) =
        unsafe { core::mem::transmute::<*const dyn ChrdevOps, (usize, usize)>(ptr) };
    CHRDEV_OPS_DATA.store(data, Ordering::Release);
    CHRDEV_OPS_VTABLE.store(vtable, Ordering::Release);
}

/// 获取已注册的设备模型实现
///
/// # Panics
/// 如果尚未调用 [`register_chrdev_ops`] 注册实现，则 panic
#[inline]
pub fn chrdev_ops() -> &'static dyn ChrdevOps {
    let data = CHRDEV_OPS_DATA.load(Ordering::Acquire);
    let vtable = CHRDEV_OPS_VTABLE.load(Ordering::Acquire);
    if data == 0 {
        panic!("chrdev: ChrdevOps not registered");
    }
    // SAFETY: 重组 fat pointer
    unsafe { &*core::mem::transmute::<(usize, usize), *const dyn ChrdevOps>((data, vtable)) }
}

/// 按设备号查找字符设备驱动
pub fn get_chrdev_driver(dev: u64) -> Option<Arc<dyn FileOps>> {
    chrdev_ops().get_chrdev_driver(dev)
}
