//! 设备注册句柄
//!
//! 把 major 分配、class 创建、设备节点创建三个阶段收拢为一个
//! RAII 资源：构造时按序注册并在任一阶段失败时逆序回滚，
//! 析构时逆序回收，任何提前返回路径都不会泄漏设备模型资源。

use core::fmt;

use alloc::string::String;
use alloc::sync::Arc;

use crate::dev::makedev;
use crate::error::{RegisterError, RegisterStage};
use crate::file::FileOps;
use crate::ops::{ChrdevOps, ClassId, chrdev_ops};

/// 已注册设备的身份：major 号、class 句柄、设备节点号
///
/// 三部分作为一个整体创建和销毁。句柄被 drop 时按
/// 节点 → class → major 的顺序回收。
pub struct DeviceHandle {
    ops: &'static dyn ChrdevOps,
    major: u32,
    class: ClassId,
    devno: u64,
    device_name: String,
}

impl fmt::Debug for DeviceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceHandle")
            .field("major", &self.major)
            .field("class", &self.class)
            .field("devno", &self.devno)
            .field("device_name", &self.device_name)
            .finish()
    }
}

impl DeviceHandle {
    /// 在全局设备模型上注册设备
    ///
    /// 等价于 `register_with(chrdev_ops(), ...)`。
    pub fn register(
        device_name: &str,
        class_name: &str,
        fops: Arc<dyn FileOps>,
    ) -> Result<Self, RegisterError> {
        Self::register_with(chrdev_ops(), device_name, class_name, fops)
    }

    /// 在指定设备模型上注册设备
    ///
    /// 依次执行：major 号自动分配、class 创建、minor 0 的设备节点创建。
    /// 任一阶段失败时，先逆序回收此前完成的阶段，再返回标记了
    /// 失败阶段的 [`RegisterError`]。
    pub fn register_with(
        ops: &'static dyn ChrdevOps,
        device_name: &str,
        class_name: &str,
        fops: Arc<dyn FileOps>,
    ) -> Result<Self, RegisterError> {
        let major = ops
            .register_chrdev(device_name, fops)
            .map_err(|cause| RegisterError::new(RegisterStage::MajorNumber, cause))?;
        log::debug!("chrdev: {} registered with major {}", device_name, major);

        let class = match ops.class_create(class_name) {
            Ok(class) => class,
            Err(cause) => {
                ops.unregister_chrdev(major, device_name);
                return Err(RegisterError::new(RegisterStage::Class, cause));
            }
        };

        let devno = makedev(major, 0);
        if let Err(cause) = ops.device_create(class, devno, device_name) {
            ops.class_destroy(class);
            ops.unregister_chrdev(major, device_name);
            return Err(RegisterError::new(RegisterStage::Node, cause));
        }

        Ok(Self {
            ops,
            major,
            class,
            devno,
            device_name: String::from(device_name),
        })
    }

    /// 分配到的 major 号
    pub fn major(&self) -> u32 {
        self.major
    }

    /// class 句柄
    pub fn class(&self) -> ClassId {
        self.class
    }

    /// 设备节点的设备号（minor 固定为 0）
    pub fn devno(&self) -> u64 {
        self.devno
    }

    /// 设备名
    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for DeviceHandle {
    /// 逆序回收：设备节点 → class → major 号
    fn drop(&mut self) {
        self.ops.device_destroy(self.class, self.devno);
        self.ops.class_destroy(self.class);
        self.ops.unregister_chrdev(self.major, &self.device_name);
        log::debug!("chrdev: {} unregistered", self.device_name);
    }
}
