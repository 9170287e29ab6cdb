//! 模块生命周期
//!
//! 驱动在宿主中的单一进入/退出对：加载时完成设备注册，
//! 卸载时按注册的逆序回收。卸载通过消费 `self` 表达
//! "只有加载成功才能卸载"的约束。

use core::fmt;

use alloc::sync::Arc;

use chrdev::{ChrdevOps, DeviceHandle, RegisterError, chrdev_ops};
use klog::{pr_alert, pr_info};

use crate::config::{CLASS_NAME, DEVICE_NAME, DriverConfig};
use crate::fops::EchoFileOps;

/// 已加载的驱动模块
///
/// 持有注册句柄与派发入口；drop 或显式 [`EchoModule::unload`]
/// 都会触发逆序回收。
pub struct EchoModule {
    config: DriverConfig,
    fops: Arc<EchoFileOps>,
    handle: DeviceHandle,
}

impl fmt::Debug for EchoModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EchoModule")
            .field("config", &self.config)
            .field("major", &self.handle.major())
            .field("devno", &self.handle.devno())
            .finish()
    }
}

impl EchoModule {
    /// 在全局设备模型上加载驱动
    pub fn load(config: DriverConfig) -> Result<Self, RegisterError> {
        Self::load_with(chrdev_ops(), config)
    }

    /// 在指定设备模型上加载驱动
    ///
    /// 注册失败时不留下任何部分状态（注册句柄保证回滚），
    /// 并把标记了失败阶段的错误传播给调用方。
    pub fn load_with(
        ops: &'static dyn ChrdevOps,
        config: DriverConfig,
    ) -> Result<Self, RegisterError> {
        pr_info!("Echo: hello {}!", config.display_name());

        let fops = Arc::new(EchoFileOps::new());
        match DeviceHandle::register_with(ops, DEVICE_NAME, CLASS_NAME, fops.clone()) {
            Ok(handle) => {
                pr_info!(
                    "EchoChar: registered correctly with major number {}",
                    handle.major()
                );
                Ok(Self {
                    config,
                    fops,
                    handle,
                })
            }
            Err(err) => {
                pr_alert!(
                    "EchoChar: failed to register device at the {} stage",
                    err.stage().as_str()
                );
                Err(err)
            }
        }
    }

    /// 卸载驱动，逆序回收设备注册
    pub fn unload(self) {
        pr_info!("Echo: goodbye {}!", self.config.display_name());
        // 注册句柄随 self 一起 drop，完成节点 → class → major 的回收
    }

    /// 分配到的 major 号
    pub fn major(&self) -> u32 {
        self.handle.major()
    }

    /// 设备节点的设备号
    pub fn devno(&self) -> u64 {
        self.handle.devno()
    }

    /// 驱动的文件操作处理器
    pub fn fops(&self) -> &Arc<EchoFileOps> {
        &self.fops
    }

    /// 加载期配置
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }
}
