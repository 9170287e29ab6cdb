//! 驱动加载期配置

use alloc::string::{String, ToString};

/// 设备节点名
pub const DEVICE_NAME: &str = "echochar";

/// 设备 class 名
pub const CLASS_NAME: &str = "echo";

/// 默认显示名（相当于模块参数的默认值）
pub const DEFAULT_DISPLAY_NAME: &str = "echoChar";

/// 会话缓冲区容量（字节）
pub const MESSAGE_CAPACITY: usize = 256;

/// 加载期配置，加载后只读
///
/// 显示名仅用于加载/卸载时的两条日志，不参与任何数据路径，
/// 除存在性外不做校验。
#[derive(Debug, Clone)]
pub struct DriverConfig {
    display_name: String,
}

impl DriverConfig {
    /// 用指定显示名构造配置
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    /// 显示名
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
        }
    }
}
