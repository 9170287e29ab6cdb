//! 文件操作派发接口
//!
//! 驱动实现 [`FileOps`] 并随 major 注册进设备模型，
//! 设备模型按设备号把 open/read/write/release 派发到对应实现。
//! 所有已注册的派发入口以 `Arc<dyn FileOps>` 形式保存。

use crate::ChrdevError;

/// 字符设备驱动的文件操作接口
///
/// 四个入口对应字符设备派发表的四个回调。调用在派发线程上
/// 同步执行，驱动自行负责内部状态的互斥。
pub trait FileOps: Send + Sync {
    /// 打开设备，建立一次会话
    fn open(&self) -> Result<(), ChrdevError>;

    /// 从设备读取数据，返回写入 `buf` 的字节数（0 表示流结束）
    fn read(&self, buf: &mut [u8], offset: &mut u64) -> Result<usize, ChrdevError>;

    /// 向设备写入数据，返回消费的字节数
    fn write(&self, buf: &[u8], offset: &mut u64) -> Result<usize, ChrdevError>;

    /// 关闭会话，释放会话期资源
    fn release(&self);
}
