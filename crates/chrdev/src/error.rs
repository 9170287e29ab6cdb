//! 设备模型错误类型
//!
//! 定义了与 POSIX 兼容的错误码，可通过 [`ChrdevError::to_errno()`]
//! 转换为系统调用错误码。

use uapi::errno;

/// 设备模型与驱动派发路径的错误类型
///
/// 各错误码对应标准 POSIX errno 值。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChrdevError {
    /// 内存或注册资源分配失败 (-ENOMEM)
    NoMemory,
    /// 设备正忙：会话已打开，或 major 区间耗尽 (-EBUSY)
    Busy,
    /// 设备不存在 (-ENODEV)
    NoDevice,
    /// 无效的文件句柄：会话缓冲区不存在 (-EBADF)
    BadFileDescriptor,
    /// 打开方式不允许该操作 (-EACCES)
    PermissionDenied,
    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 资源已存在 (-EEXIST)
    AlreadyExists,
    /// 写入超出设备缓冲区容量 (-ENOSPC)
    NoSpace,
    /// 操作不支持 (-ENOTSUP)
    NotSupported,
}

impl ChrdevError {
    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        let errno = match self {
            ChrdevError::NoMemory => errno::ENOMEM,
            ChrdevError::Busy => errno::EBUSY,
            ChrdevError::NoDevice => errno::ENODEV,
            ChrdevError::BadFileDescriptor => errno::EBADF,
            ChrdevError::PermissionDenied => errno::EACCES,
            ChrdevError::InvalidArgument => errno::EINVAL,
            ChrdevError::AlreadyExists => errno::EEXIST,
            ChrdevError::NoSpace => errno::ENOSPC,
            ChrdevError::NotSupported => errno::ENOTSUP,
        };
        -(errno as isize)
    }
}

/// 设备注册的三个阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterStage {
    /// major 号分配
    MajorNumber,
    /// 设备 class 创建
    Class,
    /// 设备节点创建
    Node,
}

impl RegisterStage {
    /// 阶段名（用于日志）
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterStage::MajorNumber => "major number",
            RegisterStage::Class => "class",
            RegisterStage::Node => "device node",
        }
    }
}

/// 设备注册失败，标记失败阶段与底层原因
///
/// 返回该错误时，早先阶段占用的资源已经全部逆序回收。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterError {
    stage: RegisterStage,
    cause: ChrdevError,
}

impl RegisterError {
    /// 构造指定阶段的注册错误
    pub fn new(stage: RegisterStage, cause: ChrdevError) -> Self {
        Self { stage, cause }
    }

    /// 失败的注册阶段
    pub fn stage(&self) -> RegisterStage {
        self.stage
    }

    /// 底层错误
    pub fn cause(&self) -> ChrdevError {
        self.cause
    }

    /// 转换为系统调用错误码（负数）
    pub fn to_errno(&self) -> isize {
        self.cause.to_errno()
    }
}
