//! 与用户空间共用的定义和声明
//!
//! 包含错误码常量和文件打开标志，确保驱动和调用方的一致性

#![no_std]
#![allow(dead_code)]

pub mod errno;
pub mod fcntl;
