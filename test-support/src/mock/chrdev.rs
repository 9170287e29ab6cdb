//! 设备模型的 Mock 实现
//!
//! 带资源记账的 [`ChrdevOps`] 替身：记录每一次注册/回收事件，
//! 并支持按阶段注入失败，用于验证注册回滚不泄漏资源。

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicBool, Ordering};

use chrdev::{ChrdevError, ChrdevOps, ClassId, FileOps, major};
use sync::SpinLock;

/// Mock 设备模型产生的记账事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockEvent {
    /// major 号注册
    MajorRegistered(u32),
    /// major 号注销
    MajorUnregistered(u32),
    /// class 创建
    ClassCreated(u64),
    /// class 销毁
    ClassDestroyed(u64),
    /// 设备节点创建
    NodeCreated(u64),
    /// 设备节点销毁
    NodeDestroyed(u64),
}

struct MockState {
    next_major: u32,
    next_class: u64,
    majors: Vec<(u32, String, Arc<dyn FileOps>)>,
    classes: Vec<(u64, String)>,
    nodes: Vec<(u64, u64)>,
    events: Vec<MockEvent>,
}

/// 带记账的设备模型 Mock
///
/// 失败注入开关默认关闭；打开后对应阶段返回
/// [`ChrdevError::NoMemory`]，用于模拟资源分配失败。
pub struct MockChrdevModel {
    fail_major: AtomicBool,
    fail_class: AtomicBool,
    fail_node: AtomicBool,
    state: SpinLock<MockState>,
}

impl MockChrdevModel {
    /// 创建干净的 Mock 模型
    pub fn new() -> Self {
        Self {
            fail_major: AtomicBool::new(false),
            fail_class: AtomicBool::new(false),
            fail_node: AtomicBool::new(false),
            state: SpinLock::new(MockState {
                next_major: 240,
                next_class: 1,
                majors: Vec::new(),
                classes: Vec::new(),
                nodes: Vec::new(),
                events: Vec::new(),
            }),
        }
    }

    /// 让 major 分配阶段失败
    pub fn set_fail_major(&self, fail: bool) {
        self.fail_major.store(fail, Ordering::Release);
    }

    /// 让 class 创建阶段失败
    pub fn set_fail_class(&self, fail: bool) {
        self.fail_class.store(fail, Ordering::Release);
    }

    /// 让设备节点创建阶段失败
    pub fn set_fail_node(&self, fail: bool) {
        self.fail_node.store(fail, Ordering::Release);
    }

    /// 到目前为止的全部记账事件
    pub fn events(&self) -> Vec<MockEvent> {
        self.state.lock().events.clone()
    }

    /// 当前存活的 (major, class, node) 资源数量
    pub fn live_resources(&self) -> (usize, usize, usize) {
        let state = self.state.lock();
        (state.majors.len(), state.classes.len(), state.nodes.len())
    }

    /// 是否没有任何存活资源
    pub fn is_clean(&self) -> bool {
        self.live_resources() == (0, 0, 0)
    }
}

impl Default for MockChrdevModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ChrdevOps for MockChrdevModel {
    fn register_chrdev(&self, name: &str, fops: Arc<dyn FileOps>) -> Result<u32, ChrdevError> {
        if self.fail_major.load(Ordering::Acquire) {
            return Err(ChrdevError::NoMemory);
        }
        let mut state = self.state.lock();
        let major = state.next_major;
        state.next_major += 1;
        state.majors.push((major, String::from(name), fops));
        state.events.push(MockEvent::MajorRegistered(major));
        Ok(major)
    }

    fn unregister_chrdev(&self, major: u32, _name: &str) {
        let mut state = self.state.lock();
        state.majors.retain(|(m, _, _)| *m != major);
        state.events.push(MockEvent::MajorUnregistered(major));
    }

    fn class_create(&self, name: &str) -> Result<ClassId, ChrdevError> {
        if self.fail_class.load(Ordering::Acquire) {
            return Err(ChrdevError::NoMemory);
        }
        let mut state = self.state.lock();
        let id = state.next_class;
        state.next_class += 1;
        state.classes.push((id, String::from(name)));
        state.events.push(MockEvent::ClassCreated(id));
        Ok(ClassId(id))
    }

    fn class_destroy(&self, class: ClassId) {
        let mut state = self.state.lock();
        state.classes.retain(|(id, _)| *id != class.0);
        state.events.push(MockEvent::ClassDestroyed(class.0));
    }

    fn device_create(&self, class: ClassId, dev: u64, _name: &str) -> Result<(), ChrdevError> {
        if self.fail_node.load(Ordering::Acquire) {
            return Err(ChrdevError::NoMemory);
        }
        let mut state = self.state.lock();
        if !state.classes.iter().any(|(id, _)| *id == class.0) {
            return Err(ChrdevError::InvalidArgument);
        }
        if state.nodes.iter().any(|(d, _)| *d == dev) {
            return Err(ChrdevError::AlreadyExists);
        }
        state.nodes.push((dev, class.0));
        state.events.push(MockEvent::NodeCreated(dev));
        Ok(())
    }

    fn device_destroy(&self, class: ClassId, dev: u64) {
        let mut state = self.state.lock();
        state.nodes.retain(|(d, c)| !(*d == dev && *c == class.0));
        state.events.push(MockEvent::NodeDestroyed(dev));
    }

    fn get_chrdev_driver(&self, dev: u64) -> Option<Arc<dyn FileOps>> {
        let state = self.state.lock();
        let maj = major(dev);
        state
            .majors
            .iter()
            .find(|(m, _, _)| *m == maj)
            .map(|(_, _, fops)| fops.clone())
    }
}
