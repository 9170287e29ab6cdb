//! ChrdevOps trait 实现
//!
//! 宿主侧的内存设备模型：维护 major、class、设备节点三张表，
//! 为设备注册层提供真实的分配/回收语义。

use alloc::string::String;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use chrdev::dev::chrdev_major;
use chrdev::{ChrdevError, ChrdevOps, ClassId, FileOps, major};
use hashbrown::HashMap;
use lazy_static::lazy_static;
use sync::RwLock;

struct MajorEntry {
    name: String,
    fops: Arc<dyn FileOps>,
}

struct NodeEntry {
    class: ClassId,
    #[allow(dead_code)]
    name: String,
}

struct ModelTables {
    majors: HashMap<u32, MajorEntry>,
    classes: HashMap<ClassId, String>,
    nodes: HashMap<u64, NodeEntry>,
    next_class_id: u64,
}

/// 内存设备模型
///
/// major 从动态区间自上而下分配；class 和设备节点查重后登记。
/// 表的写操作只发生在注册/回收路径，运行期派发只读。
pub struct ChrdevModel {
    tables: RwLock<ModelTables>,
}

impl ChrdevModel {
    fn new() -> Self {
        Self {
            tables: RwLock::new(ModelTables {
                majors: HashMap::new(),
                classes: HashMap::new(),
                nodes: HashMap::new(),
                next_class_id: 1,
            }),
        }
    }

    /// 当前已注册的 major 数量（诊断用）
    pub fn registered_majors(&self) -> usize {
        self.tables.read().majors.len()
    }
}

impl ChrdevOps for ChrdevModel {
    fn register_chrdev(&self, name: &str, fops: Arc<dyn FileOps>) -> Result<u32, ChrdevError> {
        let mut tables = self.tables.write();
        let major = (chrdev_major::DYN_MIN..=chrdev_major::DYN_MAX)
            .rev()
            .find(|candidate| !tables.majors.contains_key(candidate))
            .ok_or(ChrdevError::Busy)?;
        tables.majors.insert(
            major,
            MajorEntry {
                name: String::from(name),
                fops,
            },
        );
        Ok(major)
    }

    fn unregister_chrdev(&self, major: u32, name: &str) {
        let mut tables = self.tables.write();
        if tables
            .majors
            .get(&major)
            .is_some_and(|entry| entry.name == name)
        {
            tables.majors.remove(&major);
        }
    }

    fn class_create(&self, name: &str) -> Result<ClassId, ChrdevError> {
        let mut tables = self.tables.write();
        if tables.classes.values().any(|existing| existing == name) {
            return Err(ChrdevError::AlreadyExists);
        }
        let id = ClassId(tables.next_class_id);
        tables.next_class_id += 1;
        tables.classes.insert(id, String::from(name));
        Ok(id)
    }

    fn class_destroy(&self, class: ClassId) {
        self.tables.write().classes.remove(&class);
    }

    fn device_create(&self, class: ClassId, dev: u64, name: &str) -> Result<(), ChrdevError> {
        let mut tables = self.tables.write();
        if !tables.classes.contains_key(&class) {
            return Err(ChrdevError::InvalidArgument);
        }
        if tables.nodes.contains_key(&dev) {
            return Err(ChrdevError::AlreadyExists);
        }
        tables.nodes.insert(
            dev,
            NodeEntry {
                class,
                name: String::from(name),
            },
        );
        Ok(())
    }

    fn device_destroy(&self, class: ClassId, dev: u64) {
        let mut tables = self.tables.write();
        if tables
            .nodes
            .get(&dev)
            .is_some_and(|node| node.class == class)
        {
            tables.nodes.remove(&dev);
        }
    }

    fn get_chrdev_driver(&self, dev: u64) -> Option<Arc<dyn FileOps>> {
        let tables = self.tables.read();
        tables.majors.get(&major(dev)).map(|entry| entry.fops.clone())
    }
}

lazy_static! {
    /// 全局设备模型实例
    pub static ref CHRDEV_MODEL: ChrdevModel = ChrdevModel::new();
}

static OPS_REGISTERED: AtomicBool = AtomicBool::new(false);

/// 把内存设备模型注册为全局 [`ChrdevOps`] 实现
///
/// 幂等：重复调用只生效一次。
pub fn init_chrdev_ops() {
    if OPS_REGISTERED.swap(true, Ordering::AcqRel) {
        return;
    }
    // SAFETY: 通过 OPS_REGISTERED 保证只注册一次，且实例为 'static
    unsafe {
        chrdev::register_chrdev_ops(&*CHRDEV_MODEL);
    }
}
