//! 设备文件对象实现

mod char_dev_file;

pub use char_dev_file::CharDeviceFile;
