//! 静态配置
//!
//! 启动时从配置文件与环境变量加载，运行期只读。

#[path = "impl.rs"]
mod loader;
mod structs;

pub use structs::*;
