//! 引擎模块：按注册表顺序调度清理流程
pub mod engine;
pub mod result;

// 导出核心接口
pub use self::engine::CleanEngine;
pub use self::result::{CleanContext, CleanResult};
