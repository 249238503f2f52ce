//! 规则模块：负责规则目录的数据模型定义与加载
pub mod model;
pub mod loader;

// 导出核心接口
pub use self::model::{ProviderRecord, RuleCatalog};
pub use self::loader::RuleLoader;
