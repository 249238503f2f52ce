//! Provider模块：站点规则集合与有序注册表
pub mod pattern_set;
pub mod provider;
pub mod registry;

pub use self::pattern_set::PatternSet;
pub use self::provider::Provider;
pub use self::registry::ProviderRegistry;
