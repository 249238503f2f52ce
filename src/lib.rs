//! rsclearurls - 基于规则目录的URL追踪参数清理引擎

// 导出全局错误类型
pub use self::error::{RsclearurlsError, RscResult};

// 导出配置模块
pub use self::config::{CleanerConfig, ConfigManager, CustomConfigBuilder};

// 导出规则模块核心接口
pub use self::rule::{ProviderRecord, RuleCatalog, RuleLoader};

// 导出编译模块核心接口
pub use self::compiler::{CompiledPattern, PatternKind, RuleCompiler};

// 导出Provider模块核心接口
pub use self::provider::{PatternSet, Provider, ProviderRegistry};

// 导出清理模块核心接口
pub use self::cleaner::{
    CleanLogger, CleanOutcome, HostClassifier, ReservedRangeClassifier, TracingLogger, UrlCleaner,
};

// 导出工具模块核心接口
pub use self::utils::{HashParams, Multimap, decode_url, encode_uri_component};

// 导出引擎接口
pub use self::engine::{CleanContext, CleanEngine, CleanResult};

// 声明所有子模块
pub mod config;
pub mod error;
pub mod rule;
pub mod compiler;
pub mod provider;
pub mod cleaner;
pub mod engine;
pub mod utils;

mod logging;
