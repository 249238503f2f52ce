//! 清理模块：字段清理算法、本地地址判定与日志接口
pub mod local_host;
pub mod logger;
pub mod url_cleaner;

pub use self::local_host::{HostClassifier, ReservedRangeClassifier, parse_range};
pub use self::logger::{CleanLogger, TracingLogger, LOG_DOMAIN_BLOCKED, LOG_REDIRECT};
pub use self::url_cleaner::{CleanOutcome, UrlCleaner};
