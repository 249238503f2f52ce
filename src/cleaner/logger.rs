//! 清理日志接口
//! 日志只是旁路输出，是否设置日志器都不影响清理结果

use crate::logging::info;

/// 重定向解包的日志原因
pub const LOG_REDIRECT: &str = "redirect";
/// 完整拦截的日志原因
pub const LOG_DOMAIN_BLOCKED: &str = "domain_blocked";

/// 日志接收方：(清理前, 清理后, 规则或原因)
pub trait CleanLogger {
    fn log(&self, before: &str, after: &str, rule: &str);
}

impl<F> CleanLogger for F
where
    F: Fn(&str, &str, &str),
{
    fn log(&self, before: &str, after: &str, rule: &str) {
        self(before, after, rule)
    }
}

/// 将清理日志输出到 tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl CleanLogger for TracingLogger {
    fn log(&self, before: &str, after: &str, rule: &str) {
        info!(target: "rsclearurls::clean", before, after, rule, "URL清理");
    }
}
