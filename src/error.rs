//! 全局错误类型定义

use thiserror::Error;
use regex::Error as RegexError;
use serde_json::Error as SerdeJsonError;
use std::io::Error as IoError;
use url::ParseError as UrlParseError;

#[derive(Error, Debug)]
pub enum RsclearurlsError {
    // 规则相关错误
    #[error("规则加载失败：{0}")]
    RuleLoadError(String),
    #[error("规则正则无效：{pattern}（{source}）")]
    InvalidRulePattern {
        pattern: String,
        #[source]
        source: RegexError,
    },

    // 输入相关错误
    #[error("URL解析失败：{0}")]
    InvalidUrl(#[from] UrlParseError),

    // 序列化/反序列化错误
    #[error("JSON解析失败：{0}")]
    JsonError(#[from] SerdeJsonError),

    // 基础错误
    #[error("IO操作失败：{0}")]
    IoError(#[from] IoError),
}

impl RsclearurlsError {
    /// 包装正则编译错误，保留原始规则字符串
    pub fn invalid_pattern(pattern: &str, source: RegexError) -> Self {
        Self::InvalidRulePattern {
            pattern: pattern.to_string(),
            source,
        }
    }
}

// 全局Result类型
pub type RscResult<T> = Result<T, RsclearurlsError>;
