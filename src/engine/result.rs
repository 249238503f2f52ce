//! 清理结果与请求上下文

use serde::{Deserialize, Serialize};

/// 请求上下文（目前只有HTTP方法）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CleanContext {
    pub method: Option<String>,
}

impl CleanContext {
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
        }
    }
}

/// 一次清理的汇总结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanResult {
    pub changes: bool,
    pub url: String,
    pub redirect: bool,
    pub cancel: bool,
    /// 重定向来自要求强制跳转的 Provider
    pub force_redirect: bool,
    /// 命中的 Provider 名称（命中顺序）
    pub providers: Vec<String>,
}

impl CleanResult {
    pub(crate) fn unchanged(url: &str) -> Self {
        Self {
            changes: false,
            url: url.to_string(),
            redirect: false,
            cancel: false,
            force_redirect: false,
            providers: Vec::new(),
        }
    }

    /// 是否需要终止后续处理（重定向或拦截）
    pub fn is_terminal(&self) -> bool {
        self.redirect || self.cancel
    }
}
