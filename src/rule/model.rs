//! 规则目录数据模型定义
//! 仅存储规则数据，无任何业务逻辑，支持序列化/反序列化

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 单个站点的规则记录（ClearURLs 目录格式）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderRecord {
    pub url_pattern: Option<String>,
    pub complete_provider: bool,
    pub force_redirection: bool,
    pub rules: Vec<String>,
    pub raw_rules: Vec<String>,
    pub referral_marketing: Vec<String>,
    pub exceptions: Vec<String>,
    pub redirections: Vec<String>,
    pub methods: Vec<String>,
}

/// 完整规则目录，Provider 顺序即文档中的键顺序
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RuleCatalog {
    #[serde(default)]
    pub providers: IndexMap<String, ProviderRecord>,
}
