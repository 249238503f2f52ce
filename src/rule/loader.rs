//! 规则目录加载器
//! 负责把 JSON 规则目录转换为 Provider 注册表（仅本地数据，不做网络拉取）

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::logging::{debug, warn};
use super::model::{ProviderRecord, RuleCatalog};
use crate::error::{RscResult, RsclearurlsError};
use crate::provider::{Provider, ProviderRegistry};

/// 规则加载管理器
pub struct RuleLoader;

impl RuleLoader {
    /// 从 JSON 字符串加载
    pub fn from_json_str(json: &str) -> RscResult<ProviderRegistry> {
        let catalog: RuleCatalog = serde_json::from_str(json)?;
        Self::build_registry(&catalog)
    }

    /// 从 JSON 字节加载
    pub fn from_slice(bytes: &[u8]) -> RscResult<ProviderRegistry> {
        let catalog: RuleCatalog = serde_json::from_slice(bytes)?;
        Self::build_registry(&catalog)
    }

    /// 从本地文件加载
    pub fn from_path(path: impl AsRef<Path>) -> RscResult<ProviderRegistry> {
        let path = path.as_ref();
        debug!("从本地文件加载规则目录：{}", path.display());
        let bytes = fs::read(path)?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(RsclearurlsError::RuleLoadError(format!("规则文件为空：{}", path.display())));
        }
        Self::from_slice(&bytes)
    }

    /// 将规则目录编译为注册表，任一规则无效即失败
    pub fn build_registry(catalog: &RuleCatalog) -> RscResult<ProviderRegistry> {
        let start = Instant::now();
        let mut providers = Vec::with_capacity(catalog.providers.len());

        for (name, record) in &catalog.providers {
            let provider = Self::build_provider(name, record).inspect_err(|e| {
                warn!("Provider[{}]构建失败：{}", name, e);
            })?;
            providers.push(provider);
        }

        debug!("✅ 规则目录编译完成，总耗时{:?}", start.elapsed());
        Ok(ProviderRegistry::new(providers))
    }

    /// 构建单个 Provider，缺省字段按空处理
    pub fn build_provider(name: &str, record: &ProviderRecord) -> RscResult<Provider> {
        let mut provider = Provider::new(name, record.complete_provider, record.force_redirection);

        provider.set_url_pattern(record.url_pattern.as_deref().unwrap_or(""))?;

        for rule in &record.rules {
            provider.add_rule(rule, true)?;
        }
        for raw_rule in &record.raw_rules {
            provider.add_raw_rule(raw_rule, true)?;
        }
        for referral in &record.referral_marketing {
            provider.add_referral_marketing(referral, true)?;
        }
        for exception in &record.exceptions {
            provider.add_exception(exception, true)?;
        }
        for redirection in &record.redirections {
            provider.add_redirection(redirection, true)?;
        }
        for method in &record.methods {
            provider.add_method(method);
        }

        debug!(
            "📊 Provider[{}]：规则{}条、原始规则{}条、推广规则{}条、例外{}条、重定向{}条",
            name,
            provider.rules().len(),
            provider.raw_rules().len(),
            provider.referral_marketing().len(),
            provider.exceptions().len(),
            provider.redirections().len()
        );

        Ok(provider)
    }
}
