//! 清理引擎核心：按目录顺序遍历 Provider，逐个应用字段清理并汇总结果
use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::logging::{debug, warn};
use super::result::{CleanContext, CleanResult};
use crate::cleaner::{CleanLogger, HostClassifier, ReservedRangeClassifier, UrlCleaner};
use crate::config::CleanerConfig;
use crate::error::RscResult;
use crate::provider::ProviderRegistry;
use crate::rule::RuleLoader;

/// URL清理引擎
/// 注册表只读共享，克隆引擎只增加引用计数
#[derive(Clone)]
pub struct CleanEngine {
    registry: Arc<ProviderRegistry>,
    config: CleanerConfig,
    classifier: Arc<dyn HostClassifier>,
}

impl fmt::Debug for CleanEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CleanEngine")
            .field("providers", &self.registry.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl CleanEngine {
    /// 使用默认配置创建引擎
    pub fn new(registry: impl Into<Arc<ProviderRegistry>>) -> Self {
        Self::with_config(registry, CleanerConfig::default())
    }

    pub fn with_config(registry: impl Into<Arc<ProviderRegistry>>, config: CleanerConfig) -> Self {
        Self {
            registry: registry.into(),
            config,
            classifier: Arc::new(ReservedRangeClassifier::new()),
        }
    }

    /// 从 JSON 规则目录直接创建
    pub fn from_json_str(json: &str, config: CleanerConfig) -> RscResult<Self> {
        let registry = RuleLoader::from_json_str(json)?;
        Ok(Self::with_config(registry, config))
    }

    /// 替换本地地址判定器
    pub fn with_classifier(mut self, classifier: impl HostClassifier + 'static) -> Self {
        self.classifier = Arc::new(classifier);
        self
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn config(&self) -> &CleanerConfig {
        &self.config
    }

    /// 无上下文、无日志的简化接口
    pub fn clean_url(&self, url: &str) -> RscResult<CleanResult> {
        self.clean(url, None, None)
    }

    /// 核心清理接口
    /// 输入必须是绝对URL；遇到第一个重定向或拦截结果立即返回
    pub fn clean(
        &self,
        url: &str,
        context: Option<&CleanContext>,
        logger: Option<&dyn CleanLogger>,
    ) -> RscResult<CleanResult> {
        Url::parse(url)?;

        let cleaner = UrlCleaner::new(&self.config, self.classifier.as_ref()).with_logger(logger);
        let method = context.and_then(|ctx| ctx.method.as_deref());
        let mut result = CleanResult::unchanged(url);

        for provider in self.registry.iter() {
            if !provider.match_url(&result.url) {
                continue;
            }
            if let Some(method) = method {
                if !provider.match_method(method) {
                    continue;
                }
            }

            result.providers.push(provider.name().to_string());
            let outcome = match cleaner.remove_fields_from_url(provider, &result.url) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Provider[{}]清理失败，已跳过：{}", provider.name(), e);
                    continue;
                }
            };

            result.url = outcome.url;
            result.changes |= outcome.changes;
            result.redirect |= outcome.redirect;
            result.cancel |= outcome.cancel;
            if outcome.redirect {
                result.force_redirect = provider.should_force_redirect();
            }

            if result.is_terminal() {
                debug!(
                    "Provider[{}]终止处理：重定向={}，拦截={}，URL={}",
                    provider.name(),
                    result.redirect,
                    result.cancel,
                    result.url
                );
                return Ok(result);
            }
        }

        Ok(result)
    }
}
