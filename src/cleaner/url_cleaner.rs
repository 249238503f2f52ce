//! URL字段清理算法
//! 对单个命中的 Provider 依次执行：本地地址跳过 → 重定向解包 → 域名拦截 → 原始规则剥离 → 查询/片段字段过滤 → 重新拼装

use url::Url;

use crate::logging::{debug, warn};
use super::local_host::HostClassifier;
use super::logger::{CleanLogger, LOG_DOMAIN_BLOCKED, LOG_REDIRECT};
use crate::config::CleanerConfig;
use crate::error::RscResult;
use crate::provider::Provider;
use crate::utils::HashParams;
use crate::utils::url_codec::{
    decode_url, parse_query, serialize_query, serialize_query_form, url_without_params_and_hash,
};

/// 单个 Provider 的清理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOutcome {
    pub changes: bool,
    pub url: String,
    pub redirect: bool,
    pub cancel: bool,
}

impl CleanOutcome {
    fn unchanged(url: &str) -> Self {
        Self {
            changes: false,
            url: url.to_string(),
            redirect: false,
            cancel: false,
        }
    }

    fn modified(url: String, changes: bool) -> Self {
        Self {
            changes,
            url,
            redirect: false,
            cancel: false,
        }
    }

    fn redirect(url: String) -> Self {
        Self {
            changes: false,
            url,
            redirect: true,
            cancel: false,
        }
    }

    fn cancel(url: &str) -> Self {
        Self {
            changes: false,
            url: url.to_string(),
            redirect: false,
            cancel: true,
        }
    }
}

/// 字段清理器
pub struct UrlCleaner<'a> {
    config: &'a CleanerConfig,
    classifier: &'a dyn HostClassifier,
    logger: Option<&'a dyn CleanLogger>,
}

impl<'a> UrlCleaner<'a> {
    pub fn new(config: &'a CleanerConfig, classifier: &'a dyn HostClassifier) -> Self {
        Self {
            config,
            classifier,
            logger: None,
        }
    }

    pub fn with_logger(mut self, logger: Option<&'a dyn CleanLogger>) -> Self {
        self.logger = logger;
        self
    }

    fn log(&self, before: &str, after: &str, rule: &str) {
        if let Some(logger) = self.logger {
            logger.log(before, after, rule);
        }
    }

    /// 按 Provider 清理URL，输入不是绝对URL时返回 InvalidUrl
    pub fn remove_fields_from_url(&self, provider: &Provider, pure_url: &str) -> RscResult<CleanOutcome> {
        let url_object = Url::parse(pure_url)?;

        // 1. 本地地址直接放行
        if self.config.local_hosts_skipping && self.classifier.is_local(&url_object) {
            debug!("本地地址跳过清理：{}", pure_url);
            return Ok(CleanOutcome::unchanged(pure_url));
        }

        // 2. 重定向解包
        if let Some(target) = provider.get_redirection(pure_url) {
            let url = decode_url(&target);
            self.log(pure_url, &url, LOG_REDIRECT);
            return Ok(CleanOutcome::redirect(url));
        }

        // 3. 完整追踪域名拦截
        if provider.is_canceling() && self.config.domain_blocking {
            self.log(pure_url, pure_url, LOG_DOMAIN_BLOCKED);
            return Ok(CleanOutcome::cancel(pure_url));
        }

        // 4. 原始规则作用于整条URL
        let mut changes = false;
        let mut url = pure_url.to_string();
        for raw_rule in provider.raw_rule_patterns() {
            let replaced = raw_rule.strip_all(&url).into_owned();
            if replaced != url {
                if self.config.logging_status {
                    self.log(&url, &replaced, raw_rule.as_str());
                }
                changes = true;
                url = replaced;
            }
        }

        // 原始规则可能改变了域名或路径，重新解析
        let url_object = match Url::parse(&url) {
            Ok(url_object) => url_object,
            Err(e) => {
                warn!("原始规则处理后URL无法解析，跳过字段过滤：Provider={}，URL={}，错误={}", provider.name(), url, e);
                return Ok(CleanOutcome::modified(url, changes));
            }
        };
        let mut fields = parse_query(&url_object);
        let mut fragments = HashParams::from_url(&url_object);
        let domain = url_without_params_and_hash(&url_object);

        // 5. 仅在存在查询参数或片段参数时执行字段过滤
        if fields.is_empty() && fragments.is_empty() {
            return Ok(CleanOutcome::modified(url, changes));
        }

        for rule in provider.field_rules(self.config.referral_marketing) {
            let before = self.snapshot_if_logging(&domain, &fields, &fragments);

            let field_count = fields.len();
            fields.retain(|(key, _)| !rule.is_match(key));
            let mut local_change = fields.len() != field_count;

            let matched_fragments: Vec<String> = fragments
                .keys()
                .filter(|key| rule.is_match(key))
                .map(str::to_string)
                .collect();
            for key in &matched_fragments {
                fragments.delete(key);
            }
            local_change |= !matched_fragments.is_empty();

            if local_change {
                changes = true;
                if let Some(before) = before {
                    let after = Self::snapshot(&domain, &fields, &fragments);
                    self.log(&before, &after, rule.as_str());
                }
            }
        }

        // 6. 重新拼装
        let mut final_url = domain;
        if !fields.is_empty() {
            final_url.push('?');
            final_url.push_str(&serialize_query(&fields));
        }
        if !fragments.is_empty() {
            final_url.push('#');
            final_url.push_str(&fragments.to_string());
        }
        let url = final_url.replacen("?&", "?", 1).replacen("#&", "#", 1);

        Ok(CleanOutcome::modified(url, changes))
    }

    fn snapshot_if_logging(
        &self,
        domain: &str,
        fields: &[(String, String)],
        fragments: &HashParams,
    ) -> Option<String> {
        if self.logger.is_none() || !self.config.logging_status {
            return None;
        }
        Some(Self::snapshot(domain, fields, fragments))
    }

    /// 日志快照：domain[?query][#fragment]
    fn snapshot(domain: &str, fields: &[(String, String)], fragments: &HashParams) -> String {
        let mut snapshot = domain.to_string();
        let query = serialize_query_form(fields);
        if !query.is_empty() {
            snapshot.push('?');
            snapshot.push_str(&query);
        }
        let fragment = fragments.to_string();
        if !fragment.is_empty() {
            snapshot.push('#');
            snapshot.push_str(&fragment);
        }
        snapshot
    }
}
