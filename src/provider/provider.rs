//! 站点规则提供者
//! 一个 Provider 描述一个站点：URL匹配模式、字段规则、原始规则、推广规则、例外、重定向与HTTP方法白名单

use crate::logging::debug;
use super::pattern_set::PatternSet;
use crate::compiler::compiler::CATCH_ALL_RULE;
use crate::compiler::{CompiledPattern, PatternKind, RuleCompiler};
use crate::error::RscResult;

#[derive(Debug, Clone)]
pub struct Provider {
    name: String,
    url_pattern: Option<CompiledPattern>,
    rules: PatternSet,
    raw_rules: PatternSet,
    referral_marketing: PatternSet,
    exceptions: PatternSet,
    redirections: PatternSet,
    methods: Vec<String>,
    canceling: bool,
    force_redirection: bool,
}

impl Provider {
    /// 创建Provider；完整追踪域名（complete_provider）会自动附加 `.*` 字段规则
    pub fn new(name: impl Into<String>, complete_provider: bool, force_redirection: bool) -> Self {
        let mut rules = PatternSet::new(PatternKind::Field);
        if complete_provider {
            rules.apply_compiled(CATCH_ALL_RULE.clone(), true);
        }

        Self {
            name: name.into(),
            url_pattern: None,
            rules,
            raw_rules: PatternSet::new(PatternKind::Whole),
            referral_marketing: PatternSet::new(PatternKind::Field),
            exceptions: PatternSet::new(PatternKind::Whole),
            redirections: PatternSet::new(PatternKind::Whole),
            methods: Vec::new(),
            canceling: complete_provider,
            force_redirection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 是否完整拦截该站点的请求
    pub fn is_canceling(&self) -> bool {
        self.canceling
    }

    /// 重定向结果是否需要强制跳转
    pub fn should_force_redirect(&self) -> bool {
        self.force_redirection
    }

    /// 设置URL匹配模式（忽略大小写），空字符串表示不匹配任何URL
    pub fn set_url_pattern(&mut self, pattern: &str) -> RscResult<()> {
        self.url_pattern = RuleCompiler::compile_url_pattern(pattern)?;
        Ok(())
    }

    pub fn url_pattern(&self) -> Option<&str> {
        self.url_pattern.as_ref().map(CompiledPattern::as_str)
    }

    /// URL命中匹配模式且不在任何例外中
    pub fn match_url(&self, url: &str) -> bool {
        let Some(pattern) = &self.url_pattern else {
            return false;
        };
        pattern.is_match(url) && !self.match_exception(url)
    }

    fn match_exception(&self, url: &str) -> bool {
        self.exceptions.enabled().iter().any(|exception| {
            let hit = exception.is_match(url);
            if hit {
                debug!("例外规则命中：Provider={}，规则={}", self.name, exception.as_str());
            }
            hit
        })
    }

    /// 白名单为空时接受所有方法
    pub fn match_method(&self, method: &str) -> bool {
        self.methods.is_empty() || self.methods.iter().any(|m| m == method)
    }

    pub fn add_method(&mut self, method: &str) {
        if !self.methods.iter().any(|m| m == method) {
            self.methods.push(method.to_string());
        }
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// 取第一条命中的重定向规则的第 1 个捕获组
    pub fn get_redirection(&self, url: &str) -> Option<String> {
        let redirection = self
            .redirections
            .enabled()
            .iter()
            .find_map(|redirection| redirection.captures(url).map(|caps| (redirection, caps)))?;

        let (pattern, captures) = redirection;
        debug!("重定向规则命中：Provider={}，规则={}", self.name, pattern.as_str());
        captures.get(1).map(|m| m.as_str().to_string())
    }

    pub fn add_rule(&mut self, rule: &str, is_active: bool) -> RscResult<()> {
        self.rules.apply(rule, is_active)
    }

    pub fn add_raw_rule(&mut self, rule: &str, is_active: bool) -> RscResult<()> {
        self.raw_rules.apply(rule, is_active)
    }

    pub fn add_referral_marketing(&mut self, rule: &str, is_active: bool) -> RscResult<()> {
        self.referral_marketing.apply(rule, is_active)
    }

    pub fn add_exception(&mut self, exception: &str, is_active: bool) -> RscResult<()> {
        self.exceptions.apply(exception, is_active)
    }

    pub fn add_redirection(&mut self, redirection: &str, is_active: bool) -> RscResult<()> {
        self.redirections.apply(redirection, is_active)
    }

    pub fn rules(&self) -> Vec<&str> {
        self.rules.patterns()
    }

    pub fn raw_rules(&self) -> Vec<&str> {
        self.raw_rules.patterns()
    }

    pub fn referral_marketing(&self) -> Vec<&str> {
        self.referral_marketing.patterns()
    }

    pub fn exceptions(&self) -> Vec<&str> {
        self.exceptions.patterns()
    }

    pub fn redirections(&self) -> Vec<&str> {
        self.redirections.patterns()
    }

    pub(crate) fn raw_rule_patterns(&self) -> &[CompiledPattern] {
        self.raw_rules.enabled()
    }

    /// 字段过滤使用的规则：普通规则在前；不允许推广返利时追加推广规则（去重）
    pub(crate) fn field_rules(&self, allow_referral_marketing: bool) -> Vec<&CompiledPattern> {
        let mut rules: Vec<&CompiledPattern> = self.rules.enabled().iter().collect();
        if !allow_referral_marketing {
            rules.extend(
                self.referral_marketing
                    .enabled()
                    .iter()
                    .filter(|p| !self.rules.is_enabled(p.as_str())),
            );
        }
        rules
    }
}
