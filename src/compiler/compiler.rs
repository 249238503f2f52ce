//! 规则编译器核心
//! 仅负责将目录中的规则字符串编译为忽略大小写的正则，不做任何语法修补

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::RegexBuilder;

use crate::logging::debug;
use super::pattern::{CompiledPattern, PatternKind};
use crate::error::{RscResult, RsclearurlsError};

/// 完整追踪域名自动附加的兜底字段规则
pub(crate) static CATCH_ALL_RULE: Lazy<CompiledPattern> = Lazy::new(|| {
    RuleCompiler::compile(".*", PatternKind::Field).unwrap()
});

/// 规则编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 编译单条规则
    pub fn compile(raw_pattern: &str, kind: PatternKind) -> RscResult<CompiledPattern> {
        // 字段规则直接拼接锚点，不额外包裹分组
        let expr: Cow<'_, str> = match kind {
            PatternKind::Whole => Cow::Borrowed(raw_pattern),
            PatternKind::Field => Cow::Owned(format!("^{}$", raw_pattern)),
        };

        let regex = RegexBuilder::new(&expr)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                debug!("规则编译失败：规则={}，错误={}", raw_pattern, e);
                RsclearurlsError::invalid_pattern(raw_pattern, e)
            })?;

        Ok(CompiledPattern::new(raw_pattern.to_string(), regex, kind))
    }

    /// 编译URL匹配模式，空字符串视为未设置
    pub fn compile_url_pattern(raw_pattern: &str) -> RscResult<Option<CompiledPattern>> {
        if raw_pattern.is_empty() {
            return Ok(None);
        }
        Self::compile(raw_pattern, PatternKind::Whole).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_rule_is_anchored() {
        let rule = RuleCompiler::compile("utm_.*", PatternKind::Field).unwrap();
        assert!(rule.is_match("utm_source"));
        assert!(rule.is_match("UTM_Medium"));
        assert!(!rule.is_match("x_utm_source"));
        assert_eq!(rule.as_str(), "utm_.*");
        assert_eq!(rule.kind(), PatternKind::Field);
        assert_eq!(rule.regex().as_str(), "^utm_.*$");
    }

    #[test]
    fn test_field_rule_keeps_plain_concatenation() {
        // `^a|b$`：前一分支只锚定开头，后一分支只锚定结尾
        let rule = RuleCompiler::compile("a|b", PatternKind::Field).unwrap();
        assert!(rule.is_match("abc"));
        assert!(rule.is_match("xb"));
        assert!(!rule.is_match("xa"));
    }

    #[test]
    fn test_whole_pattern_case_insensitive() {
        let pattern = RuleCompiler::compile(r"example\.com", PatternKind::Whole).unwrap();
        assert!(pattern.is_match("https://EXAMPLE.com/path"));
        assert_eq!(pattern.kind(), PatternKind::Whole);
        assert_eq!(pattern.regex().as_str(), r"example\.com");
        assert_eq!(pattern.strip_all("x-example.com-EXAMPLE.COM"), "x--");
    }

    #[test]
    fn test_invalid_pattern_reports_source() {
        let err = RuleCompiler::compile("(unclosed", PatternKind::Whole).unwrap_err();
        match err {
            RsclearurlsError::InvalidRulePattern { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_url_pattern_is_absent() {
        assert!(RuleCompiler::compile_url_pattern("").unwrap().is_none());
        assert!(RuleCompiler::compile_url_pattern("^https?://a\\.test").unwrap().is_some());
        assert!(CATCH_ALL_RULE.is_match("anything"));
    }
}
