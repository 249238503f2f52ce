//! 启用/禁用规则集合
//! 同一规则字符串只能出现在其中一侧，启用侧保持注册顺序

use indexmap::IndexSet;

use crate::compiler::{CompiledPattern, PatternKind, RuleCompiler};
use crate::error::RscResult;

#[derive(Debug, Clone)]
pub struct PatternSet {
    kind: PatternKind,
    enabled: Vec<CompiledPattern>,
    disabled: IndexSet<String>,
}

impl PatternSet {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            enabled: Vec::new(),
            disabled: IndexSet::new(),
        }
    }

    /// 写入一条规则；禁用侧的规则同样会做语法校验
    pub fn apply(&mut self, pattern: &str, is_active: bool) -> RscResult<()> {
        let compiled = RuleCompiler::compile(pattern, self.kind)?;
        self.apply_compiled(compiled, is_active);
        Ok(())
    }

    pub(crate) fn apply_compiled(&mut self, compiled: CompiledPattern, is_active: bool) {
        if is_active {
            self.disabled.shift_remove(compiled.as_str());
            // 重复启用保留原位置
            if !self.is_enabled(compiled.as_str()) {
                self.enabled.push(compiled);
            }
        } else {
            self.enabled.retain(|p| p.as_str() != compiled.as_str());
            self.disabled.insert(compiled.as_str().to_string());
        }
    }

    pub fn is_enabled(&self, pattern: &str) -> bool {
        self.enabled.iter().any(|p| p.as_str() == pattern)
    }

    pub fn is_disabled(&self, pattern: &str) -> bool {
        self.disabled.contains(pattern)
    }

    /// 启用的编译后规则（注册顺序）
    pub fn enabled(&self) -> &[CompiledPattern] {
        &self.enabled
    }

    /// 启用的规则字符串（注册顺序）
    pub fn patterns(&self) -> Vec<&str> {
        self.enabled.iter().map(CompiledPattern::as_str).collect()
    }

    pub fn disabled_patterns(&self) -> Vec<&str> {
        self.disabled.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_disable_exclusive() {
        let mut set = PatternSet::new(PatternKind::Field);
        set.apply("p", true).unwrap();
        set.apply("p", false).unwrap();

        assert!(!set.is_enabled("p"));
        assert!(set.is_disabled("p"));
        assert!(set.patterns().is_empty());

        set.apply("p", true).unwrap();
        assert!(set.is_enabled("p"));
        assert!(!set.is_disabled("p"));
    }

    #[test]
    fn test_registration_order_kept() {
        let mut set = PatternSet::new(PatternKind::Whole);
        set.apply("b", true).unwrap();
        set.apply("a", true).unwrap();
        set.apply("b", true).unwrap();

        assert_eq!(set.patterns(), vec!["b", "a"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_invalid_disabled_pattern_rejected() {
        let mut set = PatternSet::new(PatternKind::Whole);
        assert!(set.apply("[", false).is_err());
        assert!(set.disabled_patterns().is_empty());
    }
}
