//! 编译后模式模型
//! 规则字符串与其预编译正则一一对应，构造后只读

use std::borrow::Cow;
use regex::{Captures, Regex};

/// 规则作用范围
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    /// 作用于整条URL（URL匹配、原始规则、例外、重定向），不加锚点
    Whole,
    /// 作用于单个查询键/片段键，编译为 `^<rule>$`
    Field,
}

/// 编译后的规则模式（统一忽略大小写）
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    source: String,
    regex: Regex,
    kind: PatternKind,
}

impl CompiledPattern {
    pub(crate) fn new(source: String, regex: Regex, kind: PatternKind) -> Self {
        Self { source, regex, kind }
    }

    /// 原始规则字符串（目录中的写法）
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn kind(&self) -> PatternKind {
        self.kind
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    #[inline]
    pub fn captures<'h>(&self, input: &'h str) -> Option<Captures<'h>> {
        self.regex.captures(input)
    }

    /// 全局替换为空串
    #[inline]
    pub fn strip_all<'h>(&self, input: &'h str) -> Cow<'h, str> {
        self.regex.replace_all(input, "")
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.kind == other.kind
    }
}

impl Eq for CompiledPattern {}
