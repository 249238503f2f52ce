//! 编译模块：将目录中的规则字符串编译为可执行的正则模式
pub mod pattern;
pub mod compiler;

pub use self::pattern::{CompiledPattern, PatternKind};
pub use self::compiler::RuleCompiler;
