//! 扫描错误（词法层面的输入畸形）
use std::fmt;
use thiserror::Error;

/// 未闭合的词法结构种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    BlockComment,
    StringLiteral,
    CharLiteral,
    Brace,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Construct::BlockComment => "block comment",
            Construct::StringLiteral => "string literal",
            Construct::CharLiteral => "character literal",
            Construct::Brace => "brace",
        };
        f.write_str(s)
    }
}

/// 核心扫描错误
/// - 单个文件遇到畸形输入时直接中止该文件，不做局部恢复（之后的行号已不可信）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("unterminated {construct} starting at line {line} (offset {offset})")]
    Malformed { construct: Construct, offset: usize, line: usize },
}

impl ScanError {
    /// 以起始偏移构造畸形输入错误；行号按缓冲区开头到 `offset` 的换行数计算
    pub(crate) fn malformed(src: &[u8], construct: Construct, offset: usize) -> Self {
        let offset = offset.min(src.len());
        let line = bytecount::count(&src[..offset], b'\n') + 1;
        ScanError::Malformed { construct, offset, line }
    }
}
