//! 命中项（单个魔法数字）

/// 单次命中：所在行（字面量首字符的行号，从 1 开始）、起始字节偏移、源码原文
/// - 字符串 / 字符字面量的原文包含两侧引号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub line: usize,
    pub offset: usize,
    pub text: String,
}

impl Finding {
    pub(crate) fn new(line: usize, offset: usize, raw: &[u8]) -> Self {
        // 有损转换，保证非 UTF-8 源码也能输出
        Self { line, offset, text: String::from_utf8_lossy(raw).into_owned() }
    }
}

/// 结果按发现顺序追加；该顺序等价于 (行, 偏移) 升序
pub(crate) fn is_in_discovery_order(findings: &[Finding]) -> bool {
    findings.windows(2).all(|w| (w[0].line, w[0].offset) < (w[1].line, w[1].offset))
}
