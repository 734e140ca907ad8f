//! 公共类型（对外暴露）
use serde::Serialize;

/// JSON 输出项（结果数组中的单个元素）
#[derive(Debug, Clone, Serialize)]
pub struct OutputItem<'a> {
    pub file: &'a str,
    pub line: usize,
    pub value: &'a str,
}

/// JSON 状态行：未扫描或扫描失败的文件
/// 与命中行按报告顺序混排，可用是否含 `status` 字段区分
#[derive(Debug, Clone, Serialize)]
pub struct StatusItem<'a> {
    pub file: &'a str,
    /// `unsupported` / `too_large` / `failed`
    pub status: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
