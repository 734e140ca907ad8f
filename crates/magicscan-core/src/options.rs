//! 扫描选项与统计信息（模块）
use std::path::PathBuf;

/// 报告输出格式
/// - Text：逐文件的可读报告（`@ Line n: text`）
/// - Json：所有命中项组成的 JSON 数组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// 词法扫描参数（作用于单个源码缓冲区）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexOptions {
    /// 常量声明的修饰关键字；语句中全部出现时，其中的字面量不报告
    pub safe_keywords: Vec<String>,
    /// 兼容旧行为：跳过“安全”花括号块时不累计其中的换行（之后的行号会偏小）
    pub legacy_line_drift: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            safe_keywords: vec!["static".to_string(), "final".to_string()],
            legacy_line_drift: false,
        }
    }
}

/// 扫描选项（CLI 参数优先于配置文件）
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 最大文件大小（字节）；超过则跳过
    pub max_file_size: Option<u64>,
    /// 输出格式
    pub format: OutputFormat,
    /// 配置文件路径（TOML）；为空时尝试 ./magicscan.toml，不存在则用默认值
    pub config_path: Option<PathBuf>,
    /// 强制启用旧的行号漂移行为
    pub legacy_line_drift: bool,
    /// 线程数：None 表示自动（等于 CPU 核数）；Some(1) 走串行
    pub threads: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            max_file_size: None,
            format: OutputFormat::Text,
            config_path: None,
            legacy_line_drift: false,
            threads: None,
        }
    }
}

/// 扫描统计信息（便于 CLI 打印）
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScanStats {
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub files_failed: usize,
    pub findings_written: usize,
}
