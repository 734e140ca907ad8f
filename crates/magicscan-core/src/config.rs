//! 配置文件加载（TOML）
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::options::{LexOptions, ScanOptions};

/// 默认配置文件路径（存在时自动加载）
pub const DEFAULT_CONFIG_PATH: &str = "./magicscan.toml";

/// 配置文件结构；缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// 按 C 系词法扫描的文件扩展名（不含点，大小写不敏感）
    pub extensions: Vec<String>,
    /// 常量声明关键字
    pub safe_keywords: Vec<String>,
    pub legacy_line_drift: bool,
    pub max_file_size: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        let lex = LexOptions::default();
        Self {
            extensions: vec!["java".to_string()],
            safe_keywords: lex.safe_keywords,
            legacy_line_drift: lex.legacy_line_drift,
            max_file_size: None,
        }
    }
}

impl ScanConfig {
    /// 词法参数；CLI 的 `legacy_line_drift` 只能打开，不能关闭配置中的设置
    pub fn lex_options(&self, opts: &ScanOptions) -> LexOptions {
        LexOptions {
            safe_keywords: self.safe_keywords.clone(),
            legacy_line_drift: self.legacy_line_drift || opts.legacy_line_drift,
        }
    }

    /// CLI 指定的大小上限优先
    pub fn max_file_size(&self, opts: &ScanOptions) -> Option<u64> {
        opts.max_file_size.or(self.max_file_size)
    }
}

/// 从 TOML 文件加载配置
pub fn load_config(path: &Path) -> Result<ScanConfig> {
    let txt = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let parsed: ScanConfig = toml::from_str(&txt).with_context(|| format!("parse config {}", path.display()))?;
    Ok(parsed)
}

/// 解析配置来源：显式路径 → 默认路径（存在时）→ 内置默认值
pub fn resolve_config(explicit: Option<&Path>) -> Result<ScanConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
    if fallback.is_file() {
        return load_config(&fallback);
    }
    Ok(ScanConfig::default())
}
