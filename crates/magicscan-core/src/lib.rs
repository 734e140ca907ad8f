//! 魔法数字扫描核心库
//!
//! 设计要点：
//! - 纯词法扫描（不建 AST）：只识别注释、引号字面量、`{}` 作用域与 `;` 语句边界。
//! - 语句中同时出现 `static` 与 `final`（可配置）时，其中的字面量视为常量声明，不报告。
//! - 单独的 `0` / `1` 与标识符中的数字不报告。
//! - 字节级处理源码，命中文本以有损 UTF-8 转换输出。
//! - 目录扫描可并行，输出顺序与串行一致。

mod chars;
mod config;
mod context;
mod engine;
mod error;
mod findings;
mod literals;
mod options;
mod profiles;
mod report;
mod scan;
mod skip;
mod types;

pub use config::{load_config, resolve_config, ScanConfig, DEFAULT_CONFIG_PATH};
pub use engine::{scan_source, scan_text};
pub use error::{Construct, ScanError};
pub use findings::Finding;
pub use options::{LexOptions, OutputFormat, ScanOptions, ScanStats};
pub use profiles::Profile;
pub use report::{FileReport, ScanStatus};
pub use scan::{scan_and_write, scan_file};
pub use types::{OutputItem, StatusItem};
