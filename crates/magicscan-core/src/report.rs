//! 单文件报告与文本渲染
use std::fmt;

use crate::findings::Finding;

/// 单个文件的扫描结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Scanned(Vec<Finding>),
    /// 无对应词法规则
    Unsupported,
    /// 超出文件大小上限，未读取
    TooLarge { size: u64, max: u64 },
    /// 读取失败或输入畸形；整个文件作废
    Failed(String),
}

impl ScanStatus {
    /// 状态名（JSON 状态行）
    pub fn label(&self) -> &'static str {
        match self {
            ScanStatus::Scanned(_) => "scanned",
            ScanStatus::Unsupported => "unsupported",
            ScanStatus::TooLarge { .. } => "too_large",
            ScanStatus::Failed(_) => "failed",
        }
    }

    /// 未扫描的原因；`Unsupported` 没有附加说明
    pub fn reason(&self) -> Option<String> {
        match self {
            ScanStatus::TooLarge { size, max } => Some(format!("{size} bytes exceeds the {max} byte limit")),
            ScanStatus::Failed(reason) => Some(reason.clone()),
            ScanStatus::Scanned(_) | ScanStatus::Unsupported => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// 展示用文件名（即输入路径）
    pub file: String,
    pub status: ScanStatus,
}

impl FileReport {
    pub fn findings(&self) -> &[Finding] {
        match &self.status {
            ScanStatus::Scanned(f) => f.as_slice(),
            _ => &[],
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(&self.status, ScanStatus::Scanned(f) if f.is_empty())
    }
}

/// 文本格式：
/// ```text
/// Foo.java has 2 magic numbers:
///     @ Line 3: 42
///     @ Line 7: "abc"
/// ```
impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            ScanStatus::Scanned(findings) if findings.is_empty() => write!(f, "{} has no magic numbers.", self.file),
            ScanStatus::Scanned(findings) => {
                write!(f, "{} has {} magic numbers:", self.file, findings.len())?;
                for entry in findings {
                    write!(f, "\n\t@ Line {}: {}", entry.line, entry.text)?;
                }
                Ok(())
            }
            ScanStatus::Unsupported => write!(f, "{} not scanned.", self.file),
            status => match status.reason() {
                Some(reason) => write!(f, "{} not scanned: {}", self.file, reason),
                None => write!(f, "{} not scanned.", self.file),
            },
        }
    }
}
