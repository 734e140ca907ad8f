//! 按扩展名选择词法规则
use std::path::Path;

use crate::engine::scan_source;
use crate::error::ScanError;
use crate::findings::Finding;
use crate::options::LexOptions;

/// 词法规则
/// - CFamily：`{}` 作用域、`;` 语句、`"`/`'` 字面量、`//` 与 `/* */` 注释
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    CFamily,
}

impl Profile {
    /// 扩展名在 `extensions` 中（大小写不敏感）时返回对应规则
    pub fn from_path<S: AsRef<str>>(path: &Path, extensions: &[S]) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        extensions
            .iter()
            .any(|e| e.as_ref().trim_start_matches('.').eq_ignore_ascii_case(ext))
            .then_some(Profile::CFamily)
    }

    pub fn scan(self, src: &[u8], lex: &LexOptions, findings: &mut Vec<Finding>) -> Result<(), ScanError> {
        match self {
            Profile::CFamily => scan_source(src, lex, findings),
        }
    }
}
