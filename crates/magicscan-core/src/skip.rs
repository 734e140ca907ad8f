//! 遍历原语：注释 / 引号字面量 / 成对花括号
//!
//! 同一套原语既用于权威遍历（计行），也用于快速跳过（不计行）：
//! 由调用方通过 `track_lines` 决定，返回值中的 `newlines` 由调用方并入行计数。

use crate::error::{Construct, ScanError};

/// 一次跳过的结果：新的游标位置与跨过的换行数（不计行时恒为 0）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Skip {
    pub(crate) end: usize,
    pub(crate) newlines: usize,
}

impl Skip {
    fn over(src: &[u8], start: usize, end: usize, track_lines: bool) -> Self {
        let newlines = if track_lines { bytecount::count(&src[start..end], b'\n') } else { 0 };
        Self { end, newlines }
    }
}

/// 判定 `pos` 处的 `/` 是否开启注释并跳过
/// - `//`：跳到下一个换行之后（含换行）或缓冲区末尾
/// - `/*`：跳到匹配的 `*/` 之后；未闭合视为畸形输入
/// - 其他（如除号）：误报，仅前进 1
pub(crate) fn skip_comment(src: &[u8], pos: usize, track_lines: bool) -> Result<Skip, ScanError> {
    match src.get(pos + 1) {
        Some(b'/') => {
            let body = pos + 2;
            let end = src[body..]
                .iter()
                .position(|&b| b == b'\n')
                .map_or(src.len(), |i| body + i + 1);
            Ok(Skip::over(src, pos, end, track_lines))
        }
        Some(b'*') => {
            let body = pos + 2;
            match src[body..].windows(2).position(|w| w == b"*/") {
                Some(i) => Ok(Skip::over(src, pos, body + i + 2, track_lines)),
                None => Err(ScanError::malformed(src, Construct::BlockComment, pos)),
            }
        }
        _ => Ok(Skip { end: pos + 1, newlines: 0 }),
    }
}

/// 从 `pos` 处的开引号跳到匹配的闭引号之后
/// - 反斜杠转义其后任意一个字符
/// - 区间内的 `//`、`/*` 仍按注释跳过（快速跳过逻辑，与编辑器的粗略识别一致）
pub(crate) fn skip_quoted(src: &[u8], pos: usize, track_lines: bool) -> Result<Skip, ScanError> {
    let quote = src[pos];
    let mut i = pos + 1;
    while let Some(&b) = src.get(i) {
        match b {
            b'/' => i = skip_comment(src, i, false)?.end,
            b'\\' => i += 2,
            _ if b == quote => return Ok(Skip::over(src, pos, i + 1, track_lines)),
            _ => i += 1,
        }
    }
    let construct = if quote == b'\'' { Construct::CharLiteral } else { Construct::StringLiteral };
    Err(ScanError::malformed(src, construct, pos))
}

/// 从 `pos` 处的 `{` 找到匹配的 `}`，返回其后一个位置
/// 非权威遍历：从不计行
pub(crate) fn skip_paired_brace(src: &[u8], pos: usize) -> Result<usize, ScanError> {
    let mut depth = 1usize;
    let mut i = pos + 1;
    while depth > 0 {
        let Some(&b) = src.get(i) else {
            return Err(ScanError::malformed(src, Construct::Brace, pos));
        };
        i = match b {
            b'/' => skip_comment(src, i, false)?.end,
            b'"' | b'\'' => skip_quoted(src, i, false)?.end,
            b'{' => {
                depth += 1;
                i + 1
            }
            b'}' => {
                depth -= 1;
                i + 1
            }
            _ => i + 1,
        };
    }
    Ok(i)
}
