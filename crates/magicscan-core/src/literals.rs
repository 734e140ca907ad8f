//! 数字字面量分类：标识符后缀 / 可豁免的 0、1 / 需要报告的魔法数字
use crate::chars::{is_ident_char, is_ident_letter, is_num_char};

/// `pos` 处的数字是否属于某个标识符（如 `x1`、`x2y`）
/// 向左回溯连续的标识符字符，按最左端字符是否为字母/`_`/`$` 判定
pub(crate) fn is_part_of_identifier(src: &[u8], pos: usize) -> bool {
    let mut i = pos;
    while i > 0 && is_ident_char(src[i - 1]) {
        i -= 1;
    }
    is_ident_letter(src[i])
}

/// 单独出现的 `0` / `1` 视为合法哨兵值，不报告；
/// 但若它是更长字面量的开头（`10`、`1.5`、`0x1F`、`0b1`、`1_000`、`1e3`）则不豁免
pub(crate) fn is_valid_stray_number(src: &[u8], pos: usize) -> bool {
    let digit = src[pos];
    if digit != b'0' && digit != b'1' {
        return false;
    }
    match src.get(pos + 1) {
        Some(b) if b.is_ascii_digit() || matches!(b, b'.' | b'_') => false,
        Some(b'x' | b'X' | b'b' | b'B') if digit == b'0' => false,
        Some(b'e' | b'E') => exponent_len(src, pos + 1).is_none(),
        _ => true,
    }
}

/// 返回数字字面量末尾之后的位置
/// - `0x`/`0X` 前缀之后接受全部十六进制数字
/// - 十进制字面量接受 `e[+-]digits` 指数部分
pub(crate) fn number_end(src: &[u8], pos: usize) -> usize {
    let hex = src[pos] == b'0' && matches!(src.get(pos + 1), Some(b'x' | b'X'));
    let mut i = pos + 1;
    while let Some(&b) = src.get(i) {
        if is_num_char(b) || (hex && b.is_ascii_hexdigit()) {
            i += 1;
            continue;
        }
        match exponent_len(src, i) {
            Some(n) if !hex => i += n,
            _ => break,
        }
    }
    i
}

/// 返回标识符末尾之后的位置（至少前进一个字节）
pub(crate) fn identifier_end(src: &[u8], pos: usize) -> usize {
    let mut i = pos + 1;
    while src.get(i).is_some_and(|&b| is_ident_char(b)) {
        i += 1;
    }
    i
}

/// `pos` 处若为指数标记（`e5`、`E-3`），返回标记加符号的长度
fn exponent_len(src: &[u8], pos: usize) -> Option<usize> {
    if !matches!(src.get(pos), Some(b'e' | b'E')) {
        return None;
    }
    let sign = usize::from(matches!(src.get(pos + 1), Some(b'+' | b'-')));
    src.get(pos + 1 + sign).filter(|b| b.is_ascii_digit()).map(|_| 1 + sign)
}
