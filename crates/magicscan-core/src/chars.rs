//! 字符分类（字节级）
//!
//! 源码按字节处理：>= 0x80 的字节（UTF-8 多字节字符的组成部分）一律视为标识符字母。

/// 标识符字符：字母、数字、`_`、`$`
#[inline]
pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// 标识符中的非数字字符（名字的“头”）
#[inline]
pub(crate) fn is_ident_letter(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

/// 数字字面量字符：数字、小数点、`_` 分隔符、进制标记与类型后缀
#[inline]
pub(crate) fn is_num_char(b: u8) -> bool {
    b.is_ascii_digit()
        || matches!(
            b,
            b'.' | b'_'
                | b'x' | b'X' | b'b' | b'B' // 十六进制 / 二进制
                | b'f' | b'F' | b'd' | b'D' | b'l' | b'L' // float / double / long
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_chars() {
        for b in [b'a', b'Z', b'0', b'9', b'_', b'$', 0xE4] {
            assert!(is_ident_char(b), "{b:#x}");
        }
        for b in [b' ', b'.', b';', b'"', b'{', b'-'] {
            assert!(!is_ident_char(b), "{b:#x}");
        }
    }

    #[test]
    fn letters_exclude_digits() {
        assert!(is_ident_letter(b'x'));
        assert!(is_ident_letter(b'$'));
        assert!(!is_ident_letter(b'7'));
    }

    #[test]
    fn number_chars() {
        for b in b"0123456789._xXbBfFdDlL" {
            assert!(is_num_char(*b));
        }
        for b in b" ;)e+aG" {
            assert!(!is_num_char(*b));
        }
    }
}
