//! “安全上下文”判定：语句中是否同时出现全部常量修饰关键字（默认 `static` + `final`）
//!
//! 关键字按整词匹配；注释与引号字面量视为不透明区域，不在其中匹配。
//! 该搜索只是快速遍历，从不计行。
use crate::chars::is_ident_char;
use crate::error::ScanError;
use crate::skip::{skip_comment, skip_quoted};

/// `[start, end)` 内是否出现全部 `keywords`；关键字集合为空时永不安全
pub(crate) fn is_safe_context<S: AsRef<str>>(
    src: &[u8],
    start: usize,
    end: usize,
    keywords: &[S],
) -> Result<bool, ScanError> {
    if keywords.is_empty() {
        return Ok(false);
    }
    for kw in keywords {
        if !contains_word(src, start, end, kw.as_ref().as_bytes())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// 在 `[start, end)` 内整词搜索 `word`
/// 词首前一个字符与词尾后一个字符（可在区间之外）都不能是标识符字符
pub(crate) fn contains_word(src: &[u8], start: usize, end: usize, word: &[u8]) -> Result<bool, ScanError> {
    Ok(scan_word(src, start, end, word)?.found)
}

/// 一次整词搜索的进度：已命中，或下次从 `next` 继续
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WordScan {
    found: bool,
    next: usize,
}

/// 从 `from` 开始搜索，直到词无法完整落在 `end` 之前
/// 访问的位置序列与 `end` 无关，因此停下的位置可以在右界变大后继续搜索
fn scan_word(src: &[u8], from: usize, end: usize, word: &[u8]) -> Result<WordScan, ScanError> {
    let end = end.min(src.len());
    let (Some(&first), Some(last)) = (word.first(), end.checked_sub(word.len())) else {
        return Ok(WordScan { found: false, next: from });
    };

    let mut i = from;
    while i <= last {
        match src[i] {
            b'/' => i = skip_comment(src, i, false)?.end,
            b'"' | b'\'' => i = skip_quoted(src, i, false)?.end,
            b if b == first => {
                let open = i == 0 || !is_ident_char(src[i - 1]);
                let close = src.get(i + word.len()).map_or(true, |&c| !is_ident_char(c));
                if open && close && &src[i..i + word.len()] == word {
                    return Ok(WordScan { found: true, next: i });
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    Ok(WordScan { found: false, next: i })
}

/// 单条语句的增量判定
/// 同一语句内查询的右界通常递增：每个关键字从上次停下的位置继续，整条语句只遍历一次。
/// 语句起点移动时须新建。
#[derive(Debug)]
pub(crate) struct StatementContext {
    start: usize,
    end: usize,
    progress: Vec<WordScan>,
}

impl StatementContext {
    pub(crate) fn new(start: usize) -> Self {
        Self { start, end: start, progress: Vec::new() }
    }

    /// 与 `is_safe_context(src, start, end, keywords)` 结果相同
    pub(crate) fn is_safe<S: AsRef<str>>(&mut self, src: &[u8], end: usize, keywords: &[S]) -> Result<bool, ScanError> {
        if keywords.is_empty() {
            return Ok(false);
        }
        if end < self.end {
            // 右界回退（如 `"a"{`）：不复用进度
            return is_safe_context(src, self.start, end, keywords);
        }
        self.end = end;
        if self.progress.len() != keywords.len() {
            self.progress = vec![WordScan { found: false, next: self.start }; keywords.len()];
        }

        for (kw, p) in keywords.iter().zip(self.progress.iter_mut()) {
            if !p.found {
                *p = scan_word(src, p.next, end, kw.as_ref().as_bytes())?;
                if !p.found {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: [&str; 2] = ["static", "final"];

    fn safe(src: &str) -> bool {
        is_safe_context(src.as_bytes(), 0, src.len(), &DEFAULT).unwrap()
    }

    #[test]
    fn both_keywords_make_a_safe_context() {
        assert!(safe("private static final int MAX = "));
        assert!(safe("final static long X = "));
    }

    #[test]
    fn one_keyword_is_not_enough() {
        assert!(!safe("static int counter = "));
        assert!(!safe("final int local = "));
    }

    #[test]
    fn keywords_must_be_whole_words() {
        assert!(!safe("staticX finalY = "));
        assert!(!safe("nonstatic final = "));
        assert!(!safe("static finally = "));
        assert!(safe("static\tfinal"));
    }

    #[test]
    fn comments_and_literals_are_opaque() {
        assert!(!safe("/* static final */ int x = "));
        assert!(!safe("// static final\nint x = "));
        assert!(!safe("String s = \"static final\""));
        assert!(!safe("static char c = 'final'"));
        assert!(safe("static /* x */ final int y = "));
    }

    #[test]
    fn range_bounds_are_respected() {
        let src = b"int a; static final int B = 7;";
        assert!(!is_safe_context(src, 0, 6, &DEFAULT).unwrap());
        assert!(is_safe_context(src, 6, src.len(), &DEFAULT).unwrap());
        // 关键字必须完整落在区间内
        assert!(!is_safe_context(src, 6, 18, &DEFAULT).unwrap());
    }

    #[test]
    fn reversed_or_empty_ranges_are_never_safe() {
        let src = b"static final";
        assert!(!is_safe_context(src, 5, 2, &DEFAULT).unwrap());
        assert!(!is_safe_context(src, 3, 3, &DEFAULT).unwrap());
    }

    #[test]
    fn empty_keyword_set_is_never_safe() {
        let none: [&str; 0] = [];
        assert!(!is_safe_context(b"static final", 0, 12, &none).unwrap());
    }

    #[test]
    fn custom_keyword_set() {
        let kws = ["static", "const"];
        assert!(is_safe_context(b"static const int N = ", 0, 21, &kws).unwrap());
        assert!(!is_safe_context(b"static final int N = ", 0, 21, &kws).unwrap());
    }

    #[test]
    fn statement_context_matches_fresh_search() {
        let src = "int a = 1; /* final */ static \"x\" int[] b = {2}; final int c = 3, d = 'q';";
        let bytes = src.as_bytes();
        for start in [0, 10, 11] {
            let mut ctx = StatementContext::new(start);
            for end in (start..=bytes.len()).chain([start + 4, bytes.len()]) {
                let want = is_safe_context(bytes, start, end, &DEFAULT).unwrap();
                assert_eq!(ctx.is_safe(bytes, end, &DEFAULT).unwrap(), want, "start {start} end {end}");
            }
        }
    }

    #[test]
    fn statement_context_resumes_instead_of_rescanning() {
        let mut ctx = StatementContext::new(0);
        let src = b"int x = 5, y = 6; static final";
        assert!(!ctx.is_safe(src, 9, &DEFAULT).unwrap());
        let paused = ctx.progress[0].next;
        assert!(paused > 0);
        assert!(ctx.is_safe(src, src.len(), &DEFAULT).unwrap());
        assert!(ctx.progress.iter().all(|p| p.found));
    }
}
