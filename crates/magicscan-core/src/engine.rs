//! 语句 / 作用域扫描引擎（C 系词法）
//!
//! 从左到右遍历源码，维护当前语句起点；遇到 `{` 时把嵌套作用域压入显式的帧栈，
//! 嵌套深度不受线程栈大小限制。
//! 只有这里的遍历是“权威”的：行计数只在此处（以及它显式请求计行的原语中）递增。
//!
//! 安全上下文中的花括号块不进入扫描。默认仍会把块内换行计入行号；
//! `legacy_line_drift` 复现旧行为（不计这些换行，之后的行号偏小）。
use tracing::trace;

use crate::context::StatementContext;
use crate::error::ScanError;
use crate::findings::{is_in_discovery_order, Finding};
use crate::literals::{identifier_end, is_part_of_identifier, is_valid_stray_number, number_end};
use crate::options::LexOptions;
use crate::skip::{skip_comment, skip_paired_brace, skip_quoted, Skip};

/// 单个缓冲区一次扫描的可变状态；所有帧共享
struct ScanState {
    line: usize,
    findings: Vec<Finding>,
}

impl ScanState {
    /// 把一次计行遍历的结果并入行计数，返回新的游标
    fn advance(&mut self, skip: Skip) -> usize {
        self.line += skip.newlines;
        skip.end
    }
}

/// 一个待扫描的作用域 `[cur, end)` 及其当前语句
struct Frame {
    cur: usize,
    end: usize,
    stmt: StatementContext,
}

impl Frame {
    fn new(start: usize, end: usize) -> Self {
        Self { cur: start, end, stmt: StatementContext::new(start) }
    }
}

struct ScopeScanner<'a> {
    src: &'a [u8],
    lex: &'a LexOptions,
}

impl ScopeScanner<'_> {
    fn report(&self, state: &mut ScanState, line: usize, start: usize, end: usize) {
        trace!(line, start, end, "magic literal");
        state.findings.push(Finding::new(line, start, &self.src[start..end]));
    }

    /// 扫描 `[start, end)`
    /// 栈顶帧先扫完，外层帧再从块的 `}` 之后继续，因此发现顺序与源码顺序一致
    fn scan_range(&self, state: &mut ScanState, start: usize, end: usize) -> Result<(), ScanError> {
        let src = self.src;
        let keywords = &self.lex.safe_keywords;
        let mut stack = vec![Frame::new(start, end)];

        while let Some(frame) = stack.last_mut() {
            let cur = frame.cur;
            if cur >= frame.end {
                stack.pop();
                continue;
            }

            let mut nested = None;
            match src[cur] {
                b'\n' => {
                    state.line += 1;
                    frame.cur += 1;
                }
                b'/' => frame.cur = state.advance(skip_comment(src, cur, true)?),
                b'{' => {
                    let body = cur + 1;
                    let close = skip_paired_brace(src, cur)?;
                    // 语句范围止于 `{` 前一个字符之前
                    if !frame.stmt.is_safe(src, cur.saturating_sub(1), keywords)? {
                        nested = Some(Frame::new(body, close - 1));
                    } else if !self.lex.legacy_line_drift {
                        state.line += bytecount::count(&src[body..close], b'\n');
                    }
                    frame.stmt = StatementContext::new(close);
                    frame.cur = close;
                }
                b';' => {
                    frame.cur += 1;
                    frame.stmt = StatementContext::new(frame.cur);
                }
                b'"' | b'\'' => {
                    let line = state.line;
                    let lit_end = state.advance(skip_quoted(src, cur, true)?);
                    frame.cur = lit_end;
                    if !frame.stmt.is_safe(src, lit_end, keywords)? {
                        self.report(state, line, cur, lit_end);
                    }
                }
                b if b.is_ascii_digit() => {
                    if is_part_of_identifier(src, cur) || is_valid_stray_number(src, cur) {
                        frame.cur = identifier_end(src, cur);
                    } else {
                        let num_end = number_end(src, cur);
                        if !frame.stmt.is_safe(src, cur, keywords)? {
                            let line = state.line;
                            self.report(state, line, cur, num_end);
                        }
                        frame.cur = num_end;
                    }
                }
                _ => frame.cur += 1,
            }

            if let Some(child) = nested {
                stack.push(child);
            }
        }
        Ok(())
    }
}

/// 扫描整个源码缓冲区，把魔法数字按发现顺序追加到 `findings`
/// - 输入畸形（未闭合的注释 / 字面量 / 花括号）时返回错误，`findings` 保持不变
pub fn scan_source(src: &[u8], lex: &LexOptions, findings: &mut Vec<Finding>) -> Result<(), ScanError> {
    let scanner = ScopeScanner { src, lex };
    let mut state = ScanState { line: 1, findings: Vec::new() };
    scanner.scan_range(&mut state, 0, src.len())?;
    debug_assert!(is_in_discovery_order(&state.findings));
    findings.append(&mut state.findings);
    Ok(())
}

/// 便捷入口：默认参数扫描一段文本
pub fn scan_text(text: &str) -> Result<Vec<Finding>, ScanError> {
    let mut findings = Vec::new();
    scan_source(text.as_bytes(), &LexOptions::default(), &mut findings)?;
    Ok(findings)
}
