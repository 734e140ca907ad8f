//! 扫描主流程与并行调度
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{resolve_config, ScanConfig};
use crate::options::{LexOptions, OutputFormat, ScanOptions, ScanStats};
use crate::profiles::Profile;
use crate::report::{FileReport, ScanStatus};
use crate::types::{OutputItem, StatusItem};

/// 读取并扫描单个文件（整读入内存）
/// - 扩展名无对应规则：`Unsupported`
/// - 读取失败或输入畸形：`Failed`，不保留任何部分结果
pub fn scan_file<S: AsRef<str>>(path: &Path, lex: &LexOptions, extensions: &[S]) -> FileReport {
    let file = path.display().to_string();
    let Some(profile) = Profile::from_path(path, extensions) else {
        debug!(path = %file, "no lexical profile for file");
        return FileReport { file, status: ScanStatus::Unsupported };
    };

    let src = match std::fs::read(path) {
        Ok(buf) => buf,
        Err(e) => {
            warn!(path = %file, error = %e, "read failed");
            return FileReport { file, status: ScanStatus::Failed(e.to_string()) };
        }
    };

    let mut findings = Vec::new();
    let status = match profile.scan(&src, lex, &mut findings) {
        Ok(()) => {
            debug!(path = %file, findings = findings.len(), "file scanned");
            ScanStatus::Scanned(findings)
        }
        Err(e) => {
            warn!(path = %file, error = %e, "malformed input, file skipped");
            ScanStatus::Failed(e.to_string())
        }
    };
    FileReport { file, status }
}

/// 扫描输入（文件或目录）并按 `opts.format` 写出报告
/// 稳定性保证：目录内文件按路径排序；并行与串行输出完全一致
/// - 文本：每个文件一段，未扫描的文件给出原因
/// - JSON：命中行 `{file, line, value}`；未扫描的文件各占一行 `{file, status, reason?}`
pub fn scan_and_write(input: &Path, out: &mut dyn Write, opts: &ScanOptions) -> Result<ScanStats> {
    let config = resolve_config(opts.config_path.as_deref())?;
    let job = Arc::new(ScanJob::new(&config, opts));

    let files = collect_files(input, &job.extensions)?;
    info!(input = %input.display(), files = files.len(), "collected input files");

    let threads = opts.threads.unwrap_or_else(num_cpus::get);
    let mut sink = ReportWriter::new(out, opts.format);
    sink.begin()?;

    if threads > 1 && files.len() > 1 {
        scan_and_write_parallel(&files, &mut sink, &job, threads)?;
    } else {
        for path in &files {
            sink.write(job.run(path))?;
        }
    }

    sink.finish()
}

/// 单文件扫描所需的全部参数（跨线程共享）
struct ScanJob {
    lex: LexOptions,
    extensions: Vec<String>,
    max_file_size: Option<u64>,
}

impl ScanJob {
    fn new(config: &ScanConfig, opts: &ScanOptions) -> Self {
        Self {
            lex: config.lex_options(opts),
            extensions: config.extensions.clone(),
            max_file_size: config.max_file_size(opts),
        }
    }

    fn run(&self, path: &Path) -> FileReport {
        if let Some(max) = self.max_file_size {
            if let Ok(md) = std::fs::metadata(path) {
                if md.len() > max {
                    info!(path = %path.display(), size = md.len(), max, "file exceeds size limit, skipped");
                    let file = path.display().to_string();
                    return FileReport { file, status: ScanStatus::TooLarge { size: md.len(), max } };
                }
            }
        }
        scan_file(path, &self.lex, &self.extensions)
    }
}

/// 收集待扫描文件
/// - 输入为文件：原样扫描（即使扩展名不受支持，也输出“not scanned”）
/// - 输入为目录：递归遍历，只保留有对应规则的文件
fn collect_files(input: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("input not found: {}", input.display());
    }

    let mut files: Vec<PathBuf> = vec![];
    for entry in WalkDir::new(input).min_depth(1) {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "directory walk error");
                continue;
            }
        };
        if entry.file_type().is_file() && Profile::from_path(entry.path(), extensions).is_some() {
            files.push(entry.into_path());
        }
    }
    // 按路径排序，确保输出顺序稳定
    files.sort();
    Ok(files)
}

/// 报告写出器：维护 JSON 数组分隔符与统计
struct ReportWriter<'w> {
    out: &'w mut dyn Write,
    format: OutputFormat,
    first: bool,
    stats: ScanStats,
}

impl<'w> ReportWriter<'w> {
    fn new(out: &'w mut dyn Write, format: OutputFormat) -> Self {
        Self { out, format, first: true, stats: ScanStats::default() }
    }

    fn begin(&mut self) -> Result<()> {
        if self.format == OutputFormat::Json {
            write!(self.out, "[")?;
        }
        Ok(())
    }

    fn write(&mut self, report: FileReport) -> Result<()> {
        match &report.status {
            ScanStatus::Scanned(_) => self.stats.files_scanned += 1,
            ScanStatus::Unsupported | ScanStatus::TooLarge { .. } => self.stats.files_skipped += 1,
            ScanStatus::Failed(_) => self.stats.files_failed += 1,
        }

        match self.format {
            OutputFormat::Text => writeln!(self.out, "{report}")?,
            OutputFormat::Json => match &report.status {
                ScanStatus::Scanned(findings) => {
                    for f in findings {
                        self.json_item(&OutputItem { file: &report.file, line: f.line, value: &f.text })?;
                    }
                }
                status => {
                    self.json_item(&StatusItem { file: &report.file, status: status.label(), reason: status.reason() })?;
                }
            },
        }
        self.stats.findings_written += report.findings().len();
        Ok(())
    }

    fn json_item<T: Serialize>(&mut self, item: &T) -> Result<()> {
        if !self.first { write!(self.out, ",")?; } else { self.first = false; }
        serde_json::to_writer(&mut *self.out, item)?;
        Ok(())
    }

    fn finish(self) -> Result<ScanStats> {
        if self.format == OutputFormat::Json {
            write!(self.out, "]")?;
        }
        self.out.flush().context("flush report")?;
        Ok(self.stats)
    }
}

/// 并行调度：
/// - Rayon 线程池并行扫描文件
/// - 单线程 Writer 按 idx 重排并流式写出，保证与串行一致的顺序
fn scan_and_write_parallel(
    files: &[PathBuf],
    sink: &mut ReportWriter<'_>,
    job: &Arc<ScanJob>,
    threads: usize,
) -> Result<()> {
    use crossbeam_channel as channel;
    use rayon::prelude::*;
    use std::collections::BTreeMap;

    // 通道用于 worker → writer 传递结果
    type Msg = (usize /*idx*/, FileReport);
    let (tx, rx) = channel::bounded::<Msg>(256);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .context("build rayon pool")?;
    let job = Arc::clone(job);
    let files_vec: Vec<(usize, PathBuf)> = files.iter().cloned().enumerate().collect();

    // Writer 保持在当前线程，扫描在后台线程的线程池内执行
    let scan_thread = std::thread::spawn(move || {
        pool.install(|| {
            files_vec.par_iter().for_each(|(idx, path)| {
                let _ = tx.send((*idx, job.run(path)));
            });
        });
        // 结束后 Sender 被丢弃，Receiver 将收到关闭信号
    });

    let mut next_idx: usize = 0;
    let mut pending: BTreeMap<usize, FileReport> = BTreeMap::new();

    while let Ok((idx, report)) = rx.recv() {
        pending.insert(idx, report);
        while let Some(report) = pending.remove(&next_idx) {
            sink.write(report)?;
            next_idx += 1;
        }
    }

    if scan_thread.join().is_err() || next_idx != files.len() {
        bail!("scan worker terminated early ({next_idx}/{} files reported)", files.len());
    }
    Ok(())
}
