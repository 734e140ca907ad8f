use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use magicscan_core::{scan_and_write, OutputFormat, ScanOptions};
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// 命令行入口（基于 clap）；不带子命令时进入交互模式
#[derive(Parser, Debug)]
#[command(name = "magicscan", version, about = "魔法数字扫描器")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 扫描文件或目录并输出报告
    Scan {
        /// 输入文件或目录
        #[arg(long)]
        input: PathBuf,

        /// 输出文件；缺省写到标准输出
        #[arg(long)]
        output: Option<PathBuf>,

        /// 报告格式：text 或 json
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// 线程数（"auto"=CPU 核心数）
        #[arg(long, default_value = "auto")]
        threads: String,

        /// 最大扫描文件大小（单位字节）
        #[arg(long)]
        max_file_size: Option<u64>,

        /// 配置文件路径（TOML），默认 ./magicscan.toml（存在时）
        #[arg(long)]
        config: Option<PathBuf>,

        /// 跳过常量块时不累计其中的换行（复现旧版行号）
        #[arg(long)]
        legacy_line_drift: bool,
    },
    /// 交互模式：提示输入文件名并打印报告
    Prompt,
}

fn main() -> Result<()> {
    // 初始化日志（支持通过 RUST_LOG 控制等级，例如 info、debug）
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Scan { input, output, format, threads, max_file_size, config, legacy_line_drift }) => {
            info!(?input, ?output, "starting scan");

            let format = match format.as_str() {
                "json" => OutputFormat::Json,
                _ => OutputFormat::Text,
            };
            let opts = ScanOptions {
                max_file_size,
                format,
                config_path: config,
                legacy_line_drift,
                threads: parse_threads(&threads)?,
            };

            let mut out: Box<dyn Write> = match &output {
                Some(path) => Box::new(BufWriter::new(File::create(path).context("create output file")?)),
                None => Box::new(BufWriter::new(io::stdout().lock())),
            };
            let stats = scan_and_write(&input, &mut out, &opts).context("scan and write failed")?;

            info!(
                files_scanned = stats.files_scanned,
                files_skipped = stats.files_skipped,
                files_failed = stats.files_failed,
                findings = stats.findings_written,
                "scan finished"
            );
        }
        Some(Commands::Prompt) | None => {
            let stdin = io::stdin();
            run_prompt(&mut stdin.lock(), &mut io::stdout().lock())?;
        }
    }

    Ok(())
}

/// 交互模式：读取一行文件名，扫描并打印文本报告
fn run_prompt(input: &mut dyn BufRead, out: &mut dyn Write) -> Result<()> {
    write!(out, "Enter file to scan: ")?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("read file name")?;
    let file = line.trim();
    if file.is_empty() {
        bail!("no file name given");
    }

    let opts = ScanOptions { threads: Some(1), ..ScanOptions::default() };
    scan_and_write(Path::new(file), out, &opts).with_context(|| format!("scan {file}"))?;
    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};
    // 日志写到 stderr，避免混入 stdout 上的报告
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// 解析线程参数："auto" → None；其他必须为正整数
fn parse_threads(s: &str) -> Result<Option<usize>> {
    if s.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    match s.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(Some(n)),
        _ => bail!("invalid --threads value: {s}"),
    }
}
