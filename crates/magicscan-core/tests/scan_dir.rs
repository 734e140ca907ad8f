//! 文件 / 目录扫描与报告输出

use magicscan_core::{scan_and_write, OutputFormat, ScanOptions, ScanStats};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn fixture() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("pkg")).unwrap();
    fs::write(root.join("A.java"), "class A {\n  int x = 42;\n}\n").unwrap();
    fs::write(root.join("B.java"), "class B {\n  static final int K = 7;\n}\n").unwrap();
    fs::write(root.join("pkg/C.java"), "class C {\n  String s = \"hi\";\n  int y = 3;\n}\n").unwrap();
    fs::write(root.join("pkg/Broken.java"), "class D {\n /* open\n").unwrap();
    fs::write(root.join("notes.txt"), "int z = 99;").unwrap();
    dir
}

fn run(input: &Path, opts: &ScanOptions) -> (String, ScanStats) {
    let mut out = Vec::new();
    let stats = scan_and_write(input, &mut out, opts).unwrap();
    (String::from_utf8(out).unwrap(), stats)
}

#[test]
fn text_report_for_directory() {
    let dir = fixture();
    let root = dir.path();
    let opts = ScanOptions { threads: Some(1), ..ScanOptions::default() };
    let (text, stats) = run(root, &opts);

    let expected = format!(
        "{a} has 1 magic numbers:\n\t@ Line 2: 42\n\
         {b} has no magic numbers.\n\
         {broken} not scanned: unterminated block comment starting at line 2 (offset 11)\n\
         {c} has 2 magic numbers:\n\t@ Line 2: \"hi\"\n\t@ Line 3: 3\n",
        a = root.join("A.java").display(),
        b = root.join("B.java").display(),
        broken = root.join("pkg/Broken.java").display(),
        c = root.join("pkg/C.java").display(),
    );
    assert_eq!(text, expected);
    assert_eq!(stats, ScanStats { files_scanned: 3, files_skipped: 0, files_failed: 1, findings_written: 3 });
}

#[test]
fn json_report_lists_findings() {
    let dir = fixture();
    let opts = ScanOptions { threads: Some(1), format: OutputFormat::Json, ..ScanOptions::default() };
    let (text, stats) = run(dir.path(), &opts);

    let items: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
    let rows: Vec<(u64, &str)> = items
        .iter()
        .filter_map(|v| Some((v.get("line")?.as_u64()?, v["value"].as_str()?)))
        .collect();
    assert_eq!(rows, vec![(2, "42"), (2, "\"hi\""), (3, "3")]);
    assert!(items[0]["file"].as_str().unwrap().ends_with("A.java"));
    assert_eq!(stats.findings_written, 3);

    // 失败的文件也占一行，位于报告顺序中的原位置
    assert_eq!(items.len(), 4);
    assert!(items[1]["file"].as_str().unwrap().ends_with("Broken.java"));
    assert_eq!(items[1]["status"], "failed");
    assert_eq!(items[1]["reason"], "unterminated block comment starting at line 2 (offset 11)");
}

#[test]
fn parallel_output_matches_serial() {
    let dir = fixture();
    for i in 0..20 {
        fs::write(dir.path().join(format!("Gen{i:02}.java")), format!("class G{i} {{ int v = {}; }}", i + 10)).unwrap();
    }
    for format in [OutputFormat::Text, OutputFormat::Json] {
        let serial = run(dir.path(), &ScanOptions { threads: Some(1), format, ..ScanOptions::default() });
        let parallel = run(dir.path(), &ScanOptions { threads: Some(4), format, ..ScanOptions::default() });
        assert_eq!(serial, parallel);
    }
}

#[test]
fn single_unsupported_file_is_not_scanned() {
    let dir = fixture();
    let path = dir.path().join("notes.txt");
    let (text, stats) = run(&path, &ScanOptions::default());
    assert_eq!(text, format!("{} not scanned.\n", path.display()));
    assert_eq!(stats.files_skipped, 1);
}

#[test]
fn config_file_extends_extensions_and_limits_size() {
    let dir = fixture();
    let cfg = dir.path().join("magicscan.toml");
    fs::write(&cfg, "extensions = [\"java\", \"txt\"]\nmax_file_size = 20\n").unwrap();
    let opts = ScanOptions { threads: Some(1), config_path: Some(cfg), format: OutputFormat::Json, ..ScanOptions::default() };
    let (text, stats) = run(dir.path(), &opts);

    let items: Vec<serde_json::Value> = serde_json::from_str(&text).unwrap();
    // A / B / C 均超出上限；Broken.java（19 字节）与 notes.txt 参与扫描
    let rows: Vec<(&str, &str)> = items
        .iter()
        .map(|v| {
            let name = v["file"].as_str().unwrap().rsplit(['/', '\\']).next().unwrap();
            (name, v.get("value").or_else(|| v.get("status")).unwrap().as_str().unwrap())
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("A.java", "too_large"),
            ("B.java", "too_large"),
            ("notes.txt", "99"),
            ("Broken.java", "failed"),
            ("C.java", "too_large"),
        ]
    );
    assert_eq!(items[0]["reason"], "26 bytes exceeds the 20 byte limit");
    assert_eq!(stats, ScanStats { files_scanned: 1, files_skipped: 3, files_failed: 1, findings_written: 1 });
}

#[test]
fn legacy_line_drift_option() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("T.java");
    fs::write(&path, "static final int[] T = {\n 2,\n 3\n};\nint x = 42;\n").unwrap();

    let (fixed, _) = run(&path, &ScanOptions::default());
    assert!(fixed.ends_with("@ Line 5: 42\n"));
    let (legacy, _) = run(&path, &ScanOptions { legacy_line_drift: true, ..ScanOptions::default() });
    assert!(legacy.ends_with("@ Line 2: 42\n"));
}

#[test]
fn missing_input_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::new();
    assert!(scan_and_write(&dir.path().join("nope"), &mut out, &ScanOptions::default()).is_err());
}
