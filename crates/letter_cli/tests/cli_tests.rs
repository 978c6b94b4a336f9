//! End-to-end tests for the `letter` binary.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// Helper: run `letter` with `args` and no stdin.
fn letter(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_letter"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

/// Helper: write `contents` to a fresh file in the temp directory.
fn temp_source(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("letter_cli_{}_{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_tokens_command() {
    let output = letter(&["tokens", "-e", "X + 5 > 10;"]);
    assert_eq!(output.status.code(), Some(0));
    let rows: Vec<Vec<String>> = stdout(&output)
        .lines()
        .map(|line| line.split_whitespace().map(str::to_string).collect())
        .collect();
    assert_eq!(
        rows,
        vec![
            vec!["IDENTIFIER", "X"],
            vec!["ADDITIVE_OPERATOR", "+"],
            vec!["NUMBER", "5"],
            vec!["RELATIONAL_OPERATOR", ">"],
            vec!["NUMBER", "10"],
            vec![";", ";"],
        ]
    );
}

#[test]
fn test_tokens_lexical_error() {
    let output = letter(&["tokens", "-e", "a @"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("<eval>:1:3: lexical error[1001]"), "{}", stderr(&output));
}

#[test]
fn test_parse_command_compact() {
    let output = letter(&["parse", "--compact", "-e", "x;"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output).trim(),
        r#"{"type":"Program","body":[{"type":"ExpressionStatement","expression":{"type":"Identifier","name":"x"}}]}"#
    );
}

#[test]
fn test_parse_command_pretty() {
    let output = letter(&["parse", "-e", "let a;"]);
    assert_eq!(output.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["body"][0]["type"], "VariableStatement");
    assert!(stdout(&output).lines().count() > 1);
}

#[test]
fn test_parse_syntax_error() {
    let output = letter(&["parse", "-e", "5 = 3;"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(
        stderr(&output).contains("<eval>:1:3: syntax error[2003]: Invalid left-hand side in assignment expression"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn test_parse_reads_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_letter"))
        .args(["parse", "--compact"])
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(b"return;").unwrap();
    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains(r#""type":"ReturnStatement","argument":null"#));
}

#[test]
fn test_max_depth_flag() {
    let output = letter(&["parse", "--max-depth", "4", "-e", "((((((x))))));"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Maximum nesting depth of 4 exceeded"), "{}", stderr(&output));
}

#[test]
fn test_long_chains_fail_cleanly() {
    let path = temp_source("chain.lt", &format!("x{};\n", "+x".repeat(300_000)));
    let output = letter(&["check", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("syntax error[2005]"), "{}", stderr(&output));
    std::fs::remove_file(path).ok();

    let source = format!("a{};", ".b".repeat(50_000));
    let output = letter(&["parse", "--compact", "-e", &source]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_command() {
    let good = temp_source("good.lt", "def f(a) { return a; }\n");
    let bad = temp_source("bad.lt", "let x = 1;\nx y;\n");

    let output = letter(&["check", good.to_str().unwrap(), bad.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains(": ok"));
    let err = stderr(&output);
    assert!(err.contains(":2:3: syntax error[2002]"), "{}", err);
    assert!(err.contains("Found 1 error."), "{}", err);

    std::fs::remove_file(good).ok();
    std::fs::remove_file(bad).ok();
}

#[test]
fn test_check_stats() {
    let path = temp_source("stats.lt", "def add(a, b) { return a + b; }\n");
    let output = letter(&["check", "--stats", path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    let identifier_row = out
        .lines()
        .find(|line| line.trim_start().starts_with("Identifier"))
        .unwrap_or_else(|| panic!("no Identifier row in {}", out));
    assert_eq!(identifier_row.split_whitespace().last(), Some("5"));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_check_missing_file() {
    let output = letter(&["check", "/nonexistent/letter/source.lt"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("cannot read"));
}

#[test]
fn test_usage_error() {
    let output = letter(&["parse", "some_file.lt", "-e", "x;"]);
    assert_eq!(output.status.code(), Some(2));
}
