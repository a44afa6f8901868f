//! Command-line tests — spawn the `envhost` binary and check exit status
//! and the standard streams.

mod common;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use common::main_module;

const ENVHOST: &str = env!("CARGO_BIN_EXE_envhost");

fn write_module(dir: &Path, name: &str, wat: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, wat).unwrap();
    path
}

fn envhost(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(ENVHOST)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn envhost");
    {
        let mut pipe = child.stdin.take().unwrap();
        // The child may exit before reading everything; ignore broken pipes.
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── Usage ──

#[test]
fn test_no_arguments_is_usage_error() {
    let out = envhost(&[], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("USAGE"), "stderr: {}", stderr(&out));
    assert!(out.stdout.is_empty());
}

#[test]
fn test_two_arguments_is_usage_error() {
    let out = envhost(&["/nonexistent/a.wasm", "/nonexistent/b.wasm"], "");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("USAGE"), "stderr: {}", err);
    // Neither file was opened.
    assert!(!err.contains("reading"), "stderr: {}", err);
}

#[test]
fn test_bad_option_value_explains_itself() {
    let out = envhost(&["--mode", "browser", "/nonexistent/x.wasm"], "");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.starts_with("USAGE"), "stderr: {}", err);
    assert!(err.contains("browser"), "stderr: {}", err);
    assert!(err.contains("--mode"), "stderr: {}", err);
    assert!(out.stdout.is_empty());
}

#[test]
fn test_non_numeric_page_count_explains_itself() {
    let out = envhost(&["--max-pages", "abc", "/nonexistent/x.wasm"], "");
    assert_eq!(out.status.code(), Some(1));
    let err = stderr(&out);
    assert!(err.contains("--max-pages"), "stderr: {}", err);
    assert!(err.contains("abc"), "stderr: {}", err);
}

#[test]
fn test_help_exits_zero() {
    let out = envhost(&["--help"], "");
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).contains("--mode"));
}

// ── Runs ──

#[test]
fn test_prints_seven_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let wat = r#"
        (module
            (import "env" "print_i32" (func $print_i32 (param i32)))
            (func (export "main") (call $print_i32 (i32.const 7)))
        )
    "#;
    let path = write_module(dir.path(), "seven.wat", wat);

    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "7\n");
}

#[test]
fn test_input_is_floored() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "echo.wat",
        &main_module("(call $print_i32 (call $input_i32))"),
    );

    let out = envhost(&[path.to_str().unwrap()], "3.9\n");
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "input int: 3\n");
}

#[test]
fn test_no_more_input_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "echo.wat",
        &main_module("(call $print_i32 (call $input_i32))"),
    );

    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ABORT: no more input"), "stderr: {}", stderr(&out));
}

#[test]
fn test_invalid_number_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "echo.wat",
        &main_module("(call $print_i32 (call $input_i32))"),
    );

    let out = envhost(&[path.to_str().unwrap()], "abc\n");
    assert_eq!(out.status.code(), Some(1));
    assert!(
        stderr(&out).contains("ABORT: invalid number: abc"),
        "stderr: {}",
        stderr(&out)
    );
}

#[test]
fn test_interactive_flag_reprompts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(
        dir.path(),
        "echo.wat",
        &main_module("(call $print_i32 (call $input_i32))"),
    );

    let out = envhost(&["--mode", "interactive", path.to_str().unwrap()], "abc\n4\n");
    assert_eq!(out.status.code(), Some(0), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "input int: input int: 4\n");
}

#[test]
fn test_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.wasm");
    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("absent.wasm"));
}

#[test]
fn test_invalid_module_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_module(dir.path(), "bad.wasm", "not a module");
    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).starts_with("error:"), "stderr: {}", stderr(&out));
}

#[test]
fn test_guest_abort_import() {
    let dir = tempfile::tempdir().unwrap();
    let wat = common::env_module(
        r#"
        (data (i32.const 0) "bad state")
        (func (export "main") (call $abort (i32.const 0) (i32.const 9)))
        "#,
    );
    let path = write_module(dir.path(), "abort.wat", &wat);
    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("ABORT: bad state"));
}

#[test]
fn test_print_err_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let wat = common::env_module(
        r#"
        (data (i32.const 0) "oops")
        (func (export "main")
            (call $print_err (i32.const 0) (i32.const 4))
            (call $print_i32 (i32.const 0)))
        "#,
    );
    let path = write_module(dir.path(), "err.wat", &wat);
    let out = envhost(&[path.to_str().unwrap()], "");
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(stdout(&out), "0\n");
    assert_eq!(stderr(&out), "ERROR: oops\n");
}
