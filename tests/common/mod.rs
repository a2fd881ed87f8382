// Shared test helpers for the binary-level tests.
#![allow(dead_code)]

use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub fn run_command_bin() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_run-command"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

pub fn lint_file_bin() -> PathBuf {
    let path = PathBuf::from(env!("CARGO_BIN_EXE_lint-file"));
    assert!(path.exists(), "binary not found at {}", path.display());
    path
}

/// Runs `binary` with `args` and `stdin_input`.
/// Returns (stdout, stderr, exit_code).
pub fn run_bin(binary: &Path, args: &[&str], stdin_input: &str) -> (String, String, i32) {
    run_bin_in(binary, &std::env::temp_dir(), args, stdin_input)
}

/// Like [`run_bin`] with the child's working directory set to `cwd`.
pub fn run_bin_in(
    binary: &Path,
    cwd: &Path,
    args: &[&str],
    stdin_input: &str,
) -> (String, String, i32) {
    let output = Command::new(binary)
        .args(args)
        .current_dir(cwd)
        .env_remove("EDIT_HOOKS_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .and_then(|mut child| {
            let write_result = child
                .stdin
                .take()
                .unwrap()
                .write_all(stdin_input.as_bytes());
            if let Err(e) = write_result {
                if e.kind() != ErrorKind::BrokenPipe {
                    return Err(e);
                }
            }
            child.wait_with_output()
        })
        .expect("failed to execute binary");

    let stdout = String::from_utf8(output.stdout).expect("stdout not valid UTF-8");
    let stderr = String::from_utf8(output.stderr).expect("stderr not valid UTF-8");
    let exit_code = output.status.code().unwrap_or(-1);
    (stdout, stderr, exit_code)
}

pub fn run_command(args: &[&str]) -> (String, String, i32) {
    run_bin(&run_command_bin(), args, "")
}

pub fn lint_file(args: &[&str], stdin_input: &str) -> (String, String, i32) {
    run_bin(&lint_file_bin(), args, stdin_input)
}

/// A PostToolUse payload for an Edit of `file_path`.
pub fn edit_input_json(file_path: &str) -> String {
    serde_json::json!({
        "session_id": "sess-e2e-test",
        "transcript_path": "/tmp/transcript.json",
        "cwd": "/tmp/test",
        "hook_event_name": "PostToolUse",
        "tool_name": "Edit",
        "tool_input": {
            "file_path": file_path,
            "old_string": "let",
            "new_string": "const"
        },
        "tool_use_id": "toolu_e2e"
    })
    .to_string()
}
