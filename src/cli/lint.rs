use std::io::{Read, Write};
use std::path::Path;

use clap::Parser;

use super::{resolve_timeout, CommonArgs};
use crate::exec;
use crate::exit::HookExit;
use crate::protocol::HookInput;
use crate::relay;

const USAGE: &str = "Usage: lint-file --command=<command> [--timeout=<seconds>] < hook-input.json";

/// Lint the file named in a hook payload read from stdin.
///
/// The file path is appended as the last argument to --command. Files
/// outside the extension allow-list are skipped with exit 0.
#[derive(Debug, Parser)]
#[command(name = "lint-file", version, about)]
pub struct LintArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Execute the linter flow against `stdin`.
///
/// Order matters: stdin is consumed and validated before anything else is
/// checked, and the file must exist before its extension is considered.
pub fn run<I: Read, O: Write, E: Write>(
    args: &LintArgs,
    stdin: I,
    out: &mut O,
    err: &mut E,
) -> HookExit {
    let input = match HookInput::read(stdin) {
        Ok(input) => input,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            return HookExit::ToolingError;
        }
    };
    let file_path = match input.file_path() {
        Ok(path) => path,
        Err(e) => {
            let _ = writeln!(err, "Error: {e}");
            return HookExit::ToolingError;
        }
    };

    let config = match args.common.load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(err, "Config error: {e}");
            return HookExit::ToolingError;
        }
    };
    let line = match args.common.command_line(USAGE, err) {
        Ok(line) => line,
        Err(exit) => return exit,
    };

    if !Path::new(file_path).exists() {
        let _ = writeln!(err, "Error: file not found: {file_path}");
        return HookExit::ToolingError;
    }

    let extensions = config.lint.extensions.unwrap_or_default();
    if !extensions.matches(file_path) {
        tracing::debug!(file = file_path, allowed = ?extensions.as_slice(), "skipping");
        return HookExit::Continue;
    }

    let timeout = resolve_timeout(args.common.timeout.as_deref(), config.timeout);
    let line = line.with_trailing_arg(file_path);
    let _ = writeln!(err, "Linting {file_path}");
    tracing::info!(command = %line, ?timeout, "linting file");
    relay::report(exec::execute(&line, timeout), file_path, out, err)
}
