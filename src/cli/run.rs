use std::io::Write;

use clap::Parser;

use super::{resolve_timeout, CommonArgs};
use crate::exec;
use crate::exit::HookExit;
use crate::relay;

const USAGE: &str =
    "Usage: run-command --command=<command> [--task=<name>] [--timeout=<seconds>]";

/// Run a command as a hook and translate its exit code (0 continue, 2 block, 1 error).
#[derive(Debug, Parser)]
#[command(name = "run-command", version, about)]
pub struct RunArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Name shown in status messages
    #[arg(long, default_value = "task")]
    pub task: String,
}

/// Validate, execute once, relay.
pub fn run<O: Write, E: Write>(args: &RunArgs, out: &mut O, err: &mut E) -> HookExit {
    let line = match args.common.command_line(USAGE, err) {
        Ok(line) => line,
        Err(exit) => return exit,
    };
    let config = match args.common.load_config() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(err, "Config error: {e}");
            return HookExit::ToolingError;
        }
    };
    let timeout = resolve_timeout(args.common.timeout.as_deref(), config.timeout);

    let _ = writeln!(err, "Running {}: {line}", args.task);
    tracing::info!(task = %args.task, command = %line, ?timeout, "running task");
    relay::report(exec::execute(&line, timeout), &args.task, out, err)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn run_with(argv: &[&str]) -> (String, String, HookExit) {
        let argv = std::iter::once("run-command").chain(argv.iter().copied());
        let args = RunArgs::try_parse_from(argv).expect("args should parse");
        let mut out = Vec::new();
        let mut err = Vec::new();
        let exit = run(&args, &mut out, &mut err);
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
            exit,
        )
    }

    #[test]
    fn echo_succeeds_with_verbatim_stdout() {
        let (out, err, exit) = run_with(&["--command=echo hi"]);
        assert_eq!(exit, HookExit::Continue);
        assert_eq!(out, "hi\n");
        assert!(err.contains("task passed"), "{err}");
    }

    #[test]
    fn task_name_labels_status() {
        let (_, err, exit) = run_with(&["--command=true", "--task=typecheck"]);
        assert_eq!(exit, HookExit::Continue);
        assert!(err.contains("typecheck passed"), "{err}");
    }

    #[test]
    fn false_blocks() {
        let (_, _, exit) = run_with(&["--command=false"]);
        assert_eq!(exit, HookExit::Block);
    }

    #[test]
    fn missing_command_prints_usage() {
        let (out, err, exit) = run_with(&[]);
        assert_eq!(exit, HookExit::ToolingError);
        assert!(out.is_empty());
        assert!(err.contains("Usage: run-command"), "{err}");
    }

    #[test]
    fn blank_command_is_usage_error() {
        let (_, err, exit) = run_with(&["--command=   "]);
        assert_eq!(exit, HookExit::ToolingError);
        assert!(err.contains("no command"), "{err}");
    }

    #[test]
    fn unknown_program_is_tooling_error() {
        let (_, err, exit) = run_with(&["--command=no-such-program-93817 --flag"]);
        assert_eq!(exit, HookExit::ToolingError);
        assert!(err.contains("could not run"), "{err}");
    }

    #[test]
    fn timeout_is_tooling_error() {
        let (out, err, exit) = run_with(&["--command=sleep 5", "--timeout=1"]);
        assert_eq!(exit, HookExit::ToolingError);
        assert!(out.is_empty());
        assert!(err.contains("timed out after 1s"), "{err}");
    }

    #[test]
    fn missing_config_file_is_tooling_error() {
        let (_, err, exit) = run_with(&[
            "--command=true",
            "--config",
            "/tmp/edit-hooks-no-such-config.kdl",
        ]);
        assert_eq!(exit, HookExit::ToolingError);
        assert!(err.contains("Config error"), "{err}");
    }

    #[test]
    fn shell_words_keeps_quoted_argument_together() {
        let (out, _, exit) = run_with(&["--command=printf %s 'a b'", "--shell-words"]);
        assert_eq!(exit, HookExit::Continue);
        assert_eq!(out, "a b");
    }
}
