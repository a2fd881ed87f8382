use std::io::Write;

use crate::exec::{Completed, ExecError};
use crate::exit::HookExit;

/// Relay a command's outcome to the hook's streams and pick the exit code.
///
/// `label` names what ran in status lines: the task name for `run-command`,
/// the file path for `lint-file`. Child stdout is always relayed verbatim
/// when the child finished; child stderr only on failure.
pub fn report<O: Write, E: Write>(
    result: Result<Completed, ExecError>,
    label: &str,
    out: &mut O,
    err: &mut E,
) -> HookExit {
    // Writes to our own stdio are best-effort; the exit code is what matters.
    match result {
        Ok(done) if done.success() => {
            let _ = out.write_all(done.stdout.as_bytes());
            let _ = writeln!(err, "{label} passed");
            HookExit::Continue
        }
        Ok(done) => {
            let _ = out.write_all(done.stdout.as_bytes());
            let _ = err.write_all(done.stderr.as_bytes());
            match done.exit_code {
                Some(code) => {
                    let _ = writeln!(err, "{label} failed (exit code {code})");
                }
                None => {
                    let _ = writeln!(err, "{label} failed (terminated by signal)");
                }
            }
            HookExit::Block
        }
        Err(ExecError::TimedOut { after, .. }) => {
            let _ = writeln!(err, "{label} timed out after {}s", after.as_secs());
            HookExit::ToolingError
        }
        Err(e) => {
            let _ = writeln!(err, "{label} could not run: {e}");
            HookExit::ToolingError
        }
    }
}
