pub mod lint;
pub mod run;

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser};

use crate::command::{CommandLine, Tokenizer};
use crate::config::Config;
use crate::exit::HookExit;

/// Used when neither `--timeout` nor the config file sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Flags shared by both hooks.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Command to run, split on whitespace into program and arguments
    #[arg(long)]
    pub command: Option<String>,

    /// Seconds to wait before killing the command (default 30)
    #[arg(long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub timeout: Option<String>,

    /// Split --command with shell quoting rules instead of plain whitespace
    #[arg(long)]
    pub shell_words: bool,

    /// Path to a KDL config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl CommonArgs {
    fn tokenizer(&self) -> Tokenizer {
        if self.shell_words {
            Tokenizer::Shell
        } else {
            Tokenizer::Whitespace
        }
    }

    /// Load the `--config` file, or defaults without one.
    fn load_config(&self) -> Result<Config, crate::config::ConfigError> {
        match &self.config {
            Some(path) => Config::load(path),
            None => Ok(Config::default()),
        }
    }

    /// Tokenize `--command`, writing usage to `err` when it is absent or blank.
    fn command_line<E: Write>(&self, usage: &str, err: &mut E) -> Result<CommandLine, HookExit> {
        let raw = self.command.as_deref().unwrap_or_default();
        match CommandLine::parse(raw, self.tokenizer()) {
            Ok(Some(line)) => Ok(line),
            Ok(None) => {
                let _ = writeln!(err, "Error: no command given");
                let _ = writeln!(err, "{usage}");
                Err(HookExit::ToolingError)
            }
            Err(e) => {
                let _ = writeln!(err, "Error: {e}");
                Err(HookExit::ToolingError)
            }
        }
    }
}

/// `--timeout` if it is a positive integer, else the config value, else 30s.
///
/// Unparseable flag values fall back silently so a typo in a hook
/// definition never turns into a blocked edit.
pub fn resolve_timeout(flag: Option<&str>, configured: Option<Duration>) -> Duration {
    flag.and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs)
        .or(configured)
        .unwrap_or(DEFAULT_TIMEOUT)
}

/// Parse arguments, mapping clap's own exits onto the hook convention.
///
/// Help and version print to stdout and exit 0. Anything else clap rejects
/// is a usage error (1), never clap's default 2, which would block the edit.
pub fn parse_args<T, I>(args: I) -> Result<T, HookExit>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        if e.use_stderr() {
            HookExit::ToolingError
        } else {
            HookExit::Continue
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_flag_wins() {
        assert_eq!(
            resolve_timeout(Some("5"), Some(Duration::from_secs(60))),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn non_numeric_timeout_falls_back_to_default() {
        assert_eq!(resolve_timeout(Some("soon"), None), DEFAULT_TIMEOUT);
        assert_eq!(resolve_timeout(Some("1.5"), None), DEFAULT_TIMEOUT);
        assert_eq!(resolve_timeout(Some(""), None), DEFAULT_TIMEOUT);
    }

    #[test]
    fn non_positive_timeout_falls_back() {
        assert_eq!(resolve_timeout(Some("0"), None), DEFAULT_TIMEOUT);
        assert_eq!(resolve_timeout(Some("-3"), None), DEFAULT_TIMEOUT);
    }

    #[test]
    fn bad_flag_falls_back_to_config() {
        assert_eq!(
            resolve_timeout(Some("x"), Some(Duration::from_secs(12))),
            Duration::from_secs(12)
        );
    }

    #[test]
    fn no_flag_no_config_is_thirty_seconds() {
        assert_eq!(resolve_timeout(None, None), Duration::from_secs(30));
    }

    #[test]
    fn unknown_flag_is_tooling_error() {
        let result = parse_args::<run::RunArgs, _>(["run-command", "--bogus"]);
        assert_eq!(result.unwrap_err(), HookExit::ToolingError);
    }

    #[test]
    fn help_is_continue() {
        let result = parse_args::<run::RunArgs, _>(["run-command", "-h"]);
        assert_eq!(result.unwrap_err(), HookExit::Continue);
    }
}
