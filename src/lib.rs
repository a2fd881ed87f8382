pub mod command;
pub mod config;
pub mod exec;
pub mod exit;
pub mod lint;
pub mod protocol;
pub mod relay;

pub(crate) mod cli;
pub(crate) mod logging;

pub use exit::HookExit;

/// Entry point for the `run-command` binary.
///
/// Parses process arguments and runs against the real stdio. Library
/// callers should use [`command`], [`exec`] and [`relay`] directly.
pub fn run_command() -> HookExit {
    logging::init();
    match cli::parse_args::<cli::run::RunArgs, _>(std::env::args_os()) {
        Ok(args) => cli::run::run(&args, &mut std::io::stdout(), &mut std::io::stderr()),
        Err(exit) => exit,
    }
}

/// Entry point for the `lint-file` binary: reads the hook payload from stdin.
pub fn lint_file() -> HookExit {
    logging::init();
    match cli::parse_args::<cli::lint::LintArgs, _>(std::env::args_os()) {
        Ok(args) => cli::lint::run(
            &args,
            std::io::stdin().lock(),
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        ),
        Err(exit) => exit,
    }
}
