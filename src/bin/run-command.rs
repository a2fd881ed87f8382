use std::process::ExitCode;

fn main() -> ExitCode {
    edit_hooks::run_command().into()
}
