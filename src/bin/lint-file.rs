use std::process::ExitCode;

fn main() -> ExitCode {
    edit_hooks::lint_file().into()
}
