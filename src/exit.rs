use std::process::ExitCode;

/// Exit status understood by the hook caller.
///
/// Claude Code reads the process exit code of a hook: 0 lets the edit
/// proceed, 2 blocks it and feeds stderr back to the model, anything else is
/// shown to the user as a hook error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookExit {
    /// Command succeeded, or there was nothing to do.
    Continue,
    /// Usage, input, precondition or execution trouble, or a timeout.
    ToolingError,
    /// The wrapped command ran and returned non-zero.
    Block,
}

impl HookExit {
    pub fn code(self) -> u8 {
        match self {
            HookExit::Continue => 0,
            HookExit::ToolingError => 1,
            HookExit::Block => 2,
        }
    }
}

impl From<HookExit> for ExitCode {
    fn from(exit: HookExit) -> Self {
        ExitCode::from(exit.code())
    }
}
