pub mod input;

pub use input::{HookInput, InputError, ToolInput};
