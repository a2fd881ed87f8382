use std::io::Read;

use serde::Deserialize;

/// The JSON payload Claude Code sends on stdin for a file-edit hook.
///
/// Only `tool_input.file_path` is consumed. Every other field, known or not,
/// is ignored so the hook keeps working as the payload grows.
#[derive(Debug, Default, Deserialize)]
pub struct HookInput {
    #[serde(default)]
    pub tool_input: ToolInput,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolInput {
    /// Kept as a raw value so a non-string path reports as missing, not as
    /// malformed JSON.
    #[serde(default)]
    pub file_path: Option<serde_json::Value>,
}

/// Errors reading or interpreting the stdin payload.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("failed to read stdin: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid JSON on stdin: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing tool_input.file_path in hook input")]
    MissingFilePath,
}

impl HookInput {
    /// Read one JSON document from `reader` until EOF.
    pub fn read<R: Read>(mut reader: R) -> Result<Self, InputError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    pub fn parse(input: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(input)?)
    }

    /// The edited file's path. Absent, non-string and empty all count as missing.
    pub fn file_path(&self) -> Result<&str, InputError> {
        match self.tool_input.file_path.as_ref().and_then(|v| v.as_str()) {
            Some(path) if !path.is_empty() => Ok(path),
            _ => Err(InputError::MissingFilePath),
        }
    }
}
