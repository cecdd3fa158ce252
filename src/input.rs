//! Input parsing for hook invocations.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when parsing hook input.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The raw PreToolUse payload.
///
/// The untouched JSON value is kept so that a rewrite can hand back the
/// same object with only the command replaced; every other field, known or
/// not, round-trips unchanged.
#[derive(Debug, Clone)]
pub struct HookInput {
    raw: Value,
}

impl HookInput {
    /// Parse from a JSON string.
    pub fn parse(json: &str) -> Result<Self, InputError> {
        Ok(Self {
            raw: serde_json::from_str(json)?,
        })
    }

    /// The nested `tool_input.command` field, if present.
    pub fn command(&self) -> Option<&str> {
        self.raw.pointer("/tool_input/command").and_then(Value::as_str)
    }

    /// The same payload with the command swapped out.
    pub fn with_command(&self, command: &str) -> Value {
        let mut out = self.raw.clone();
        if let Some(slot) = out.pointer_mut("/tool_input/command") {
            *slot = Value::String(command.to_string());
        }
        out
    }
}
