//! Callback contract for host runtimes that gate commands before they run.
//!
//! A host hands in one command string; the outcome says whether to run it
//! unchanged, refuse it, or run a substitute. The policy check decides
//! danger; `mode` decides which of the two interventions applies.

use serde_json::Value;

use crate::config::{CompiledConfig, Mode};
use crate::policy::is_dangerous_delete;
use crate::rewrite::rewrite_to_trash;

/// What the host should do with a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Run the command as-is.
    Allow,
    /// Refuse to run it.
    Deny { reason: String, suggestion: String },
    /// Run this command instead.
    Rewrite { command: String },
}

impl GateOutcome {
    pub fn is_allow(&self) -> bool {
        matches!(self, GateOutcome::Allow)
    }
}

/// Evaluate one command under the configured mode and level.
///
/// Allow-listed commands pass untouched. In rewrite mode the substitute
/// command carries a prepended `echo` notice explaining the change; if the
/// rewriter finds nothing to change the command is allowed after all.
pub fn evaluate(command: &str, config: &CompiledConfig) -> GateOutcome {
    if config.is_allowlisted(command) {
        return GateOutcome::Allow;
    }

    let result = is_dangerous_delete(command, config.raw.level);
    if !result.blocked {
        return GateOutcome::Allow;
    }

    let trash_cmd = config.trash_command();
    match config.raw.mode {
        Mode::Deny => GateOutcome::Deny {
            reason: result.reason.unwrap_or_default(),
            suggestion: result
                .suggestion
                .unwrap_or_else(|| format!("Use '{trash_cmd}' instead of 'rm -rf'")),
        },
        Mode::Rewrite => {
            let rewritten = rewrite_to_trash(command, trash_cmd);
            if rewritten == command {
                return GateOutcome::Allow;
            }
            let note = format!(
                "[trash-guard] Rewrote '{command}' to '{rewritten}'. Please use \
                 '{trash_cmd} <path>' instead of 'rm -rf' for safe deletion."
            );
            // JSON string encoding doubles as shell-safe double quoting.
            let quoted = Value::String(note).to_string();
            GateOutcome::Rewrite {
                command: format!("echo {quoted} && {rewritten}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::policy::Level;

    fn compiled(config: Config) -> CompiledConfig {
        Config {
            trash_command: Some("trash".to_string()),
            ..config
        }
        .compile()
        .unwrap()
    }

    #[test]
    fn test_safe_command_allowed() {
        let config = compiled(Config::default());
        assert!(evaluate("ls -la", &config).is_allow());
    }

    #[test]
    fn test_rewrite_mode_substitutes() {
        let config = compiled(Config::default());
        match evaluate("rm -rf build", &config) {
            GateOutcome::Rewrite { command } => {
                assert!(command.starts_with("echo \"[trash-guard]"));
                assert!(command.ends_with("&& trash build"));
            }
            other => panic!("expected rewrite, got {other:?}"),
        }
    }

    #[test]
    fn test_deny_mode_blocks_with_reason() {
        let config = compiled(Config {
            mode: Mode::Deny,
            ..Default::default()
        });
        match evaluate("rm -r src", &config) {
            GateOutcome::Deny { reason, suggestion } => {
                assert!(!reason.is_empty());
                assert!(!suggestion.is_empty());
            }
            other => panic!("expected deny, got {other:?}"),
        }
    }

    #[test]
    fn test_allowlisted_command_passes() {
        let config = compiled(Config {
            allowlist: vec!["rm -rf /tmp/*".to_string()],
            ..Default::default()
        });
        assert!(evaluate("rm -rf /tmp/build", &config).is_allow());
        assert!(!evaluate("rm -rf /home/x", &config).is_allow());
    }

    #[test]
    fn test_normal_level_lets_recursive_through() {
        let config = compiled(Config {
            level: Level::Normal,
            ..Default::default()
        });
        assert!(evaluate("rm -r dir", &config).is_allow());
    }

    #[test]
    fn test_rewrite_keeps_wildcard_quoting() {
        let config = compiled(Config::default());
        match evaluate("rm -r '*'", &config) {
            GateOutcome::Rewrite { command } => {
                assert!(command.contains("trash '*'"));
            }
            other => panic!("expected rewrite, got {other:?}"),
        }
    }
}
