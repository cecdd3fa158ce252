//! Block/allow policy for destructive delete commands.
//!
//! Independent of the matcher: this pass looks at the whole command string,
//! finds the first command word, and computes risk predicates from its
//! arguments. Compound commands are the caller's concern.

use serde::Deserialize;

use crate::shell::{flags::flag_effects, parse_prefix, tokenize};

/// Policy strictness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Block only force+recursive deletes.
    Normal,
    /// Block recursive or wildcard deletes.
    #[default]
    Strict,
}

/// Outcome of a policy check over one command string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyResult {
    pub blocked: bool,
    pub reason: Option<String>,
    pub suggestion: Option<String>,
}

impl PolicyResult {
    fn allow() -> Self {
        Self::default()
    }

    fn block(reason: &str, suggestion: &str) -> Self {
        Self {
            blocked: true,
            reason: Some(reason.to_string()),
            suggestion: Some(suggestion.to_string()),
        }
    }
}

/// Decide whether `command` is a delete invocation the given level blocks.
///
/// Only the first command word is examined, behind any env assignments and
/// a sudo invocation. Non-rm commands never block; neither does a bare
/// `rm` with no operands.
pub fn is_dangerous_delete(command: &str, level: Level) -> PolicyResult {
    let tokens = tokenize(command.trim());
    if tokens.is_empty() {
        return PolicyResult::allow();
    }

    let prefix = parse_prefix(&tokens);
    let cmd = prefix.rest;
    if cmd >= tokens.len() || tokens[cmd].value != "rm" {
        return PolicyResult::allow();
    }

    let mut has_recursive = false;
    let mut has_force = false;
    let mut has_wildcard = false;

    let mut args = tokens[cmd + 1..].iter();
    while let Some(token) = args.next() {
        let value = token.value.as_str();

        if value == "--" {
            // Everything after -- is an operand.
            for rest in args.by_ref() {
                if has_glob_chars(rest.unquoted()) {
                    has_wildcard = true;
                }
            }
            break;
        }

        if value.starts_with('-') && value != "-" {
            let fx = flag_effects(value);
            has_recursive |= fx.recursive;
            has_force |= fx.force;
            continue;
        }

        if has_glob_chars(token.unquoted()) {
            has_wildcard = true;
        }
    }

    match level {
        Level::Normal => {
            if has_recursive && has_force {
                PolicyResult::block(
                    "Detected a force+recursive delete (rm -rf)",
                    "Use a trash command instead of rm -rf",
                )
            } else {
                PolicyResult::allow()
            }
        }
        Level::Strict => {
            if has_recursive {
                PolicyResult::block(
                    "Detected a recursive delete (rm -r)",
                    "Use a trash command instead of rm -r",
                )
            } else if has_wildcard {
                PolicyResult::block(
                    "Detected a wildcard delete (rm *)",
                    "Use a trash command or be explicit about files",
                )
            } else {
                // Force without recursion or a wildcard stays allowed.
                PolicyResult::allow()
            }
        }
    }
}

/// Conservative glob detection: any of the common metacharacters counts,
/// quoted or not.
fn has_glob_chars(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}
