//! The rm flag table, shared by structural matching and policy checks.
//!
//! Both consumers read the same table so they cannot drift: the matcher
//! asks "does this token belong to rm or is it an operand?", the policy
//! check asks "what does this token imply about the deletion?".

use once_cell::sync::Lazy;
use regex::Regex;

/// Long options rm accepts, by exact name.
const LONG_FLAGS: &[&str] = &[
    "--recursive",
    "--force",
    "--interactive",
    "--verbose",
    "--dir",
    "--one-file-system",
    "--no-preserve-root",
    "--preserve-root",
];

/// Grouped short flags: -r, -rf, -Rfv, etc.
static SHORT_CLUSTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-[rRfivdI]+$").unwrap());

/// Structural view: does this token belong to rm rather than its operands?
///
/// Unknown `--` options and other dash tokens are treated as operands, so
/// an odd filename is kept rather than silently dropped.
pub fn is_rm_flag(token: &str) -> bool {
    if LONG_FLAGS.contains(&token) {
        return true;
    }
    if token.starts_with("--") {
        return false;
    }
    if token.starts_with('-') && token != "-" {
        return SHORT_CLUSTER_RE.is_match(token);
    }
    false
}

/// What a flag token implies about the deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagEffects {
    pub recursive: bool,
    pub force: bool,
}

/// Policy view of a dash token. Short flags may be grouped (`-rf`, `-fr`),
/// so any occurrence of the letter counts; long names must match exactly.
pub fn flag_effects(token: &str) -> FlagEffects {
    let mut effects = FlagEffects::default();
    match token {
        "--recursive" => effects.recursive = true,
        "--force" => effects.force = true,
        t if t.starts_with('-') && !t.starts_with("--") && t != "-" => {
            effects.recursive = t.contains('r') || t.contains('R');
            effects.force = t.contains('f');
        }
        _ => {}
    }
    effects
}
