//! trash-guard - rm-to-trash rewriting hook.
//!
//! Lexes one-line shell commands, detects destructive `rm` invocations
//! (direct, `xargs rm`, `find -exec rm`), and either rewrites them to a
//! reversible trash command or blocks them under a configurable policy.

pub mod allowlist;
pub mod audit;
pub mod config;
pub mod gate;
pub mod input;
pub mod matcher;
pub mod policy;
pub mod rewrite;
pub mod shell;

pub use config::{CompiledConfig, Config, Mode};
pub use gate::{GateOutcome, evaluate};
pub use input::HookInput;
pub use matcher::{MatchKind, RmMatch, detect_rm};
pub use policy::{Level, PolicyResult, is_dangerous_delete};
pub use rewrite::rewrite_to_trash;
