//! Detection of rm invocations inside command segments.

use crate::shell::{Segment, Token, flags::is_rm_flag, parse_prefix, split_commands};

/// How an rm invocation appears in a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// `rm ...`, possibly behind env assignments and sudo.
    Direct,
    /// `xargs [flags] rm ...`; operands also arrive on stdin.
    Xargs,
    /// `find ... -exec rm ... ;` (or `-execdir`).
    FindExec,
}

/// One detected rm invocation. At most one per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RmMatch {
    pub segment_index: usize,
    pub kind: MatchKind,
    /// Leading `NAME=value` assignments, space-joined. Empty unless Direct.
    pub env_prefix: String,
    /// The sudo invocation with its options, space-joined. Empty unless Direct.
    pub sudo_prefix: String,
    /// Operand tokens with their original quoting.
    pub targets: Vec<String>,
    pub has_double_dash: bool,
}

/// Detect every rm invocation in a command line.
///
/// Each segment is examined independently, so `rm a && rm b` yields two
/// matches. There is no error path: anything unrecognized is simply not a
/// match.
pub fn detect_rm(command: &str) -> Vec<RmMatch> {
    split_commands(command)
        .iter()
        .enumerate()
        .filter_map(|(index, segment)| match_segment(segment, index))
        .collect()
}

fn match_segment(segment: &Segment, segment_index: usize) -> Option<RmMatch> {
    let tokens = &segment.tokens;
    if tokens.is_empty() {
        return None;
    }

    let prefix = parse_prefix(tokens);
    let mut i = prefix.rest;
    if i >= tokens.len() {
        return None;
    }

    match tokens[i].value.as_str() {
        "rm" => {
            let (targets, has_double_dash) = collect_operands(&tokens[i + 1..]);
            // rm with nothing to delete is inert.
            if targets.is_empty() {
                return None;
            }
            Some(RmMatch {
                segment_index,
                kind: MatchKind::Direct,
                env_prefix: prefix.env,
                sudo_prefix: prefix.sudo,
                targets,
                has_double_dash,
            })
        }
        "xargs" => {
            i += 1;
            while i < tokens.len() && tokens[i].value.starts_with('-') {
                i += 1;
            }
            if i < tokens.len() && tokens[i].value == "rm" {
                let (targets, has_double_dash) = collect_operands(&tokens[i + 1..]);
                // Prefixes are dropped for xargs: their effect on the
                // command xargs spawns is ambiguous.
                Some(RmMatch {
                    segment_index,
                    kind: MatchKind::Xargs,
                    env_prefix: String::new(),
                    sudo_prefix: String::new(),
                    targets,
                    has_double_dash,
                })
            } else {
                None
            }
        }
        "find" => {
            for j in i + 1..tokens.len() {
                if matches!(tokens[j].value.as_str(), "-exec" | "-execdir")
                    && j + 1 < tokens.len()
                    && tokens[j + 1].value == "rm"
                {
                    // Only the position matters; the rewriter re-walks the
                    // tokens and leaves the {} / + / \; terminator alone.
                    return Some(RmMatch {
                        segment_index,
                        kind: MatchKind::FindExec,
                        env_prefix: String::new(),
                        sudo_prefix: String::new(),
                        targets: Vec::new(),
                        has_double_dash: false,
                    });
                }
            }
            None
        }
        _ => None,
    }
}

/// Split rm's trailing tokens into flags (discarded) and operands (kept
/// with their original quoting). The first bare `--` switches to
/// operand-only mode: after it, even dash tokens are operands.
fn collect_operands(tokens: &[Token]) -> (Vec<String>, bool) {
    let mut targets = Vec::new();
    let mut has_double_dash = false;
    let mut after_double_dash = false;

    for token in tokens {
        if !after_double_dash && token.value == "--" {
            has_double_dash = true;
            after_double_dash = true;
            continue;
        }
        if !after_double_dash && is_rm_flag(&token.value) {
            continue;
        }
        targets.push(token.requoted());
    }

    (targets, has_double_dash)
}
