//! Reconstruction of command lines with rm replaced.

use crate::matcher::{MatchKind, RmMatch, detect_rm};
use crate::shell::{Operator, Segment, flags::is_rm_flag, split_commands};

/// Rewrite every detected rm invocation in `command` to use `trash_cmd`.
///
/// Unmatched segments are reproduced from their trimmed original text, so
/// their quoting and inner spacing survive untouched. Operators between
/// segments are re-emitted with canonical spacing: `"; "` for semicolons,
/// `" && "` style padding for the rest. A command with no matches comes
/// back unchanged.
pub fn rewrite_to_trash(command: &str, trash_cmd: &str) -> String {
    let matches = detect_rm(command);
    if matches.is_empty() {
        return command.to_string();
    }
    let segments = split_commands(command);

    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        let part = match matches.iter().find(|m| m.segment_index == i) {
            Some(m) => rewrite_segment(segment, m, trash_cmd),
            None => segment.raw.clone(),
        };

        if i > 0 {
            match segment.operator {
                Some(Operator::Semicolon) => out.push_str("; "),
                Some(op) => {
                    out.push(' ');
                    out.push_str(op.as_str());
                    out.push(' ');
                }
                None => out.push(' '),
            }
        }
        out.push_str(&part);
    }
    out
}

fn rewrite_segment(segment: &Segment, m: &RmMatch, trash_cmd: &str) -> String {
    match m.kind {
        MatchKind::Direct => rewrite_direct(m, trash_cmd),
        MatchKind::Xargs => rewrite_xargs(segment, trash_cmd),
        MatchKind::FindExec => rewrite_find_exec(segment, trash_cmd),
    }
}

/// `env? sudo? trash [--] targets...`, space-joined.
fn rewrite_direct(m: &RmMatch, trash_cmd: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !m.env_prefix.is_empty() {
        parts.push(&m.env_prefix);
    }
    if !m.sudo_prefix.is_empty() {
        parts.push(&m.sudo_prefix);
    }
    parts.push(trash_cmd);
    if m.has_double_dash {
        parts.push("--");
    }
    parts.extend(m.targets.iter().map(String::as_str));
    parts.join(" ")
}

/// Copy verbatim through `xargs` and its flags, substitute the `rm`, drop
/// rm's own flags, then copy the rest verbatim.
fn rewrite_xargs(segment: &Segment, trash_cmd: &str) -> String {
    let tokens = &segment.tokens;
    let mut out: Vec<&str> = Vec::new();
    let mut seen_xargs = false;
    let mut replaced = false;
    let mut i = 0;

    while i < tokens.len() {
        let value = tokens[i].value.as_str();
        if value == "xargs" {
            seen_xargs = true;
            out.push(value);
            i += 1;
            continue;
        }
        if seen_xargs && !replaced && value == "rm" {
            out.push(trash_cmd);
            replaced = true;
            i += 1;
            while i < tokens.len() && is_rm_flag(&tokens[i].value) {
                i += 1;
            }
            continue;
        }
        out.push(value);
        i += 1;
    }

    out.join(" ")
}

/// Copy verbatim; at the `rm` following `-exec`/`-execdir`, substitute and
/// drop rm's flags up to the terminator, which is kept as-is.
fn rewrite_find_exec(segment: &Segment, trash_cmd: &str) -> String {
    let tokens = &segment.tokens;
    let mut out: Vec<&str> = Vec::new();
    let mut in_exec = false;
    let mut replaced = false;
    let mut i = 0;

    while i < tokens.len() {
        let value = tokens[i].value.as_str();
        if value == "-exec" || value == "-execdir" {
            in_exec = true;
            out.push(value);
            i += 1;
            continue;
        }
        if in_exec && !replaced && value == "rm" {
            out.push(trash_cmd);
            replaced = true;
            i += 1;
            while i < tokens.len() && is_rm_flag(&tokens[i].value) {
                i += 1;
            }
            continue;
        }
        if in_exec && replaced && matches!(value, "\\;" | "+" | ";") {
            in_exec = false;
        }
        out.push(value);
        i += 1;
    }

    out.join(" ")
}
