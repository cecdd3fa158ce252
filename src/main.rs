//! trash-guard - PreToolUse hook entry point (filter mode).
//!
//! Reads the hook payload from stdin; when the command contains an rm
//! invocation, writes the payload back on stdout with the command rewritten
//! to the trash command and explains itself on stderr. Anything else
//! (empty input, invalid JSON, no command field, allow-listed command, no
//! match) produces no output. The exit code is always 0: the hook is
//! advisory and must never break the pipeline it sits in.

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

use trash_guard::audit::{AuditEntry, AuditLogger};
use trash_guard::config::Config;
use trash_guard::input::HookInput;
use trash_guard::matcher::detect_rm;
use trash_guard::rewrite::rewrite_to_trash;

fn main() -> ExitCode {
    let mut input_str = String::new();
    if io::stdin().read_to_string(&mut input_str).is_err() {
        return ExitCode::SUCCESS; // Fail-open on read error
    }
    if input_str.trim().is_empty() {
        return ExitCode::SUCCESS;
    }

    let hook_input = match HookInput::parse(&input_str) {
        Ok(v) => v,
        Err(_) => return ExitCode::SUCCESS, // Fail-open on parse error
    };
    let Some(command) = hook_input.command().map(String::from) else {
        return ExitCode::SUCCESS;
    };

    let config = Config::load().unwrap_or_default();
    let compiled = match config.compile() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("trash-guard: config error: {}", e);
            return ExitCode::SUCCESS; // Fail-open on config error
        }
    };

    if compiled.is_allowlisted(&command) {
        return ExitCode::SUCCESS;
    }

    if detect_rm(&command).is_empty() {
        return ExitCode::SUCCESS;
    }

    let trash_cmd = compiled.trash_command();
    let rewritten = rewrite_to_trash(&command, trash_cmd);

    eprintln!(
        "trash-guard: rewriting rm to '{}' for recoverable deletion",
        trash_cmd
    );
    eprintln!("trash-guard: '{}' -> '{}'", command, rewritten);

    if compiled.raw.audit.enabled {
        if let Some(path) = &compiled.raw.audit.path {
            if let Ok(mut logger) = AuditLogger::open(Path::new(path)) {
                let _ = logger.log(&AuditEntry::rewrite(&command, &rewritten));
            }
        }
    }

    match serde_json::to_string(&hook_input.with_command(&rewritten)) {
        Ok(json) => println!("{}", json),
        Err(_) => return ExitCode::SUCCESS,
    }

    ExitCode::SUCCESS
}
