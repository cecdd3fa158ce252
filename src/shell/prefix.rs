//! Leading environment assignments and sudo invocations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokenizer::Token;

static ASSIGNMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*=").unwrap());

/// sudo options that consume the following token as their argument.
const SUDO_FLAGS_WITH_ARG: &[&str] = &["-u", "-g", "-C", "-h", "-p", "-r", "-t", "-U"];

/// True for tokens of the form `NAME=value`.
pub fn is_shell_assignment(token: &str) -> bool {
    ASSIGNMENT_RE.is_match(token)
}

/// A parsed command prefix: env assignments, then an optional sudo call.
///
/// The prefixes are space-joined from the original tokens, unaltered and in
/// order, so they can be pasted back in front of a replacement command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefix {
    pub env: String,
    pub sudo: String,
    /// Index of the first token not consumed by the prefix.
    pub rest: usize,
}

/// Consume leading `NAME=value` assignments and a `sudo` invocation with
/// its options from the front of a token sequence.
///
/// sudo's grammar: options in [`SUDO_FLAGS_WITH_ARG`] take one argument
/// token; any other `-`-prefixed token is consumed alone; the scan stops at
/// the first token that is neither.
pub fn parse_prefix(tokens: &[Token]) -> Prefix {
    let mut i = 0;

    let mut env_parts: Vec<&str> = Vec::new();
    while i < tokens.len() && is_shell_assignment(&tokens[i].value) {
        env_parts.push(&tokens[i].value);
        i += 1;
    }

    let mut sudo_parts: Vec<&str> = Vec::new();
    if i < tokens.len() && tokens[i].value == "sudo" {
        sudo_parts.push("sudo");
        i += 1;
        while i < tokens.len() {
            let tok = tokens[i].value.as_str();
            if SUDO_FLAGS_WITH_ARG.contains(&tok) {
                sudo_parts.push(tok);
                i += 1;
                if i < tokens.len() {
                    sudo_parts.push(&tokens[i].value);
                    i += 1;
                }
            } else if tok.starts_with('-') {
                sudo_parts.push(tok);
                i += 1;
            } else {
                break;
            }
        }
    }

    Prefix {
        env: env_parts.join(" "),
        sudo: sudo_parts.join(" "),
        rest: i,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::tokenize;

    fn prefix(command: &str) -> Prefix {
        parse_prefix(&tokenize(command))
    }

    #[test]
    fn test_assignment_forms() {
        assert!(is_shell_assignment("FOO=bar"));
        assert!(is_shell_assignment("_x=1"));
        assert!(is_shell_assignment("PATH="));
        assert!(!is_shell_assignment("=bar"));
        assert!(!is_shell_assignment("1X=2"));
        assert!(!is_shell_assignment("rm"));
    }

    #[test]
    fn test_no_prefix() {
        let p = prefix("rm file");
        assert_eq!(p.env, "");
        assert_eq!(p.sudo, "");
        assert_eq!(p.rest, 0);
    }

    #[test]
    fn test_env_assignments() {
        let p = prefix("A=1 B=2 rm file");
        assert_eq!(p.env, "A=1 B=2");
        assert_eq!(p.rest, 2);
    }

    #[test]
    fn test_bare_sudo() {
        let p = prefix("sudo rm file");
        assert_eq!(p.sudo, "sudo");
        assert_eq!(p.rest, 1);
    }

    #[test]
    fn test_sudo_flag_with_argument() {
        let p = prefix("sudo -u root rm file");
        assert_eq!(p.sudo, "sudo -u root");
        assert_eq!(p.rest, 3);
    }

    #[test]
    fn test_sudo_bare_flags() {
        let p = prefix("sudo -n -E rm file");
        assert_eq!(p.sudo, "sudo -n -E");
        assert_eq!(p.rest, 3);
    }

    #[test]
    fn test_env_then_sudo() {
        let p = prefix("FOO=bar sudo -u root rm file");
        assert_eq!(p.env, "FOO=bar");
        assert_eq!(p.sudo, "sudo -u root");
        assert_eq!(p.rest, 4);
    }

    #[test]
    fn test_stops_at_command_word() {
        let p = prefix("sudo -u root ls -la");
        assert_eq!(p.rest, 3);
        assert_eq!(p.sudo, "sudo -u root");
    }

    #[test]
    fn test_sudo_flag_argument_at_end_of_input() {
        let p = prefix("sudo -u");
        assert_eq!(p.sudo, "sudo -u");
        assert_eq!(p.rest, 2);
    }

    #[test]
    fn test_only_assignments() {
        let p = prefix("FOO=bar");
        assert_eq!(p.env, "FOO=bar");
        assert_eq!(p.rest, 1);
    }
}
