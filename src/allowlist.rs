//! Allow-list globs matched against whole command strings.

use regex::Regex;

/// Convert a glob pattern to an anchored regex.
///
/// `*` matches any run of characters, `?` exactly one; `[` is literal, so
/// character classes are not part of the pattern language. Every other
/// regex metacharacter is escaped.
pub fn glob_to_regex(glob: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::with_capacity(glob.len() + 8);
    pattern.push('^');
    for c in glob.chars() {
        match c {
            '*' => pattern.push_str(".*"),
            '?' => pattern.push('.'),
            '.' | '+' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '\\' | '[' => {
                pattern.push('\\');
                pattern.push(c);
            }
            _ => pattern.push(c),
        }
    }
    pattern.push('$');
    Regex::new(&pattern)
}

/// True when the whole command matches any compiled allow-list pattern.
pub fn is_allowlisted(command: &str, patterns: &[Regex]) -> bool {
    patterns.iter().any(|re| re.is_match(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiled(globs: &[&str]) -> Vec<Regex> {
        globs.iter().map(|g| glob_to_regex(g).unwrap()).collect()
    }

    #[test]
    fn test_star_matches_any_run() {
        let patterns = compiled(&["rm -rf /tmp/*"]);
        assert!(is_allowlisted("rm -rf /tmp/build", &patterns));
        assert!(is_allowlisted("rm -rf /tmp/", &patterns));
        assert!(!is_allowlisted("rm -rf /home/user", &patterns));
    }

    #[test]
    fn test_match_is_anchored() {
        let patterns = compiled(&["rm file"]);
        assert!(is_allowlisted("rm file", &patterns));
        assert!(!is_allowlisted("rm file2", &patterns));
        assert!(!is_allowlisted("sudo rm file", &patterns));
    }

    #[test]
    fn test_question_mark_single_char() {
        let patterns = compiled(&["rm file?"]);
        assert!(is_allowlisted("rm file1", &patterns));
        assert!(!is_allowlisted("rm file12", &patterns));
    }

    #[test]
    fn test_metacharacters_literal() {
        let patterns = compiled(&["rm a.b"]);
        assert!(is_allowlisted("rm a.b", &patterns));
        assert!(!is_allowlisted("rm axb", &patterns));
    }

    #[test]
    fn test_bracket_literal() {
        let patterns = compiled(&["rm [x]"]);
        assert!(is_allowlisted("rm [x]", &patterns));
        assert!(!is_allowlisted("rm x", &patterns));
    }

    #[test]
    fn test_empty_list_never_matches() {
        assert!(!is_allowlisted("rm -rf /", &[]));
    }
}
