//! Shell-style tokenization, quote-preserving.

/// Which quote character introduced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    Single,
    Double,
}

impl QuoteKind {
    pub fn as_char(self) -> char {
        match self {
            QuoteKind::Single => '\'',
            QuoteKind::Double => '"',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '\'' => Some(QuoteKind::Single),
            '"' => Some(QuoteKind::Double),
            _ => None,
        }
    }
}

/// A token from shell parsing.
///
/// `value` keeps the original text verbatim, including surrounding quote
/// characters and backslashes, so rewritten output reproduces the input's
/// quoting and escaping. A token mixing quoted and unquoted runs (like
/// `"foo"bar`) stays one token; `quote` records only the first quote seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub value: String,
    pub quote: Option<QuoteKind>,
}

impl Token {
    /// The token text with its surrounding quote characters removed.
    pub fn unquoted(&self) -> &str {
        let Some(kind) = self.quote else {
            return &self.value;
        };
        let q = kind.as_char();
        let inner = self.value.strip_prefix(q).unwrap_or(&self.value);
        // An unterminated quote has no closer to strip.
        inner.strip_suffix(q).unwrap_or(inner)
    }

    /// The token re-wrapped in its original quote character, or the raw
    /// value for unquoted tokens.
    pub fn requoted(&self) -> String {
        match self.quote {
            Some(kind) => {
                let q = kind.as_char();
                format!("{q}{}{q}", self.unquoted())
            }
            None => self.value.clone(),
        }
    }
}

/// Tokenize a shell command into words, respecting quotes and escapes.
///
/// Single left-to-right scan. A backslash outside single quotes escapes the
/// next character and is kept in the token text; inside single quotes it is
/// a literal. Unterminated quotes and a trailing backslash are not errors:
/// whatever accumulated is flushed at end of input.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut token_quote: Option<QuoteKind> = None;
    let mut open_quote: Option<char> = None;
    let mut escape_next = false;

    for c in input.chars() {
        if escape_next {
            current.push(c);
            escape_next = false;
            continue;
        }

        if c == '\\' && open_quote != Some('\'') {
            escape_next = true;
            current.push(c);
            continue;
        }

        if let Some(q) = open_quote {
            current.push(c);
            if c == q {
                open_quote = None;
            }
            continue;
        }

        if c == '\'' || c == '"' {
            open_quote = Some(c);
            if token_quote.is_none() {
                token_quote = QuoteKind::from_char(c);
            }
            current.push(c);
            continue;
        }

        if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(Token {
                    value: std::mem::take(&mut current),
                    quote: token_quote.take(),
                });
            }
            continue;
        }

        current.push(c);
    }

    if !current.is_empty() {
        tokens.push(Token {
            value: current,
            quote: token_quote,
        });
    }

    tokens
}
