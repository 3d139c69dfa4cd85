use std::sync::LazyLock;

use regex::Regex;

/// Word pieces keep inner hyphens, periods, ampersands and apostrophe-free
/// joins (`node.js`, `R&D`, `3.5`, `e-mail`); clitics split off (`Bachelor`,
/// `'s`); any other non-space symbol is its own token.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:[-.&][\p{L}\p{N}]+)*|['’]\p{L}+|[^\s\p{L}\p{N}]").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// First token of the text or of a new line.
    pub starts_line: bool,
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last_end = 0;
    for m in TOKEN_RE.find_iter(text) {
        let starts_line = tokens.is_empty() || text[last_end..m.start()].contains('\n');
        tokens.push(Token {
            text: m.as_str(),
            starts_line,
        });
        last_end = m.end();
    }
    tokens
}

/// True when the token has no letters or digits.
pub fn is_punctuation(token: &str) -> bool {
    !token.chars().any(char::is_alphanumeric)
}
