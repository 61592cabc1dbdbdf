//! Token model: a `TokenKind` plus a borrowed span of the statement.
//!
//! A `Token` never owns text. It remembers the statement it was cut from and
//! the byte range it covers, so `text()` is a plain slice and two tokens of
//! the same statement can be merged into one span without copying.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};

/// A lexical token: kind plus `[start, start + len)` byte range of `source`.
///
/// Invariants:
/// - `start + len <= source.len()`
/// - both ends fall on `char` boundaries of `source`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token<'a> {
    source: &'a str,
    start: usize,
    len: usize,
    kind: TokenKind,
    unclosed: bool,
}

impl<'a> Token<'a> {
    pub(crate) const fn new(source: &'a str, start: usize, len: usize, kind: TokenKind) -> Self {
        Self {
            source,
            start,
            len,
            kind,
            unclosed: false,
        }
    }

    /// Record whether the closing delimiter of a quote, bracket or
    /// sub-expression was actually found.
    pub(crate) const fn closed(mut self, closed: bool) -> Self {
        self.unclosed = !closed;
        self
    }

    /// The "no token produced" sentinel.
    pub const fn invalid() -> Self {
        Self::new("", 0, 0, TokenKind::Unknown)
    }

    /// True unless this is the `Unknown` sentinel.
    pub fn is_valid(&self) -> bool {
        self.kind != TokenKind::Unknown
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Reclassify this token, e.g. once context shows a word is a keyword.
    pub fn set_kind(&mut self, kind: TokenKind) {
        self.kind = kind;
    }

    /// Grow this token so it ends where `other` ends, adopting `other`'s kind
    /// and termination.
    ///
    /// Everything in between is covered even when the tokens are not
    /// adjacent. `other` must come from the same statement and must not end
    /// before this token starts; otherwise the token is left untouched and
    /// `false` is returned.
    pub fn extend_to(&mut self, other: &Token<'a>) -> bool {
        if !std::ptr::eq(self.source, other.source) || other.end() < self.start {
            return false;
        }
        self.len = other.end() - self.start;
        self.kind = other.kind;
        self.unclosed = other.unclosed;
        true
    }

    /// Byte offset of the first character.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Byte length of this token.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The token text, a slice of the statement.
    pub fn text(&self) -> &'a str {
        &self.source[self.start..self.end()]
    }

    /// Case-insensitive comparison of the token text.
    pub fn eq_ignore_case(&self, value: &str) -> bool {
        self.text().eq_ignore_ascii_case(value)
    }

    /// True if this is an identifier spelling `kw` in any case.
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenKind::Ident && kw.matches(self.text())
    }

    /// The keyword this identifier spells, if any.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Ident => Keyword::parse(self.text()),
            _ => None,
        }
    }

    /// Whether the tokenizer found the closing delimiter of this token.
    ///
    /// Quotes, brackets and parentheses that are never closed run silently to
    /// the end of input; this reports that case, including a sub-expression
    /// whose `)` was swallowed by an unclosed literal inside it. Tokens of
    /// undelimited kinds are always terminated.
    pub fn is_terminated(&self) -> bool {
        !self.unclosed
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}
