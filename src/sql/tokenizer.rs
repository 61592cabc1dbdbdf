use crate::sql::{token::Token, token_kind::TokenKind};
use crate::*;
use unicode_general_category::{GeneralCategory, get_general_category};

const BACK_TICK: char = '`';
const OPEN_EXPR: char = '(';
const CLOSE_EXPR: char = ')';
const OPEN_BRACKET: char = '[';
const CLOSE_BRACKET: char = ']';
const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';
const COMMA: char = ',';
const DOT: char = '.';
const STAR: char = '*';
const UNDERSCORE: char = '_';

/// Cursor based SQL tokenizer handing out one `Token` per call.
///
/// Scope / Intent:
/// - Split a `SELECT` column list into the units a column specification is
///   made of, without understanding expressions.
/// - Anything in parentheses (function arguments, arithmetic, scalar
///   subqueries) becomes a single opaque `SubExpr` token.
///
/// Behavior:
/// - Whitespace runs are returned as `Space` tokens, so the concatenation of
///   all tokens reproduces the scanned text exactly.
/// - Quotes, brackets and parentheses that are never closed swallow the rest
///   of the input; the token is returned as if it were complete (see
///   `Token::is_terminated`).
/// - A `*` is always a word of its own, so `*FROM` is two tokens.
/// - Offsets are byte offsets into `source`; `back(count)` counts characters.
///
/// Guarantees:
/// - Never panics, never returns an error.
/// - `position() >= start()` at all times.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    source: &'a str,
    start: usize,
    current: usize,
}

impl<'a> Tokenizer<'a> {
    /// Tokenizer over `source`, starting (and unable to rewind past) `start`.
    ///
    /// `start` is clamped to the length of `source` and moved back to the
    /// nearest character boundary.
    pub fn new(source: &'a str, start: usize) -> Self {
        let mut start = start.min(source.len());
        while !source.is_char_boundary(start) {
            start -= 1;
        }
        Self {
            source,
            start,
            current: start,
        }
    }

    /// True once the cursor reached the end of the statement.
    pub fn at_eof(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Character under the cursor, `'\0'` at end of input.
    pub fn current(&self) -> char {
        self.peek().unwrap_or('\0')
    }

    /// The statement being tokenized.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Lower bound of the cursor.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Byte offset of the cursor.
    pub fn position(&self) -> usize {
        self.current
    }

    /// Unscanned remainder of the statement.
    pub fn rest(&self) -> &'a str {
        &self.source[self.current..]
    }

    /// Consume and classify the next lexical unit.
    ///
    /// Returns `Token::invalid()` without moving the cursor at end of input.
    pub fn next_token(&mut self) -> Token<'a> {
        let Some(c) = self.bump() else {
            return Token::invalid();
        };
        let start = self.current - c.len_utf8();

        let token = match c {
            c if c.is_whitespace() => self.match_spaces(start),
            COMMA => self.token_from(start, TokenKind::Comma),
            DOT => self.token_from(start, TokenKind::Dot),
            STAR => self.token_from(start, TokenKind::Ident),
            OPEN_EXPR => self.match_sub_expr(start),
            BACK_TICK => self.match_until(start, BACK_TICK, TokenKind::Quoted),
            OPEN_BRACKET => self.match_until(start, CLOSE_BRACKET, TokenKind::Quoted),
            SINGLE_QUOTE | DOUBLE_QUOTE => self.match_until(start, c, TokenKind::Literal),
            c if is_symbol(c) => self.match_symbol(start),
            _ => self.match_word(start),
        };
        trace!(
            "token {} {:?} at {}..{}",
            token.kind(),
            token.text(),
            token.start(),
            token.end()
        );
        token
    }

    /// Move the cursor back by `count` characters.
    ///
    /// Fails, leaving the cursor where it is, if that would cross `start()`.
    pub fn back(&mut self, count: usize) -> bool {
        let scanned = &self.source[self.start..self.current];
        let target = match count {
            0 => self.current,
            n => match scanned.char_indices().rev().nth(n - 1) {
                Some((offset, _)) => self.start + offset,
                None => return false,
            },
        };
        self.current = target;
        true
    }

    /// Move the cursor back to the first character of `token`.
    ///
    /// Fails if the token is the invalid sentinel, starts before `start()`,
    /// or does not describe a position of this statement.
    pub fn back_to(&mut self, token: &Token<'_>) -> bool {
        if !token.is_valid()
            || token.start() < self.start
            || !self.source.is_char_boundary(token.start())
        {
            return false;
        }
        self.current = token.start();
        true
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += c.len_utf8();
        Some(c)
    }

    fn token_from(&self, start: usize, kind: TokenKind) -> Token<'a> {
        Token::new(self.source, start, self.current - start, kind)
    }

    fn match_spaces(&mut self, start: usize) -> Token<'a> {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.token_from(start, TokenKind::Space)
    }

    fn match_symbol(&mut self, start: usize) -> Token<'a> {
        while let Some(c) = self.peek() {
            let stops = c.is_whitespace()
                || matches!(
                    c,
                    SINGLE_QUOTE | DOUBLE_QUOTE | BACK_TICK | OPEN_BRACKET | OPEN_EXPR
                );
            if stops || !is_symbol(c) {
                break;
            }
            self.bump();
        }
        self.token_from(start, TokenKind::Symbol)
    }

    fn match_sub_expr(&mut self, start: usize) -> Token<'a> {
        let closed = self.skip_sub_expr();
        self.token_from(start, TokenKind::SubExpr).closed(closed)
    }

    /// Consume through the `)` matching an already consumed `(`, reporting
    /// whether it was found.
    ///
    /// Literals are skipped as a whole so a parenthesis inside a string does
    /// not close the expression.
    fn skip_sub_expr(&mut self) -> bool {
        while let Some(c) = self.bump() {
            match c {
                SINGLE_QUOTE | DOUBLE_QUOTE => {
                    self.skip_until(c);
                }
                OPEN_EXPR => {
                    self.skip_sub_expr();
                }
                CLOSE_EXPR => return true,
                _ => {}
            }
        }
        false
    }

    fn match_word(&mut self, start: usize) -> Token<'a> {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == UNDERSCORE)
        {
            self.bump();
        }
        self.token_from(start, TokenKind::Ident)
    }

    fn match_until(&mut self, start: usize, close: char, kind: TokenKind) -> Token<'a> {
        let closed = self.skip_until(close);
        self.token_from(start, kind).closed(closed)
    }

    /// Consume up to and including `close` (or to the end of input).
    fn skip_until(&mut self, close: char) -> bool {
        while let Some(c) = self.bump() {
            if c == close {
                return true;
            }
        }
        false
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        token.is_valid().then_some(token)
    }
}

impl std::iter::FusedIterator for Tokenizer<'_> {}

/// Characters of the Unicode symbol categories (math, currency, modifier and
/// other symbols).
///
/// Punctuation such as `*`, `-`, `/`, `%` or `;` is *not* a symbol and is
/// tokenized as an identifier.
pub fn is_symbol(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::MathSymbol
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::OtherSymbol
    )
}

/// Tokenize a whole statement from offset 0.
pub fn tokenize(sql: &str) -> Vec<Token<'_>> {
    Tokenizer::new(sql, 0).collect()
}
