//! Column reference: one item of a `SELECT` column list.
//!
//! `ColumnRef::parse` consumes the tokens of a single column specification
//! from a `Tokenizer` and splits them into the column name or expression, the
//! alias the result set will use, and the optional table qualifier. All five
//! fields borrow the statement.
//!
//! Recognised shapes:
//! - `expr`
//! - `expr AS alias` and `expr alias`
//! - `table.column`, `schema.table.column`
//! - `table.column AS alias`
use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind, tokenizer::Tokenizer};
use crate::*;
use itertools::Itertools as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
#[display("{reference}")]
pub struct ColumnRef<'a> {
    /// The complete specification as written, including expressions, `AS`
    /// and the alias.
    pub reference: &'a str,
    /// Column name, or the expression / function call text for computed
    /// columns.
    pub column_name: &'a str,
    /// Name the column gets in the result set. Equals `column_name` when no
    /// alias is given.
    pub column_alias: &'a str,
    /// Table the column comes from. Starts out as the qualifier written in
    /// the statement; the query layer replaces it with the real table name
    /// when the qualifier is a table alias.
    pub source_table: &'a str,
    /// Qualifier written before the column name (`t` in `t.name`).
    pub table_alias: &'a str,
}

impl<'a> ColumnRef<'a> {
    /// Parse one column specification starting at `first`.
    ///
    /// Reads tokens until a comma (consumed) or a `FROM` keyword (left
    /// unconsumed, the tokenizer is rewound to it) or the end of input.
    ///
    /// `first` must be an identifier, quoted identifier or sub-expression;
    /// anything else fails with `Error::InvalidColumnStart` and nothing is
    /// consumed.
    pub fn parse(toker: &mut Tokenizer<'a>, first: Token<'a>) -> Result<Self> {
        if !first.kind().starts_column() {
            return Err(Error::InvalidColumnStart {
                kind: first.kind(),
                offset: first.start(),
            });
        }
        Ok(Self::parse_expression(toker, first))
    }

    /// Like `parse`, but accepts any first token, so literals and signed
    /// values (`'x' AS y`, `+1`) become expression columns.
    pub(crate) fn parse_expression(toker: &mut Tokenizer<'a>, first: Token<'a>) -> Self {
        let tokens = collect_spec(toker, first, |t| t.is_keyword(Keyword::From));
        let column = Self::from_tokens(&tokens);
        trace!("column {column:?}");
        column
    }

    fn from_tokens(tokens: &[Token<'a>]) -> Self {
        let significant = significant(tokens);
        let mut column = Self {
            reference: span_text(&significant),
            ..Self::default()
        };

        let (expr, alias) = split_alias(&significant);
        match expr {
            [] => {}
            [prefix @ .., table, dot, name] if is_qualifier(prefix, dot) => {
                column.table_alias = table.text();
                column.source_table = table.text();
                column.column_name = name.text();
            }
            _ => column.column_name = span_text(expr),
        }
        column.column_alias = alias.map_or(column.column_name, |a| a.text());
        if column.column_name.is_empty() {
            column.column_name = column.column_alias;
        }
        column
    }

    /// `*` or `table.*`.
    pub fn is_wildcard(&self) -> bool {
        self.column_name == "*"
    }

    /// True when a table qualifier was written before the column name.
    pub fn is_qualified(&self) -> bool {
        !self.table_alias.is_empty()
    }

    /// Column name without quoting delimiters.
    pub fn name(&self) -> &'a str {
        unquote(self.column_name)
    }

    /// Result set name without quoting delimiters.
    pub fn alias(&self) -> &'a str {
        unquote(self.column_alias)
    }

    /// Case-insensitive match against the result set name, quotes ignored.
    pub fn has_alias(&self, alias: &str) -> bool {
        self.alias().eq_ignore_ascii_case(unquote(alias))
    }
}

/// Strip one pair of matching `` ` ``, `[]`, `'` or `"` delimiters.
pub fn unquote(text: &str) -> &str {
    let pairs = [('`', '`'), ('[', ']'), ('\'', '\''), ('"', '"')];
    pairs
        .iter()
        .find_map(|&(open, close)| {
            text.strip_prefix(open)
                .and_then(|inner| inner.strip_suffix(close))
        })
        .unwrap_or(text)
}

/// Collect `first` and the tokens following it up to a comma (consumed) or a
/// token satisfying `stop` (rewound, so the caller reads it next).
pub(crate) fn collect_spec<'a>(
    toker: &mut Tokenizer<'a>,
    first: Token<'a>,
    stop: impl Fn(&Token<'a>) -> bool,
) -> Vec<Token<'a>> {
    let mut tokens = vec![first];
    while !toker.at_eof() {
        let token = toker.next_token();
        if token.kind() == TokenKind::Comma {
            break;
        }
        if stop(&token) {
            let rewound = toker.back_to(&token);
            debug_assert!(rewound, "a token just read is always rewindable");
            break;
        }
        tokens.push(token);
    }
    tokens
}

pub(crate) fn significant<'a>(tokens: &[Token<'a>]) -> Vec<Token<'a>> {
    tokens
        .iter()
        .filter(|t| t.kind() != TokenKind::Space)
        .copied()
        .collect_vec()
}

/// Text from the start of the first token to the end of the last one.
pub(crate) fn span_text<'a>(tokens: &[Token<'a>]) -> &'a str {
    match tokens {
        [] => "",
        [first, .., last] => {
            let mut span = *first;
            span.extend_to(last);
            span.text()
        }
        [only] => only.text(),
    }
}

/// Split a trailing alias off a specification.
///
/// `expr AS alias` always yields an alias. `expr alias` only does when the
/// expression is a single operand (a name, a qualified name or a function
/// call), so `a + b` or `CASE ... END` keep their last word.
pub(crate) fn split_alias<'s, 'a>(tokens: &'s [Token<'a>]) -> (&'s [Token<'a>], Option<Token<'a>>) {
    match tokens {
        [expr @ .., keyword, alias] if keyword.is_keyword(Keyword::As) => (expr, Some(*alias)),
        [expr @ .., alias] if is_alias_token(alias) && is_operand(expr) => (expr, Some(*alias)),
        _ => (tokens, None),
    }
}

/// `prefix table . name` is a qualified name when the table is not itself
/// the right operand of an expression.
pub(crate) fn is_qualifier(prefix: &[Token<'_>], dot: &Token<'_>) -> bool {
    dot.kind() == TokenKind::Dot && prefix.last().is_none_or(|t| t.kind() == TokenKind::Dot)
}

fn is_alias_token(token: &Token<'_>) -> bool {
    match token.kind() {
        TokenKind::Quoted => true,
        TokenKind::Ident => {
            token.keyword().is_none()
                && token
                    .text()
                    .starts_with(|c: char| c.is_alphabetic() || c == '_')
        }
        _ => false,
    }
}

fn is_operand(tokens: &[Token<'_>]) -> bool {
    match tokens {
        [] => false,
        [single] => single.kind() != TokenKind::Dot && single.kind() != TokenKind::Symbol,
        [function, args] => function.kind() == TokenKind::Ident && args.kind() == TokenKind::SubExpr,
        chain => {
            chain.len() % 2 == 1
                && chain
                    .iter()
                    .enumerate()
                    .all(|(i, t)| (t.kind() == TokenKind::Dot) == (i % 2 == 1))
        }
    }
}
