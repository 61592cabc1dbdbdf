//! Token kind definitions for the statement tokenizer.
//!
//! The ordinal values are part of the public contract: anything that
//! serializes a kind (debug dumps, foreign consumers) uses `code()` and
//! expects `Unknown = 0` through `Dot = 8`.

/// Classification for a token produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
#[repr(u8)]
pub enum TokenKind {
    /// No token produced (end of input or a default-constructed token).
    #[default]
    #[display("unknown")]
    Unknown = 0,
    /// Run of whitespace characters.
    #[display("space")]
    Space = 1,
    /// Comma `,` separating columns or tables.
    #[display("comma")]
    Comma = 2,
    /// Identifier quoted with backticks or square brackets, delimiters included.
    #[display("quoted identifier")]
    Quoted = 3,
    /// Parenthesized span, parentheses included. Function call arguments,
    /// computed expressions and scalar subqueries all end up here.
    #[display("sub-expression")]
    SubExpr = 4,
    /// Bare word. Keywords are identifiers too.
    #[display("identifier")]
    Ident = 5,
    /// Run of symbol characters such as `<=` or `||`.
    #[display("symbol")]
    Symbol = 6,
    /// Single or double quoted literal, quotes included.
    #[display("literal")]
    Literal = 7,
    /// Dot `.` separating a qualifier from a name.
    #[display("dot")]
    Dot = 8,
}

impl TokenKind {
    pub const ALL: [Self; 9] = [
        TokenKind::Unknown,
        TokenKind::Space,
        TokenKind::Comma,
        TokenKind::Quoted,
        TokenKind::SubExpr,
        TokenKind::Ident,
        TokenKind::Symbol,
        TokenKind::Literal,
        TokenKind::Dot,
    ];

    /// Stable numeric code of this kind.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Kinds allowed to open a column specification.
    pub fn starts_column(self) -> bool {
        matches!(
            self,
            TokenKind::Ident | TokenKind::Quoted | TokenKind::SubExpr
        )
    }
}

impl TryFrom<u8> for TokenKind {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL.get(value as usize).copied().ok_or(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(TokenKind::Unknown.code(), 0);
        assert_eq!(TokenKind::Space.code(), 1);
        assert_eq!(TokenKind::Comma.code(), 2);
        assert_eq!(TokenKind::Quoted.code(), 3);
        assert_eq!(TokenKind::SubExpr.code(), 4);
        assert_eq!(TokenKind::Ident.code(), 5);
        assert_eq!(TokenKind::Symbol.code(), 6);
        assert_eq!(TokenKind::Literal.code(), 7);
        assert_eq!(TokenKind::Dot.code(), 8);
    }

    #[test]
    fn code_conversion() {
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::try_from(kind.code()), Ok(kind));
        }
        assert_eq!(TokenKind::try_from(9), Err(9));
    }

    #[test]
    fn column_starters() {
        assert!(TokenKind::Ident.starts_column());
        assert!(TokenKind::Quoted.starts_column());
        assert!(TokenKind::SubExpr.starts_column());
        assert!(!TokenKind::Literal.starts_column());
        assert!(!TokenKind::Comma.starts_column());
        assert!(!TokenKind::Unknown.starts_column());
    }

    #[test]
    fn display() {
        assert_eq!(TokenKind::SubExpr.to_string(), "sub-expression");
        assert_eq!(TokenKind::default(), TokenKind::Unknown);
    }
}
