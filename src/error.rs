use crate::sql::token_kind::TokenKind;
use sqlparser::parser::ParserError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Column specification cannot start with a {kind} token (offset {offset})")]
    InvalidColumnStart { kind: TokenKind, offset: usize },

    #[error("Unterminated {kind} token at offset {offset}")]
    Unterminated { kind: TokenKind, offset: usize },

    #[error("Unknown statement type: {0}")]
    UnknownStatement(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(ParserError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T = ()> = std::result::Result<T, Error>;

impl From<ParserError> for Error {
    fn from(value: ParserError) -> Self {
        Error::InvalidQuery(value)
    }
}
