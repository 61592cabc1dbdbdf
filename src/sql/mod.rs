//! Lightweight SQL statement introspection.
//!
//! Finds out which columns a `SELECT` statement returns (names, aliases and
//! source tables) without a SQL grammar. The pieces, bottom-up:
//!
//! Modules:
//! - `token_kind` : Closed set of token classes with stable numeric codes.
//! - `token`      : `Token`, a kind plus a borrowed span of the statement.
//! - `keyword`    : The few keywords the introspection needs.
//! - `tokenizer`  : Cursor based tokenizer handing out one token per call.
//! - `column_ref` : Resolver turning the tokens of one column specification
//!                  into a `ColumnRef`.
//! - `query`      : Statement classification and the select-list loop.
//! - `validate`   : Optional full-grammar check through `sqlparser`.
//!
//! Everything borrows the statement text; nothing is copied.
//!
//! Example:
//! ```rust
//! use qcolref::{Query, QueryType};
//!
//! let query = Query::parse("SELECT u.id, u.name AS who FROM users u").unwrap();
//! assert_eq!(query.query_type(), QueryType::Select);
//! let who = query.column("who").unwrap();
//! assert_eq!(who.column_name, "name");
//! assert_eq!(who.table_alias, "u");
//! assert_eq!(who.source_table, "users");
//! ```
//!
//! NOTE: This is **not** a SQL parser. Parenthesized text is opaque, and
//! joins, unions and CTEs are not analysed.

pub mod column_ref;
pub mod keyword;
pub mod query;
pub mod token;
pub mod token_kind;
pub mod tokenizer;
pub mod validate;

pub use column_ref::{ColumnRef, unquote};
pub use keyword::Keyword;
pub use query::{Query, QueryType, TableRef};
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::{Tokenizer, tokenize};
pub use validate::validate;

/// Convenience prelude re‑exporting the most commonly used items.
pub mod prelude {
    pub use super::{ColumnRef, Query, QueryType, Token, TokenKind, Tokenizer, tokenize};
}
