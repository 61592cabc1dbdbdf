//! Optional full-grammar check of a statement using `sqlparser`.
use crate::*;
use sqlparser::{dialect::dialect_from_str, parser::Parser};

/// Parse `sql` with the named `sqlparser` dialect, discarding the AST.
///
/// Unknown dialect names are a configuration error; parse failures surface
/// as `Error::InvalidQuery`.
pub fn validate(sql: &str, dialect: &str) -> Result {
    let parser_dialect = dialect_from_str(dialect)
        .ok_or_else(|| Error::Config(format!("unknown SQL dialect {dialect:?}")))?;
    let statements = Parser::parse_sql(&*parser_dialect, sql)?;
    debug!("{dialect} dialect accepted {} statement(s)", statements.len());
    Ok(())
}
