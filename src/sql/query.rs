//! Statement introspection built on the tokenizer and column references.
//!
//! `Query::parse` classifies a statement and, for `SELECT`, walks the column
//! list one `ColumnRef` at a time until `FROM`, then reads the simple table
//! list that follows so table aliases used as column qualifiers can be
//! resolved to table names. Joins, unions and subqueries are not analysed.
use crate::sql::column_ref::{collect_spec, is_qualifier, significant, span_text, split_alias};
use crate::sql::{
    column_ref::ColumnRef, keyword::Keyword, token::Token, token_kind::TokenKind,
    tokenizer::Tokenizer, validate::validate,
};
use crate::*;

/// Kind of statement, from its leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
#[repr(u8)]
pub enum QueryType {
    #[default]
    #[display("UNKNOWN")]
    Unknown = 0,
    #[display("SELECT")]
    Select = 1,
    #[display("UPDATE")]
    Update = 2,
    #[display("DELETE")]
    Delete = 3,
    #[display("INSERT")]
    Insert = 4,
    #[display("REPLACE")]
    Replace = 5,
}

impl QueryType {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Classify a statement by its first word, ignoring case and leading
    /// whitespace.
    pub fn detect(statement: &str) -> Self {
        Self::from_token(&Tokenizer::new(statement.trim_start(), 0).next_token())
    }

    fn from_token(token: &Token<'_>) -> Self {
        match token.keyword() {
            Some(Keyword::Select) => QueryType::Select,
            Some(Keyword::Update) => QueryType::Update,
            Some(Keyword::Delete) => QueryType::Delete,
            Some(Keyword::Insert) => QueryType::Insert,
            Some(Keyword::Replace) => QueryType::Replace,
            _ => QueryType::Unknown,
        }
    }
}

/// One entry of a `FROM` table list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
#[display("{reference}")]
pub struct TableRef<'a> {
    /// The entry as written.
    pub reference: &'a str,
    /// Schema qualifier (`s` in `s.users`), empty when absent.
    pub schema: &'a str,
    /// Table name, or the sub-expression text for derived tables.
    pub name: &'a str,
    /// Alias, equal to `name` when none is given.
    pub alias: &'a str,
}

impl<'a> TableRef<'a> {
    fn parse(toker: &mut Tokenizer<'a>, first: Token<'a>) -> Self {
        let tokens = collect_spec(toker, first, ends_table_list);
        let significant = significant(&tokens);
        let (expr, alias) = split_alias(&significant);
        let mut table = Self {
            reference: span_text(&significant),
            ..Self::default()
        };
        match expr {
            [prefix @ .., _, dot, name] if is_qualifier(prefix, dot) => {
                table.schema = span_text(&expr[..expr.len() - 2]);
                table.name = name.text();
            }
            _ => table.name = span_text(expr),
        }
        table.alias = alias.map_or(table.name, |a| a.text());
        table
    }

    /// True if `qualifier` names this table, by alias or by name.
    pub fn answers_to(&self, qualifier: &str) -> bool {
        let qualifier = unquote(qualifier);
        unquote(self.alias).eq_ignore_ascii_case(qualifier)
            || unquote(self.name).eq_ignore_ascii_case(qualifier)
    }
}

fn ends_table_list(token: &Token<'_>) -> bool {
    token.keyword().is_some_and(Keyword::is_terminator)
        || (token.kind() == TokenKind::Ident && token.text() == ";")
}

/// Result of introspecting one statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<'a> {
    statement: &'a str,
    query_type: QueryType,
    distinct: bool,
    columns: Vec<ColumnRef<'a>>,
    tables: Vec<TableRef<'a>>,
}

impl<'a> Query<'a> {
    /// Introspect `statement` with the default (lenient) configuration.
    pub fn parse(statement: &'a str) -> Result<Self> {
        Self::parse_with(statement, &Config::default())
    }

    /// Introspect `statement`.
    ///
    /// Surrounding whitespace is ignored. Statements that do not start with
    /// `SELECT`, `UPDATE`, `DELETE`, `INSERT` or `REPLACE` are rejected with
    /// `Error::UnknownStatement`. Only `SELECT` statements get columns and
    /// tables; the others are classified and returned empty.
    pub fn parse_with(statement: &'a str, config: &Config) -> Result<Self> {
        let statement = statement.trim();
        let mut toker = Tokenizer::new(statement, 0);
        let leading = toker.next_token();
        let query_type = QueryType::from_token(&leading);
        if query_type == QueryType::Unknown {
            return Err(Error::UnknownStatement(leading.text().to_string()));
        }

        if config.validate {
            validate(statement, &config.dialect)?;
        }
        if config.strict {
            check_terminated(statement)?;
        }

        let mut query = Self {
            statement,
            query_type,
            distinct: false,
            columns: Vec::new(),
            tables: Vec::new(),
        };
        if query_type == QueryType::Select {
            let mut toker = Tokenizer::new(statement, leading.end());
            query.parse_select(&mut toker)?;
        }
        debug!(
            "{} statement with {} column(s) and {} table(s)",
            query.query_type,
            query.columns.len(),
            query.tables.len()
        );
        Ok(query)
    }

    fn parse_select(&mut self, toker: &mut Tokenizer<'a>) -> Result {
        let mut leading = true;
        while let Some(token) = toker.next() {
            match token.kind() {
                TokenKind::Space | TokenKind::Comma => continue,
                _ => {}
            }
            if token.is_keyword(Keyword::From) {
                self.parse_from(toker);
                break;
            }
            if leading && is_set_quantifier(&token, toker) {
                self.distinct = token.is_keyword(Keyword::Distinct);
                leading = false;
                continue;
            }
            leading = false;
            let column = match token.kind().starts_column() {
                true => ColumnRef::parse(toker, token)?,
                false => ColumnRef::parse_expression(toker, token),
            };
            self.columns.push(column);
        }
        self.resolve_tables();
        Ok(())
    }

    fn parse_from(&mut self, toker: &mut Tokenizer<'a>) {
        while let Some(token) = toker.next() {
            match token.kind() {
                TokenKind::Space | TokenKind::Comma => continue,
                _ => {}
            }
            if ends_table_list(&token) || !token.kind().starts_column() {
                trace!("table list ends at {:?}", token.text());
                break;
            }
            self.tables.push(TableRef::parse(toker, token));
        }
    }

    /// Replace table aliases used as column qualifiers with table names.
    fn resolve_tables(&mut self) {
        for column in self.columns.iter_mut().filter(|c| c.is_qualified()) {
            match self.tables.iter().find(|t| t.answers_to(column.table_alias)) {
                Some(table) => column.source_table = table.name,
                None => warn!(
                    "qualifier {:?} of column {:?} matches no table",
                    column.table_alias, column.reference
                ),
            }
        }
    }

    /// The trimmed statement.
    pub fn statement(&self) -> &'a str {
        self.statement
    }

    pub fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// True for `SELECT DISTINCT`.
    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Column references in select-list order.
    pub fn columns(&self) -> &[ColumnRef<'a>] {
        &self.columns
    }

    /// Tables of the `FROM` clause, up to the first join or clause keyword.
    pub fn tables(&self) -> &[TableRef<'a>] {
        &self.tables
    }

    /// The column the result set exposes as `alias`.
    pub fn column(&self, alias: &str) -> Option<&ColumnRef<'a>> {
        self.columns.iter().find(|c| c.has_alias(alias))
    }

    /// Result set position of the column exposed as `alias`.
    pub fn column_index(&self, alias: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.has_alias(alias))
    }

    /// True if the select list contains `*` or `table.*`.
    pub fn has_wildcard(&self) -> bool {
        self.columns.iter().any(ColumnRef::is_wildcard)
    }

    pub fn into_columns(self) -> Vec<ColumnRef<'a>> {
        self.columns
    }
}

/// `DISTINCT` / `ALL` right after `SELECT`, unless it is itself the only
/// column (`SELECT all FROM t`).
fn is_set_quantifier(token: &Token<'_>, toker: &Tokenizer<'_>) -> bool {
    if !(token.is_keyword(Keyword::Distinct) || token.is_keyword(Keyword::All)) {
        return false;
    }
    let mut ahead = toker.clone();
    ahead
        .find(|t| t.kind() != TokenKind::Space)
        .is_some_and(|t| t.kind() != TokenKind::Comma && !t.is_keyword(Keyword::From))
}

/// Fail on the first quote, bracket or parenthesis that is never closed.
fn check_terminated(statement: &str) -> Result {
    match Tokenizer::new(statement, 0).find(|t| !t.is_terminated()) {
        Some(token) => Err(Error::Unterminated {
            kind: token.kind(),
            offset: token.start(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools as _;
    use rstest::rstest;

    fn aliases<'a>(query: &Query<'a>) -> Vec<&'a str> {
        query.columns().iter().map(|c| c.column_alias).collect_vec()
    }

    #[rstest]
    #[case("SELECT 1", QueryType::Select)]
    #[case("  select a from t", QueryType::Select)]
    #[case("SELECT*FROM t", QueryType::Select)]
    #[case("Update t SET a = 1", QueryType::Update)]
    #[case("DELETE FROM t", QueryType::Delete)]
    #[case("insert into t values (1)", QueryType::Insert)]
    #[case("REPLACE INTO t VALUES (1)", QueryType::Replace)]
    #[case("selection", QueryType::Unknown)]
    #[case("WITH x AS (SELECT 1) SELECT * FROM x", QueryType::Unknown)]
    #[case("", QueryType::Unknown)]
    fn detects_query_type(#[case] sql: &str, #[case] expected: QueryType) {
        assert_eq!(QueryType::detect(sql), expected);
    }

    #[test]
    fn query_type_codes() {
        assert_eq!(QueryType::Unknown.code(), 0);
        assert_eq!(QueryType::Select.code(), 1);
        assert_eq!(QueryType::Replace.code(), 5);
        assert_eq!(QueryType::Delete.to_string(), "DELETE");
    }

    #[test]
    fn select_list_until_from() {
        crate::testing::common_init();
        let query = Query::parse("SELECT name, age FROM users").expect("query");
        assert_eq!(query.query_type(), QueryType::Select);
        assert_eq!(aliases(&query), ["name", "age"]);
        assert_eq!(query.tables().len(), 1);
        assert_eq!(query.tables()[0].name, "users");
        assert!(!query.is_distinct());
    }

    #[test]
    fn aliases_and_qualifiers_resolve_through_table_list() {
        crate::testing::common_init();
        let sql = "SELECT u.id, u.name AS user_name, count(o.id) orders, o.* \
                   FROM users u, shop.orders AS o WHERE o.user_id = u.id";
        let query = Query::parse(sql).expect("query");
        let columns = query.columns();
        assert_eq!(columns.len(), 4);

        assert_eq!(columns[0].column_name, "id");
        assert_eq!(columns[0].table_alias, "u");
        assert_eq!(columns[0].source_table, "users");

        assert_eq!(columns[1].column_name, "name");
        assert_eq!(columns[1].column_alias, "user_name");
        assert_eq!(columns[1].source_table, "users");

        assert_eq!(columns[2].column_name, "count(o.id)");
        assert_eq!(columns[2].column_alias, "orders");
        assert_eq!(columns[2].source_table, "");

        assert!(columns[3].is_wildcard());
        assert_eq!(columns[3].table_alias, "o");
        assert_eq!(columns[3].source_table, "orders");
        assert!(query.has_wildcard());

        let tables = query.tables();
        assert_eq!(tables.len(), 2);
        assert_eq!((tables[0].name, tables[0].alias), ("users", "u"));
        assert_eq!(
            (tables[1].schema, tables[1].name, tables[1].alias),
            ("shop", "orders", "o")
        );
        assert_eq!(tables[1].reference, "shop.orders AS o");
    }

    #[test]
    fn unknown_qualifier_keeps_written_table() {
        let query = Query::parse("SELECT x.a FROM t").expect("query");
        assert_eq!(query.columns()[0].source_table, "x");
    }

    #[rstest]
    #[case("SELECT DISTINCT a, b FROM t", true, &["a", "b"])]
    #[case("SELECT ALL a FROM t", false, &["a"])]
    #[case("SELECT all FROM t", false, &["all"])]
    #[case("SELECT distinct, b FROM t", false, &["distinct", "b"])]
    fn set_quantifiers(#[case] sql: &str, #[case] distinct: bool, #[case] expected: &[&str]) {
        let query = Query::parse(sql).expect("query");
        assert_eq!(query.is_distinct(), distinct);
        assert_eq!(aliases(&query), expected);
    }

    #[test]
    fn wildcard_select() {
        let query = Query::parse("SELECT * FROM t").expect("query");
        assert_eq!(aliases(&query), ["*"]);
        assert!(query.has_wildcard());
    }

    #[test]
    fn sub_expressions_and_literals_in_from_stop_table_list() {
        let query =
            Query::parse("SELECT a FROM (SELECT a FROM t) AS d JOIN u ON u.a = d.a").expect("query");
        assert_eq!(query.tables().len(), 1);
        assert_eq!(query.tables()[0].name, "(SELECT a FROM t)");
        assert_eq!(query.tables()[0].alias, "d");
    }

    #[test]
    fn statement_without_from() {
        let query = Query::parse("  SELECT 1 AS one, now()  ;").expect("query");
        assert_eq!(query.statement(), "SELECT 1 AS one, now()  ;");
        assert_eq!(aliases(&query), ["one", "now()  ;"]);
        assert!(query.tables().is_empty());
    }

    #[test]
    fn trailing_semicolon_ends_table_list() {
        let query = Query::parse("SELECT a FROM t x;").expect("query");
        assert_eq!(query.tables().len(), 1);
        assert_eq!(query.tables()[0].alias, "x");
    }

    #[test]
    fn lookup_by_alias() {
        let query = Query::parse("SELECT id, `Full Name` AS [Name] FROM people").expect("query");
        assert_eq!(query.column_index("ID"), Some(0));
        assert_eq!(query.column_index("name"), Some(1));
        assert_eq!(
            query.column("[NAME]").map(|c| c.column_name),
            Some("`Full Name`")
        );
        assert_eq!(query.column("missing"), None);
        assert_eq!(query.into_columns().len(), 2);
    }

    #[test]
    fn non_select_statements_are_classified_only() {
        let query = Query::parse("UPDATE t SET a = 1").expect("query");
        assert_eq!(query.query_type(), QueryType::Update);
        assert!(query.columns().is_empty());
        assert!(query.tables().is_empty());
    }

    #[test]
    fn unknown_statement_is_an_error() {
        let err = Query::parse("EXPLAIN SELECT 1").unwrap_err();
        assert!(matches!(err, Error::UnknownStatement(ref word) if word == "EXPLAIN"));
    }

    #[rstest]
    #[case("SELECT 'active' AS status, id FROM t", &["status", "id"])]
    #[case("SELECT +1 AS one FROM t", &["one"])]
    #[case("SELECT -1, 'x' FROM t", &["-1", "'x'"])]
    fn literal_and_signed_columns_are_expressions(#[case] sql: &str, #[case] expected: &[&str]) {
        let query = Query::parse(sql).expect("query");
        assert_eq!(aliases(&query), expected);
        assert_eq!(query.tables()[0].name, "t");
    }

    #[test]
    fn star_before_from_without_space() {
        let query = Query::parse("SELECT a,*FROM t").expect("query");
        assert_eq!(aliases(&query), ["a", "*"]);
        assert!(query.has_wildcard());
        assert_eq!(query.tables().len(), 1);
        assert_eq!(query.tables()[0].name, "t");
    }

    #[rstest]
    #[case("SELECT count(a FROM t", TokenKind::SubExpr, 12)]
    #[case("SELECT count(a, max(b)", TokenKind::SubExpr, 12)]
    #[case("SELECT f('a)", TokenKind::SubExpr, 8)]
    #[case("SELECT (a (b)", TokenKind::SubExpr, 7)]
    #[case("SELECT [a FROM t", TokenKind::Quoted, 7)]
    #[case("SELECT a FROM t WHERE b = 'x", TokenKind::Literal, 26)]
    fn strict_mode_rejects_unterminated_tokens(
        #[case] sql: &str,
        #[case] kind: TokenKind,
        #[case] offset: usize,
    ) {
        assert!(Query::parse(sql).is_ok());

        let config = Config {
            strict: true,
            ..Config::default()
        };
        let err = Query::parse_with(sql, &config).unwrap_err();
        assert!(
            matches!(err, Error::Unterminated { kind: k, offset: o } if k == kind && o == offset),
            "got {err:?}"
        );
    }

    #[test]
    fn strict_mode_accepts_closed_tokens() {
        let config = Config {
            strict: true,
            ..Config::default()
        };
        assert!(Query::parse_with("SELECT [a], f('x)', (b)) FROM t", &config).is_ok());
    }

    #[test]
    fn validation_uses_sqlparser() {
        let config = Config {
            validate: true,
            ..Config::default()
        };
        assert!(Query::parse_with("SELECT a FROM t", &config).is_ok());
        let err = Query::parse_with("SELECT a FROM", &config).unwrap_err();
        assert!(matches!(err, Error::InvalidQuery(_)), "got {err:?}");
    }

    #[rstest]
    #[case("SELECT a, b AS c, t.d FROM t")]
    #[case("SELECT count(*) AS n, max(x) FROM t")]
    #[case("SELECT t.a, (SELECT 1) AS s, x + y AS z FROM t")]
    fn column_count_matches_sqlparser(#[case] sql: &str) {
        use sqlparser::{ast::SetExpr, ast::Statement, dialect::GenericDialect, parser::Parser};

        let statements = Parser::parse_sql(&GenericDialect {}, sql).expect("valid sql");
        let Some(Statement::Query(parsed)) = statements.first() else {
            panic!("expected a query");
        };
        let SetExpr::Select(select) = parsed.body.as_ref() else {
            panic!("expected a select");
        };
        let query = Query::parse(sql).expect("query");
        assert_eq!(query.columns().len(), select.projection.len());
    }
}
