//! The handful of SQL keywords the introspection layer needs to recognise.
//!
//! Keywords are never produced by the tokenizer itself: a keyword is an
//! `Ident` token whose text happens to match one of these words. The query
//! layer asks `Token::is_keyword` at the points where a keyword matters
//! (statement type, `FROM` boundary, `AS`, `DISTINCT`, clause terminators).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    Update,
    Delete,
    Insert,
    Replace,
    From,
    As,
    Distinct,
    All,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Natural,
    On,
    Using,
    Where,
    Group,
    Having,
    Order,
    Limit,
    Offset,
    Union,
    Except,
    Intersect,
    Window,
}

impl Keyword {
    /// Keywords that end the table list of a `FROM` clause.
    pub const TERMINATORS: [Self; 19] = [
        Keyword::Where,
        Keyword::Group,
        Keyword::Having,
        Keyword::Order,
        Keyword::Limit,
        Keyword::Offset,
        Keyword::Union,
        Keyword::Except,
        Keyword::Intersect,
        Keyword::Window,
        Keyword::Join,
        Keyword::Inner,
        Keyword::Left,
        Keyword::Right,
        Keyword::Full,
        Keyword::Cross,
        Keyword::Natural,
        Keyword::On,
        Keyword::Using,
    ];

    /// Attempt to classify a *lower‑cased* word slice into a `Keyword`.
    ///
    /// NOTE: The caller is responsible for lower‑casing the input.
    pub fn from_lower(word: &str) -> Option<Self> {
        use Keyword::*;
        let kw = match word {
            "select" => Select,
            "update" => Update,
            "delete" => Delete,
            "insert" => Insert,
            "replace" => Replace,
            "from" => From,
            "as" => As,
            "distinct" => Distinct,
            "all" => All,
            "join" => Join,
            "inner" => Inner,
            "left" => Left,
            "right" => Right,
            "full" => Full,
            "cross" => Cross,
            "natural" => Natural,
            "on" => On,
            "using" => Using,
            "where" => Where,
            "group" => Group,
            "having" => Having,
            "order" => Order,
            "limit" => Limit,
            "offset" => Offset,
            "union" => Union,
            "except" => Except,
            "intersect" => Intersect,
            "window" => Window,
            _ => return None,
        };
        Some(kw)
    }

    /// Case-insensitive classification of an arbitrary word.
    pub fn parse(word: &str) -> Option<Self> {
        Self::from_lower(&word.to_ascii_lowercase())
    }

    /// Canonical lowercase string form of the keyword.
    pub const fn as_str(self) -> &'static str {
        use Keyword::*;
        match self {
            Select => "select",
            Update => "update",
            Delete => "delete",
            Insert => "insert",
            Replace => "replace",
            From => "from",
            As => "as",
            Distinct => "distinct",
            All => "all",
            Join => "join",
            Inner => "inner",
            Left => "left",
            Right => "right",
            Full => "full",
            Cross => "cross",
            Natural => "natural",
            On => "on",
            Using => "using",
            Where => "where",
            Group => "group",
            Having => "having",
            Order => "order",
            Limit => "limit",
            Offset => "offset",
            Union => "union",
            Except => "except",
            Intersect => "intersect",
            Window => "window",
        }
    }

    /// True if `word` equals this keyword, ignoring ASCII case.
    pub fn matches(self, word: &str) -> bool {
        word.eq_ignore_ascii_case(self.as_str())
    }

    pub fn is_terminator(self) -> bool {
        Self::TERMINATORS.contains(&self)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
