//! SQL literal formatting
//!
//! Every value that ends up in generated menu SQL is rendered here. Statements
//! are plain text with interpolated literals (no bound parameters), so this is
//! the single place to change when switching to parameter binding.

use std::fmt;

/// Escape a SQL string literal value by doubling single quotes.
///
/// This is for use inside single-quoted SQL string literals, not identifiers.
pub fn escape_sql_string(value: &str) -> String {
    value.replace('\'', "''")
}

/// Render a value as a single-quoted SQL string literal.
///
/// # Examples
/// ```
/// use mm_core::sql_utils::quote_literal;
/// assert_eq!(quote_literal("Func"), "'Func'");
/// assert_eq!(quote_literal("Bob's"), "'Bob''s'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_sql_string(value))
}

/// A literal value destined for an INSERT value list or UPDATE assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    /// `NULL`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i64),
    /// Quoted string literal
    Text(String),
    /// Pre-rendered SQL expression (e.g. a correlated sub-select)
    Expr(String),
}

impl SqlValue {
    /// Text literal, or `NULL` when absent.
    pub fn text_or_null(value: Option<&str>) -> Self {
        match value {
            Some(v) => SqlValue::Text(v.to_string()),
            None => SqlValue::Null,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Bool(b) => write!(f, "{b}"),
            SqlValue::Int(i) => write!(f, "{i}"),
            SqlValue::Text(s) => f.write_str(&quote_literal(s)),
            SqlValue::Expr(e) => f.write_str(e),
        }
    }
}

/// Ordered column/value pairs.
///
/// Optional trailing columns are added with [`push_some`](Self::push_some) so
/// the column and value lists always stay the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Columns {
    entries: Vec<(&'static str, SqlValue)>,
}

impl Columns {
    /// Create an empty column list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    pub fn push(&mut self, column: &'static str, value: SqlValue) -> &mut Self {
        self.entries.push((column, value));
        self
    }

    /// Append a column only when a value is present.
    pub fn push_some(&mut self, column: &'static str, value: Option<SqlValue>) -> &mut Self {
        if let Some(value) = value {
            self.entries.push((column, value));
        }
        self
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no columns were added
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `a, b, c`
    pub fn names(&self) -> String {
        self.entries
            .iter()
            .map(|(column, _)| *column)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `'x', 1, NULL`
    pub fn values(&self) -> String {
        self.entries
            .iter()
            .map(|(_, value)| value.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `a = 'x', b = 1`
    pub fn assignments(&self) -> String {
        self.entries
            .iter()
            .map(|(column, value)| format!("{column} = {value}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
