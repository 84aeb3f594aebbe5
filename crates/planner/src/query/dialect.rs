//! Defines the `Dialect` trait for database-specific SQL syntax.

use crate::{
    error::QueryError,
    query::{
        ast::{common::Column, insert::Returning},
        placeholder::PlaceholderStyle,
    },
};
use model::core::{utils::quote_sql_string, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the correct
    /// quotation marks for the dialect.
    ///
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - MySQL uses backticks: `` `my_column` ``
    fn quote_identifier(&self, ident: &str) -> String;

    /// How bind markers are spelled, used to find them in rendered text.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// Returns the placeholder for the parameter with the given number.
    ///
    /// - PostgreSQL uses `$1`, `$2`, etc.
    /// - MySQL uses `?`
    fn get_placeholder(&self, number: usize) -> String;

    /// Number given to the first placeholder of a statement.
    fn placeholder_start(&self) -> usize {
        1
    }

    /// Whether a backslash escapes the next character inside string literals.
    fn backslash_escapes(&self) -> bool {
        false
    }

    /// Renders a value as inline literal SQL.
    fn render_literal(&self, value: &Value) -> Result<String, QueryError>;

    fn supports_returning(&self) -> bool {
        true
    }

    /// Renders the body of a RETURNING clause (everything after the keyword).
    fn render_returning(&self, returning: &Returning) -> Result<String, QueryError> {
        if !self.supports_returning() {
            return Err(QueryError::UnsupportedFeature {
                dialect: self.name(),
                feature: "RETURNING".into(),
            });
        }

        Ok(match returning {
            Returning::All => "*".into(),
            Returning::Columns(columns) => self.render_column_list(columns),
        })
    }

    /// Comma-joined, unqualified column names.
    fn render_column_list(&self, columns: &[Column]) -> String {
        columns
            .iter()
            .map(|c| self.quote_identifier(&c.name))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the name of the dialect (e.g., "PostgreSQL", "MySQL").
    fn name(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Numbered('$')
    }

    fn get_placeholder(&self, number: usize) -> String {
        format!("${number}")
    }

    fn render_literal(&self, value: &Value) -> Result<String, QueryError> {
        match value {
            Value::Bytes(bytes) => Ok(format!(r"'\x{}'::bytea", hex::encode(bytes))),
            Value::Timestamp(ts) => Ok(format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f%:z"))),
            Value::StringArray(items) if items.is_empty() => Ok("'{}'".into()),
            Value::StringArray(items) => {
                let items = items
                    .iter()
                    .map(|s| quote_sql_string(s, false))
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(format!("ARRAY[{items}]"))
            }
            other => render_common_literal(self, other),
        }
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }
}

#[derive(Debug, Clone)]
pub struct MySql;

impl Dialect for MySql {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Positional
    }

    fn get_placeholder(&self, _number: usize) -> String {
        // MySQL uses ?
        "?".into()
    }

    fn render_literal(&self, value: &Value) -> Result<String, QueryError> {
        match value {
            Value::Bytes(bytes) => Ok(format!("X'{}'", hex::encode(bytes))),
            other => render_common_literal(self, other),
        }
    }

    fn backslash_escapes(&self) -> bool {
        true
    }

    fn supports_returning(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        "MySQL".into()
    }
}

/// Plain ANSI-style SQL: identifiers stay bare unless they need quoting,
/// numbered `$n` placeholders.
#[derive(Debug, Clone)]
pub struct Generic;

impl Dialect for Generic {
    fn quote_identifier(&self, ident: &str) -> String {
        if is_plain_identifier(ident) {
            ident.to_string()
        } else {
            format!(r#""{}""#, ident.replace('"', r#""""#))
        }
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Numbered('$')
    }

    fn get_placeholder(&self, number: usize) -> String {
        format!("${number}")
    }

    fn render_literal(&self, value: &Value) -> Result<String, QueryError> {
        match value {
            Value::Bytes(bytes) => Ok(format!("X'{}'", hex::encode(bytes))),
            other => render_common_literal(self, other),
        }
    }

    fn name(&self) -> String {
        "Generic".into()
    }
}

/// Literal forms shared by every dialect. Anything without a portable
/// spelling is reported as unsupported.
fn render_common_literal<D: Dialect + ?Sized>(
    dialect: &D,
    value: &Value,
) -> Result<String, QueryError> {
    let escape_backslash = dialect.backslash_escapes();
    let unsupported = |kind: &str| QueryError::UnsupportedValue {
        dialect: dialect.name(),
        kind: kind.to_string(),
    };

    match value {
        Value::Int(v) => Ok(v.to_string()),
        Value::Uint(v) => Ok(v.to_string()),
        Value::Float(v) if v.is_finite() => Ok(format!("{v:?}")),
        Value::Float(_) => Err(unsupported("non-finite float")),
        Value::String(s) => Ok(quote_sql_string(s, escape_backslash)),
        Value::Boolean(true) => Ok("TRUE".into()),
        Value::Boolean(false) => Ok("FALSE".into()),
        Value::Json(json) => Ok(quote_sql_string(&json.to_string(), escape_backslash)),
        Value::Uuid(uuid) => Ok(format!("'{uuid}'")),
        Value::Date(date) => Ok(format!("'{}'", date.format("%Y-%m-%d"))),
        Value::Timestamp(ts) => Ok(format!("'{}'", ts.format("%Y-%m-%d %H:%M:%S%.f"))),
        Value::Null => Ok("NULL".into()),
        Value::Bytes(_) | Value::StringArray(_) => Err(unsupported(value.kind())),
    }
}

fn is_plain_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// Selects a dialect by name, e.g. from a command line flag or a request file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    Postgres,
    MySql,
    #[default]
    Generic,
}

impl DialectKind {
    pub const ALL: [DialectKind; 3] = [
        DialectKind::Postgres,
        DialectKind::MySql,
        DialectKind::Generic,
    ];

    pub fn dialect(&self) -> Box<dyn Dialect> {
        match self {
            DialectKind::Postgres => Box::new(Postgres),
            DialectKind::MySql => Box::new(MySql),
            DialectKind::Generic => Box::new(Generic),
        }
    }
}

impl FromStr for DialectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(DialectKind::Postgres),
            "mysql" | "mariadb" => Ok(DialectKind::MySql),
            "generic" | "ansi" => Ok(DialectKind::Generic),
            other => Err(format!("Unknown dialect: {other}")),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialectKind::Postgres => "postgres",
            DialectKind::MySql => "mysql",
            DialectKind::Generic => "generic",
        };
        f.write_str(name)
    }
}
