//! JSON description of an INSERT statement, as read by `dmlq`.
//!
//! ```json
//! {
//!   "table": "users",
//!   "columns": ["id", "name"],
//!   "rows": [[1, "Alice"], [2, {"param": "Bob"}]],
//!   "returning": ["id"],
//!   "dialect": "postgres"
//! }
//! ```
//!
//! Plain JSON cells are inlined as literals, `{"param": ...}` binds the value
//! to a placeholder and `{"typed": ...}` carries a value whose type JSON
//! cannot express (dates, timestamps, bytes, uuids).

use crate::error::CliError;
use planner::query::{
    ast::{
        common::{Column, TableRef},
        expr::Expr,
        subquery::{RawQuery, SubQuery},
    },
    builder::{insert::InsertBuilder, select::SelectBuilder},
    dialect::DialectKind,
    ident,
};
use model::core::value::Value;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct InsertRequest {
    pub table: String,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default)]
    pub rows: Option<Vec<Vec<RequestCell>>>,
    #[serde(default)]
    pub values: Option<Vec<RequestCell>>,
    #[serde(default)]
    pub pairs: Option<Vec<(String, RequestCell)>>,
    #[serde(default)]
    pub query: Option<RequestQuery>,
    #[serde(default)]
    pub returning: Option<RequestReturning>,
    #[serde(default)]
    pub dialect: Option<DialectKind>,
}

/// One cell of a row.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestCell {
    Param { param: RequestValue },
    Value(RequestValue),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestValue {
    Typed { typed: Value },
    Json(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestQuery {
    /// Hand-written SQL with its own bind markers.
    Raw {
        sql: String,
        #[serde(default)]
        params: Vec<RequestValue>,
        #[serde(default)]
        fields: Option<usize>,
    },
    /// A plain projection over one table.
    Select {
        from: String,
        #[serde(default)]
        schema: Option<String>,
        #[serde(default)]
        columns: Vec<String>,
        #[serde(default)]
        limit: Option<RequestCell>,
    },
}

/// `"*"` for every column, otherwise one or more column names.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestReturning {
    One(String),
    Many(Vec<String>),
}

impl InsertRequest {
    pub fn from_json(source: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Builds the statement descriptor. A request naming more than one
    /// source is rejected; a request naming none yields a descriptor that
    /// fails when rendered.
    pub fn into_builder(self) -> Result<InsertBuilder, CliError> {
        let sources = [
            self.rows.is_some(),
            self.values.is_some(),
            self.pairs.is_some(),
            self.query.is_some(),
        ];
        if sources.iter().filter(|s| **s).count() > 1 {
            return Err(CliError::InvalidRequest(
                "only one of `rows`, `values`, `pairs` and `query` may be given".into(),
            ));
        }

        let table = TableRef {
            schema: self.schema,
            name: self.table,
        };
        let columns = self
            .columns
            .map(|names| names.into_iter().map(Column::new).collect::<Vec<_>>());

        let builder = if let Some(rows) = self.rows {
            let rows = rows
                .into_iter()
                .map(|row| row.into_iter().map(RequestCell::into_expr).collect())
                .collect();
            InsertBuilder::with_rows(table, columns, rows)
        } else if let Some(values) = self.values {
            let values = values.into_iter().map(RequestCell::into_expr).collect();
            InsertBuilder::with_values(table, columns, values)
        } else if let Some(pairs) = self.pairs {
            if columns.is_some() {
                return Err(CliError::InvalidRequest(
                    "`pairs` already name their columns".into(),
                ));
            }
            InsertBuilder::with_pairs(
                table,
                pairs.into_iter().map(|(c, v)| (c, v.into_expr())),
            )
        } else if let Some(query) = self.query {
            InsertBuilder::with_query(table, columns, query.into_subquery())
        } else {
            InsertBuilder::with_rows(table, columns, Vec::new())
        };

        Ok(match self.returning {
            None => builder,
            Some(RequestReturning::One(col)) if col == "*" => builder.returning_all(),
            Some(RequestReturning::One(col)) => builder.returning([col]),
            Some(RequestReturning::Many(cols)) => builder.returning(cols),
        })
    }
}

impl RequestCell {
    fn into_expr(self) -> Expr {
        match self {
            RequestCell::Param { param } => Expr::Param(param.into_value()),
            RequestCell::Value(value) => Expr::Value(value.into_value()),
        }
    }
}

impl RequestValue {
    fn into_value(self) -> Value {
        match self {
            RequestValue::Typed { typed } => typed,
            RequestValue::Json(json) => json_to_value(json),
        }
    }
}

impl RequestQuery {
    fn into_subquery(self) -> SubQuery {
        match self {
            RequestQuery::Raw {
                sql,
                params,
                fields,
            } => {
                let raw = RawQuery::new(sql)
                    .with_params(params.into_iter().map(RequestValue::into_value).collect());
                match fields {
                    Some(n) => raw.with_fields(n).into(),
                    None => raw.into(),
                }
            }
            RequestQuery::Select {
                from,
                schema,
                columns,
                limit,
            } => {
                let projection = columns.iter().map(|c| ident(c)).collect();
                let table = TableRef { schema, name: from };
                let mut select = SelectBuilder::new().select(projection).from(table, None);
                if let Some(limit) = limit {
                    select = select.limit(limit.into_expr());
                }
                select.build().into()
            }
        }
    }
}

fn json_to_value(json: serde_json::Value) -> Value {
    use serde_json::Value as Json;

    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Boolean(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::Uint(u)
            } else {
                Value::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Json::String(s) => Value::String(s),
        Json::Array(items) if items.iter().all(Json::is_string) => Value::StringArray(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Json::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        other => Value::Json(other),
    }
}
