//! Provides the INSERT statement descriptor.
//!
//! Construction never fails. Shape problems noticed while the statement is
//! assembled (row width, sub-query width, a second RETURNING clause) are
//! recorded as diagnostics and surface as a single [`QueryError::Syntax`]
//! when the statement is built, so calls can keep chaining in between.

use crate::{
    error::QueryError,
    query::{
        ast::{
            common::{Column, TableRef},
            expr::Expr,
            insert::{Insert, InsertSource, Returning},
            subquery::SubQuery,
        },
        dialect::Dialect,
        renderer::render_statement,
    },
};
use model::core::value::Value;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct InsertBuilder {
    ast: Insert,
    diagnostics: Vec<String>,
}

impl InsertBuilder {
    /// A single row. When `columns` is given, the row must be as wide.
    pub fn with_values(table: TableRef, columns: Option<Vec<Column>>, values: Vec<Expr>) -> Self {
        Self::with_rows(table, columns, vec![values])
    }

    /// Several rows. Every row whose width differs from `columns` adds a
    /// diagnostic naming its index.
    pub fn with_rows(table: TableRef, columns: Option<Vec<Column>>, rows: Vec<Vec<Expr>>) -> Self {
        let mut builder = Self::empty(table, columns);

        if let Some(expected) = builder.ast.columns.as_ref().map(Vec::len) {
            for (index, row) in rows.iter().enumerate() {
                if row.len() != expected {
                    builder.record(format!(
                        "Values count in row number {index} doesn't match column count \
                         (expected {expected}, got {}).",
                        row.len()
                    ));
                }
            }
        }

        builder.ast.source = Some(InsertSource::Rows(rows));
        builder
    }

    /// A single row covering every column of the table, in table order.
    pub fn values(table: TableRef, values: impl IntoIterator<Item = Expr>) -> Self {
        Self::with_values(table, None, values.into_iter().collect())
    }

    /// A single row given as `(column, value)` pairs. Columns and values
    /// keep the order of the pairs.
    pub fn with_pairs<C: Into<Column>>(
        table: TableRef,
        pairs: impl IntoIterator<Item = (C, Expr)>,
    ) -> Self {
        let (columns, values): (Vec<Column>, Vec<Expr>) =
            pairs.into_iter().map(|(c, v)| (c.into(), v)).unzip();
        Self::with_values(table, Some(columns), values)
    }

    /// `INSERT INTO ... SELECT ...`. When both the columns and the
    /// sub-query's projection are known, their widths must agree.
    pub fn with_query(
        table: TableRef,
        columns: Option<Vec<Column>>,
        query: impl Into<SubQuery>,
    ) -> Self {
        let query = query.into();
        let mut builder = Self::empty(table, columns);

        if let (Some(expected), Some(fields)) = (
            builder.ast.columns.as_ref().map(Vec::len),
            query.field_count(),
        ) && expected != fields
        {
            builder.record(format!(
                "Number of columns in Select doesn't match column count \
                 (expected {expected}, got {fields})."
            ));
        }

        builder.ast.source = Some(InsertSource::Query(query));
        builder
    }

    /// Adds `RETURNING *`.
    pub fn returning_all(self) -> Self {
        self.set_returning(Returning::All)
    }

    /// Adds `RETURNING <columns>`.
    pub fn returning<C: Into<Column>>(mut self, columns: impl IntoIterator<Item = C>) -> Self {
        let columns: Vec<Column> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() && self.ast.returning.is_none() {
            self.record("Returning clause has no columns.".to_string());
            return self;
        }
        self.set_returning(Returning::Columns(columns))
    }

    pub fn ast(&self) -> &Insert {
        &self.ast
    }

    /// Problems recorded so far, oldest first.
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Returns the statement AST, or every recorded diagnostic as one
    /// syntax error.
    pub fn build(&self) -> Result<Insert, QueryError> {
        self.check()?;
        Ok(self.ast.clone())
    }

    /// Renders the statement for `dialect`, returning the SQL and the
    /// values bound to its placeholders.
    pub fn to_sql(&self, dialect: &dyn Dialect) -> Result<(String, Vec<Value>), QueryError> {
        self.check()?;
        let (sql, params) = render_statement(&self.ast, dialect)?;
        debug!(
            table = %self.ast.table.name,
            dialect = %dialect.name(),
            params = params.len(),
            "Rendered INSERT statement"
        );
        Ok((sql, params))
    }

    fn empty(table: TableRef, columns: Option<Vec<Column>>) -> Self {
        Self {
            ast: Insert {
                table,
                columns,
                source: None,
                returning: None,
            },
            diagnostics: Vec::new(),
        }
    }

    fn set_returning(mut self, returning: Returning) -> Self {
        if self.ast.returning.is_some() {
            self.record("Multiple returning clauses.".to_string());
        } else {
            self.ast.returning = Some(returning);
        }
        self
    }

    fn record(&mut self, diagnostic: String) {
        debug!(table = %self.ast.table.name, "{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn check(&self) -> Result<(), QueryError> {
        if self.diagnostics.is_empty() {
            return Ok(());
        }
        warn!(
            table = %self.ast.table.name,
            count = self.diagnostics.len(),
            "Refusing to build INSERT with pending diagnostics"
        );
        Err(QueryError::Syntax(self.diagnostics.join(" ")))
    }
}
