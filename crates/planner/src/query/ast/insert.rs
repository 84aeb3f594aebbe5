//! Defines the AST for an INSERT statement.

use crate::query::ast::{
    common::{Column, TableRef},
    expr::Expr,
    subquery::SubQuery,
};

/// Represents a complete INSERT statement.
///
/// Rows and a sub-query are mutually exclusive sources, so both live in
/// one [`InsertSource`]. A statement without any source is representable
/// but fails to render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    /// Target columns. `None` means values follow the table's column order.
    pub columns: Option<Vec<Column>>,
    pub source: Option<InsertSource>,
    pub returning: Option<Returning>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// The rows of values to be inserted. Each inner vector is a single row.
    Rows(Vec<Vec<Expr>>),
    /// `INSERT INTO ... SELECT ...`
    Query(SubQuery),
}

/// The RETURNING clause.
#[derive(Debug, Clone, PartialEq)]
pub enum Returning {
    All,
    Columns(Vec<Column>),
}
