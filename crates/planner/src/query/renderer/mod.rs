//! Defines the core rendering trait and context for converting AST to SQL.

use model::core::value::Value;

use crate::{
    error::QueryError,
    query::{ast::common::TableRef, dialect::Dialect, placeholder::SqlBuffer},
};

pub mod expr;
pub mod insert;
pub mod select;
pub mod subquery;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer) -> Result<(), QueryError>;
}

/// A context that holds the state during the rendering process.
///
/// It accumulates the SQL text and the parameters, and provides access to
/// the dialect for syntax-specific details. One renderer serves exactly one
/// top-level statement, nested queries included, so placeholder numbering
/// always starts fresh.
pub struct Renderer<'a> {
    pub sql: SqlBuffer,
    pub params: Vec<Value>,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: SqlBuffer::new(),
            params: Vec::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string and parameters.
    pub fn finish(self) -> (String, Vec<Value>) {
        (self.sql.finish(self.dialect), self.params)
    }

    /// Binds `value` and emits a placeholder for it.
    pub fn add_param(&mut self, value: Value) {
        self.params.push(value);
        self.sql.push_placeholder();
    }

    /// Emits `value` as an inline literal.
    pub fn add_literal(&mut self, value: &Value) -> Result<(), QueryError> {
        let literal = self.dialect.render_literal(value)?;
        self.sql.push_str(&literal);
        Ok(())
    }

    pub fn render_table_ref(&mut self, table: &TableRef) {
        if let Some(schema) = &table.schema {
            self.sql.push_str(&self.dialect.quote_identifier(schema));
            self.sql.push('.');
        }
        self.sql.push_str(&self.dialect.quote_identifier(&table.name));
    }

    /// Renders `items` separated by `", "`.
    pub fn render_list<T: Render>(&mut self, items: &[T]) -> Result<(), QueryError> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            item.render(self)?;
        }
        Ok(())
    }
}

/// Renders a complete statement with a fresh renderer.
pub fn render_statement<T: Render>(
    ast: &T,
    dialect: &dyn Dialect,
) -> Result<(String, Vec<Value>), QueryError> {
    let mut renderer = Renderer::new(dialect);
    ast.render(&mut renderer)?;
    Ok(renderer.finish())
}
