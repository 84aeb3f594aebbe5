//! The row source of an `INSERT ... SELECT`.

use crate::query::ast::select::Select;
use model::core::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum SubQuery {
    /// A structured SELECT, rendered through the enclosing renderer.
    Select(Select),
    /// A SELECT that was rendered elsewhere.
    Raw(RawQuery),
}

/// Pre-rendered SELECT text together with the parameters its placeholders
/// refer to. Placeholders inside `sql` use the target dialect's syntax and
/// their own numbering; both are rewritten when the enclosing statement is
/// rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    pub sql: String,
    pub params: Vec<Value>,
    /// Declared projection width, if known.
    pub fields: Option<usize>,
}

impl RawQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            fields: None,
        }
    }

    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params = params;
        self
    }

    pub fn with_fields(mut self, fields: usize) -> Self {
        self.fields = Some(fields);
        self
    }
}

impl SubQuery {
    /// Number of fields the sub-query projects, when it is known.
    pub fn field_count(&self) -> Option<usize> {
        match self {
            SubQuery::Select(select) => select.field_count(),
            SubQuery::Raw(raw) => raw.fields,
        }
    }
}

impl From<Select> for SubQuery {
    fn from(select: Select) -> Self {
        SubQuery::Select(select)
    }
}

impl From<RawQuery> for SubQuery {
    fn from(raw: RawQuery) -> Self {
        SubQuery::Raw(raw)
    }
}
