use crate::query::ast::{
    common::Column,
    expr::{Expr, Ident},
};
use model::core::value::Value;

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod macros;
pub mod placeholder;
pub mod renderer;

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident {
        qualifier: None,
        name: name.to_string(),
    })
}

/// A value inlined as a literal.
pub fn value(val: impl Into<Value>) -> Expr {
    Expr::Value(val.into())
}

/// A value bound to a placeholder.
pub fn param(val: impl Into<Value>) -> Expr {
    Expr::Param(val.into())
}

pub fn columns<I, S>(names: I) -> Vec<Column>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names.into_iter().map(Column::new).collect()
}
