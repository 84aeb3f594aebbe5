//! Provides a type-safe, fluent builder for constructing `Select` ASTs,
//! mostly used as the row source of `INSERT ... SELECT`.

// --- Typestate Marker Structs ---
// These zero-sized structs represent the state of the builder.
// They ensure that methods are called in the correct SQL order at compile time.

use crate::query::ast::{
    common::{JoinKind, OrderDir, TableRef},
    expr::{BinaryOp, BinaryOperator, Expr},
    select::{FromClause, JoinClause, OrderByExpr, Select},
};

/// The initial state of the builder before any clauses have been added.
#[derive(Debug, Default, Clone)]
pub struct InitialState;

/// The state after the `SELECT` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct SelectState;

/// The state after the `FROM` clause has been added.
#[derive(Debug, Default, Clone)]
pub struct FromState;

// --- The Main Builder ---

#[derive(Debug, Clone)]
pub struct SelectBuilder<State> {
    ast: Select,
    _state: State,
}

impl Default for SelectBuilder<InitialState> {
    fn default() -> Self {
        Self::new()
    }
}

/// Implementation for the initial state of the builder.
impl SelectBuilder<InitialState> {
    pub fn new() -> Self {
        Self {
            ast: Select::default(),
            _state: InitialState,
        }
    }

    /// Adds a `SELECT` clause with a list of columns. An empty list selects `*`.
    pub fn select(mut self, columns: Vec<Expr>) -> SelectBuilder<SelectState> {
        self.ast.columns = columns;
        SelectBuilder {
            ast: self.ast,
            _state: SelectState,
        }
    }
}

/// Implementation for the state after `SELECT` has been called.
/// The only valid next step is to specify a `FROM` table.
impl SelectBuilder<SelectState> {
    /// Adds a `FROM` clause specifying the primary table.
    pub fn from(mut self, table: TableRef, alias: Option<&str>) -> SelectBuilder<FromState> {
        self.ast.from = Some(FromClause {
            table,
            alias: alias.map(String::from),
        });
        SelectBuilder {
            ast: self.ast,
            _state: FromState,
        }
    }
}

/// Implementation for the state after `FROM` has been called.
/// From here, we can add optional clauses like `JOIN`, `WHERE`, etc.
impl SelectBuilder<FromState> {
    /// Adds a `JOIN` clause to the query.
    pub fn join(mut self, kind: JoinKind, table: TableRef, alias: Option<&str>, on: Expr) -> Self {
        self.ast.joins.push(JoinClause {
            kind,
            table,
            alias: alias.map(String::from),
            on,
        });
        self
    }

    /// Adds a `WHERE` condition, AND-ing it with any existing one.
    pub fn where_clause(mut self, condition: Expr) -> Self {
        self.ast.where_clause = Some(match self.ast.where_clause.take() {
            Some(existing) => Expr::BinaryOp(Box::new(BinaryOp {
                left: existing,
                op: BinaryOperator::And,
                right: condition,
            })),
            None => condition,
        });
        self
    }

    /// Adds an `ORDER BY` clause to the query.
    pub fn order_by(mut self, expr: Expr, direction: Option<OrderDir>) -> Self {
        self.ast.order_by.push(OrderByExpr { expr, direction });
        self
    }

    /// Adds a `LIMIT` clause to the query.
    pub fn limit(mut self, limit: Expr) -> Self {
        self.ast.limit = Some(limit);
        self
    }

    /// Adds an `OFFSET` clause to the query.
    pub fn offset(mut self, offset: Expr) -> Self {
        self.ast.offset = Some(offset);
        self
    }

    /// Finalizes and returns the constructed `Select` AST.
    pub fn build(self) -> Select {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{
            common::{JoinKind, OrderDir, TableRef},
            expr::{BinaryOp, BinaryOperator, Expr, Ident},
        },
        builder::select::SelectBuilder,
        ident, param, value,
    };

    fn qual_ident(qualifier: &str, name: &str) -> Expr {
        Expr::Identifier(Ident {
            qualifier: Some(qualifier.to_string()),
            name: name.to_string(),
        })
    }

    fn eq(left: Expr, right: Expr) -> Expr {
        Expr::BinaryOp(Box::new(BinaryOp {
            left,
            op: BinaryOperator::Eq,
            right,
        }))
    }

    #[test]
    fn test_build_simple_select() {
        let ast = SelectBuilder::new()
            .select(vec![ident("id"), ident("name")])
            .from(TableRef::new("users"), None)
            .build();

        assert_eq!(ast.columns, vec![ident("id"), ident("name")]);
        assert_eq!(ast.field_count(), Some(2));
        assert_eq!(ast.from.unwrap().table.name, "users");
        assert!(ast.where_clause.is_none());
    }

    #[test]
    fn test_where_conditions_are_and_ed() {
        let ast = SelectBuilder::new()
            .select(vec![ident("email")])
            .from(TableRef::new("users"), Some("u"))
            .where_clause(eq(qual_ident("u", "status"), param("active")))
            .where_clause(eq(qual_ident("u", "tier"), value(2)))
            .build();

        assert_eq!(ast.from.unwrap().alias, Some("u".to_string()));
        let Some(Expr::BinaryOp(op)) = ast.where_clause else {
            panic!("expected a binary op");
        };
        assert_eq!(op.op, BinaryOperator::And);
        assert_eq!(op.right, eq(qual_ident("u", "tier"), value(2)));
    }

    #[test]
    fn test_build_with_join_and_ordering() {
        let ast = SelectBuilder::new()
            .select(vec![qual_ident("u", "name"), qual_ident("p", "title")])
            .from(TableRef::new("users"), Some("u"))
            .join(
                JoinKind::Left,
                TableRef::new("posts"),
                Some("p"),
                eq(qual_ident("u", "id"), qual_ident("p", "user_id")),
            )
            .order_by(qual_ident("p", "created_at"), Some(OrderDir::Desc))
            .limit(value(50))
            .offset(value(100))
            .build();

        assert_eq!(ast.joins.len(), 1);
        assert_eq!(ast.order_by[0].direction, Some(OrderDir::Desc));
        assert_eq!(ast.limit, Some(value(50)));
        assert_eq!(ast.offset, Some(value(100)));
    }
}
