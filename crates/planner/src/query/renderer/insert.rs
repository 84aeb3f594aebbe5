use crate::{
    error::QueryError,
    query::{
        ast::{
            expr::Expr,
            insert::{Insert, InsertSource},
        },
        renderer::{Render, Renderer},
    },
};

const NO_VALUES: &str = "Insert query doesn't have any values to insert.";

impl Render for Insert {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        // 1. INSERT INTO table (...)
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table);
        if let Some(columns) = self.columns.as_deref().filter(|c| !c.is_empty()) {
            r.sql.push_str(" (");
            r.sql.push_str(&r.dialect.render_column_list(columns));
            r.sql.push(')');
        }

        // 2. VALUES (...) or SELECT ...
        match &self.source {
            Some(InsertSource::Rows(rows)) if !rows.is_empty() => render_values(rows, r)?,
            Some(InsertSource::Query(query)) => {
                r.sql.push(' ');
                query.render(r)?;
            }
            _ => return Err(QueryError::syntax(NO_VALUES)),
        }

        // 3. RETURNING ...
        if let Some(returning) = &self.returning {
            let clause = r.dialect.render_returning(returning)?;
            r.sql.push_str(" RETURNING ");
            r.sql.push_str(&clause);
        }

        Ok(())
    }
}

fn render_values(rows: &[Vec<Expr>], r: &mut Renderer) -> Result<(), QueryError> {
    r.sql.push_str(" VALUES ");
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            r.sql.push_str(", ");
        }
        r.sql.push('(');
        r.render_list(row)?;
        r.sql.push(')');
    }
    Ok(())
}
