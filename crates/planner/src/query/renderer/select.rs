use crate::{
    error::QueryError,
    query::{
        ast::{
            common::{JoinKind, OrderDir},
            select::{FromClause, JoinClause, OrderByExpr, Select},
        },
        renderer::{Render, Renderer},
    },
};

impl Render for Select {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        // 1. SELECT clause
        r.sql.push_str("SELECT ");
        if self.columns.is_empty() {
            r.sql.push('*');
        } else {
            r.render_list(&self.columns)?;
        }

        // 2. FROM
        if let Some(from) = &self.from {
            r.sql.push(' ');
            from.render(r)?;
        }

        // 3. JOIN
        for join in &self.joins {
            r.sql.push(' ');
            join.render(r)?;
        }

        // 4. WHERE
        if let Some(where_clause) = &self.where_clause {
            r.sql.push_str(" WHERE ");
            where_clause.render(r)?;
        }

        // 5. ORDER BY
        if !self.order_by.is_empty() {
            r.sql.push_str(" ORDER BY ");
            r.render_list(&self.order_by)?;
        }

        // 6. LIMIT
        if let Some(limit) = &self.limit {
            r.sql.push_str(" LIMIT ");
            limit.render(r)?;
        }

        // 7. OFFSET
        if let Some(offset) = &self.offset {
            r.sql.push_str(" OFFSET ");
            offset.render(r)?;
        }

        Ok(())
    }
}

impl Render for FromClause {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        r.sql.push_str("FROM ");
        r.render_table_ref(&self.table);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(&r.dialect.quote_identifier(alias));
        }
        Ok(())
    }
}

impl Render for JoinClause {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        let join_str = match self.kind {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        };
        r.sql.push_str(join_str);
        r.sql.push(' ');
        r.render_table_ref(&self.table);
        if let Some(alias) = &self.alias {
            r.sql.push_str(" AS ");
            r.sql.push_str(&r.dialect.quote_identifier(alias));
        }
        r.sql.push_str(" ON ");
        self.on.render(r)
    }
}

impl Render for OrderByExpr {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        self.expr.render(r)?;
        if let Some(dir) = &self.direction {
            let dir_str = match dir {
                OrderDir::Asc => "ASC",
                OrderDir::Desc => "DESC",
            };
            r.sql.push(' ');
            r.sql.push_str(dir_str);
        }
        Ok(())
    }
}
