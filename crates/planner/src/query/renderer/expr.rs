use crate::{
    error::QueryError,
    query::{
        ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall, Ident},
        placeholder::{Token, scan},
        renderer::{Render, Renderer},
    },
};

impl Render for Expr {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        match self {
            Expr::Identifier(ident) => ident.render(r),
            Expr::Value(val) => r.add_literal(val),
            Expr::Param(val) => {
                r.add_param(val.clone());
                Ok(())
            }
            Expr::Literal(sql) => {
                // Raw text is never renumbered, so a marker in it would collide.
                if scan(sql, r.dialect)
                    .iter()
                    .any(|t| matches!(t, Token::Marker(_)))
                {
                    return Err(QueryError::syntax(format!(
                        "Literal `{sql}` contains a bind marker; bind the value as a parameter instead."
                    )));
                }
                r.sql.push_str(sql);
                Ok(())
            }
            Expr::BinaryOp(op) => op.render(r),
            Expr::FunctionCall(func) => func.render(r),
            Expr::Alias { expr, alias } => {
                expr.render(r)?;
                r.sql.push_str(" AS ");
                r.sql.push_str(&r.dialect.quote_identifier(alias));
                Ok(())
            }
        }
    }
}

impl Render for Ident {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        if let Some(qualifier) = &self.qualifier {
            r.sql.push_str(&r.dialect.quote_identifier(qualifier));
            r.sql.push('.');
        }
        r.sql.push_str(&r.dialect.quote_identifier(&self.name));
        Ok(())
    }
}

impl Render for BinaryOp {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        r.sql.push('(');
        self.left.render(r)?;

        let op_str = match self.op {
            BinaryOperator::Eq => " = ",
            BinaryOperator::NotEq => " <> ",
            BinaryOperator::Lt => " < ",
            BinaryOperator::LtEq => " <= ",
            BinaryOperator::Gt => " > ",
            BinaryOperator::GtEq => " >= ",
            BinaryOperator::And => " AND ",
            BinaryOperator::Or => " OR ",
        };
        r.sql.push_str(op_str);

        self.right.render(r)?;
        r.sql.push(')');
        Ok(())
    }
}

impl Render for FunctionCall {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        r.sql.push_str(&self.name);
        r.sql.push('(');
        if self.wildcard {
            r.sql.push('*');
        } else {
            r.render_list(&self.args)?;
        }
        r.sql.push(')');
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use model::core::value::Value;

    use crate::{
        error::QueryError,
        query::{
            ast::expr::{BinaryOp, BinaryOperator, Expr, FunctionCall},
            dialect::{Generic, MySql, Postgres},
            ident, param,
            renderer::render_statement,
            value,
        },
    };

    #[test]
    fn test_value_is_inlined_and_param_is_bound() {
        let expr = Expr::BinaryOp(Box::new(BinaryOp {
            left: value("x"),
            op: BinaryOperator::Eq,
            right: param(5),
        }));

        let (sql, params) = render_statement(&expr, &Postgres).unwrap();
        assert_eq!(sql, "('x' = $1)");
        assert_eq!(params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_function_call_and_alias() {
        let expr = Expr::Alias {
            expr: Box::new(Expr::FunctionCall(FunctionCall {
                name: "COUNT".into(),
                args: vec![],
                wildcard: true,
            })),
            alias: "total".into(),
        };
        let (sql, _) = render_statement(&expr, &MySql).unwrap();
        assert_eq!(sql, "COUNT(*) AS `total`");

        let expr = Expr::FunctionCall(FunctionCall {
            name: "COALESCE".into(),
            args: vec![ident("nickname"), param("anon")],
            wildcard: false,
        });
        let (sql, params) = render_statement(&expr, &Generic).unwrap();
        assert_eq!(sql, "COALESCE(nickname, $1)");
        assert_eq!(params, vec![Value::from("anon")]);
    }

    #[test]
    fn test_raw_literal_passes_through() {
        let (sql, params) = render_statement(&Expr::Literal("DEFAULT".into()), &Postgres).unwrap();
        assert_eq!(sql, "DEFAULT");
        assert!(params.is_empty());
    }

    #[test]
    fn test_raw_literal_with_bind_marker_is_rejected() {
        let row = Expr::FunctionCall(FunctionCall {
            name: "COALESCE".into(),
            args: vec![Expr::Literal("$1".into()), param(2)],
            wildcard: false,
        });
        assert!(matches!(
            render_statement(&row, &Postgres),
            Err(QueryError::Syntax(msg)) if msg.contains("bind marker")
        ));

        // Quoted text is not a marker.
        let (sql, _) = render_statement(&Expr::Literal("'$1'".into()), &Postgres).unwrap();
        assert_eq!(sql, "'$1'");
    }
}
