#[macro_export]
macro_rules! value {
    ($val:expr) => {
        $crate::query::ast::expr::Expr::Value($val.into())
    };
}

#[macro_export]
macro_rules! param {
    ($val:expr) => {
        $crate::query::ast::expr::Expr::Param($val.into())
    };
}

#[macro_export]
macro_rules! table_ref {
    ($name:expr) => {
        $crate::query::ast::common::TableRef {
            schema: None,
            name: $name.to_string(),
        }
    };
    ($schema:expr, $name:expr) => {
        $crate::query::ast::common::TableRef {
            schema: Some($schema.to_string()),
            name: $name.to_string(),
        }
    };
}

/// Builds one row from `Value`s (inlined as literals) and `Expr`s.
#[macro_export]
macro_rules! row {
    ($($val:expr),* $(,)?) => {
        vec![$($crate::query::ast::expr::Expr::from($val)),*]
    };
}

#[cfg(test)]
mod tests {
    use crate::query::ast::expr::Expr;
    use model::core::value::Value;

    #[test]
    fn test_table_ref_macro() {
        let t = table_ref!("users");
        assert_eq!(t.schema, None);
        let t = table_ref!("app", "users");
        assert_eq!(t.schema.as_deref(), Some("app"));
        assert_eq!(t.name, "users");
    }

    #[test]
    fn test_value_and_param_macros() {
        assert_eq!(value!(3), Expr::Value(Value::Int(3)));
        assert_eq!(param!("x"), Expr::Param(Value::from("x")));
    }

    #[test]
    fn test_row_macro() {
        let row = row![Value::Int(1), param!("a"), Expr::Literal("DEFAULT".into())];
        assert_eq!(
            row,
            vec![
                Expr::Value(Value::Int(1)),
                Expr::Param(Value::from("a")),
                Expr::Literal("DEFAULT".into()),
            ]
        );
    }
}
