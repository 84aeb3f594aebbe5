use crate::error::CliError;
use model::core::value::Value;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RenderedStatement {
    pub dialect: String,
    pub sql: String,
    pub params: Vec<Value>,
}

impl RenderedStatement {
    fn format(&self, as_json: bool) -> Result<String, CliError> {
        if as_json {
            return serde_json::to_string_pretty(self).map_err(CliError::JsonSerialize);
        }

        let mut out = format!("{};\n", self.sql);
        for (i, param) in self.params.iter().enumerate() {
            out.push_str(&format!("-- param {}: {param}\n", i + 1));
        }
        Ok(out)
    }
}

pub async fn write_statement(
    statement: &RenderedStatement,
    path: &str,
    as_json: bool,
) -> Result<(), CliError> {
    let text = statement.format(as_json)?;
    tokio::fs::write(path, text).await?;
    Ok(())
}

pub fn print_statement(statement: &RenderedStatement, as_json: bool) -> Result<(), CliError> {
    let text = statement.format(as_json)?;
    print!("{text}");
    if as_json {
        println!();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement() -> RenderedStatement {
        RenderedStatement {
            dialect: "PostgreSQL".into(),
            sql: r#"INSERT INTO "t" ("a") VALUES ($1)"#.into(),
            params: vec![Value::Int(7)],
        }
    }

    #[test]
    fn test_text_format_lists_params() {
        let text = statement().format(false).unwrap();
        assert_eq!(text, "INSERT INTO \"t\" (\"a\") VALUES ($1);\n-- param 1: 7\n");
    }

    #[test]
    fn test_json_format() {
        let text = statement().format(true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["dialect"], "PostgreSQL");
        assert_eq!(json["params"][0], serde_json::json!({"Int": 7}));
    }
}
