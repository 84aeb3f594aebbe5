use thiserror::Error;

/// Errors raised while building or rendering a statement.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The statement is malformed: accumulated construction diagnostics,
    /// a missing value source, or a dangling placeholder in raw SQL.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// A value kind the dialect cannot express as an inline literal.
    #[error("Unsupported value for {dialect}: cannot inline {kind} literal")]
    UnsupportedValue { dialect: String, kind: String },

    /// A clause the dialect has no syntax for.
    #[error("{feature} is not supported by {dialect}")]
    UnsupportedFeature { dialect: String, feature: String },
}

impl QueryError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        QueryError::Syntax(msg.into())
    }
}
