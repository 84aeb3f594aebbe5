use crate::{
    error::QueryError,
    query::{
        ast::subquery::{RawQuery, SubQuery},
        placeholder::{Token, scan},
        renderer::{Render, Renderer},
    },
};

impl Render for SubQuery {
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        match self {
            SubQuery::Select(select) => select.render(r),
            SubQuery::Raw(raw) => raw.render(r),
        }
    }
}

impl Render for RawQuery {
    /// Splices the raw text into the statement. Each bind marker becomes a
    /// placeholder token of the enclosing statement and its parameter is
    /// appended in textual order, so markers that were numbered
    /// independently (or out of order) join the statement's sequence.
    fn render(&self, r: &mut Renderer) -> Result<(), QueryError> {
        let mut used = vec![false; self.params.len()];
        let mut next_positional = 0;

        for token in scan(&self.sql, r.dialect) {
            match token {
                Token::Text(text) => r.sql.push_str(text),
                Token::Marker(number) => {
                    let slot = match number {
                        Some(n) => n.checked_sub(r.dialect.placeholder_start()),
                        None => {
                            next_positional += 1;
                            Some(next_positional - 1)
                        }
                    };
                    let value = slot.and_then(|i| self.params.get(i)).ok_or_else(|| {
                        QueryError::syntax(format!(
                            "Placeholder {} in sub-query has no bound value.",
                            marker_label(number, next_positional)
                        ))
                    })?;
                    if let Some(i) = slot {
                        used[i] = true;
                    }
                    r.add_param(value.clone());
                }
            }
        }

        if let Some(unused) = used.iter().position(|u| !u) {
            return Err(QueryError::syntax(format!(
                "Sub-query parameter {} is never referenced.",
                unused + 1
            )));
        }

        Ok(())
    }
}

fn marker_label(number: Option<usize>, position: usize) -> String {
    match number {
        Some(n) => format!("#{n}"),
        None => format!("at position {position}"),
    }
}
