//! Placeholder tokens and the final numbering pass.
//!
//! Statements are assembled into a [`SqlBuffer`], a list of text segments
//! interleaved with placeholder tokens. Numbers are only assigned when the
//! buffer is finished, so every placeholder in the statement, including the
//! ones contributed by a nested query, ends up in one contiguous sequence.

use crate::query::dialect::Dialect;

/// How a dialect spells bind markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// A prefix followed by a number, e.g. `$1`.
    Numbered(char),
    /// A bare `?`; the position in the text is the index.
    Positional,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Placeholder,
}

/// SQL text under construction.
#[derive(Debug, Clone, Default)]
pub struct SqlBuffer {
    fragments: Vec<Fragment>,
    tail: String,
}

impl SqlBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        self.tail.push_str(s);
    }

    pub fn push(&mut self, ch: char) {
        self.tail.push(ch);
    }

    /// Appends a placeholder token. Its number is assigned by [`finish`](Self::finish).
    pub fn push_placeholder(&mut self) {
        self.flush();
        self.fragments.push(Fragment::Placeholder);
    }

    pub fn placeholder_count(&self) -> usize {
        self.fragments
            .iter()
            .filter(|f| matches!(f, Fragment::Placeholder))
            .count()
    }

    /// Joins the fragments, numbering placeholders left to right from the
    /// dialect's start index.
    pub fn finish(mut self, dialect: &dyn Dialect) -> String {
        self.flush();
        let mut next = dialect.placeholder_start();
        let mut sql = String::new();
        for fragment in self.fragments {
            match fragment {
                Fragment::Text(text) => sql.push_str(&text),
                Fragment::Placeholder => {
                    sql.push_str(&dialect.get_placeholder(next));
                    next += 1;
                }
            }
        }
        sql
    }

    fn flush(&mut self) {
        if !self.tail.is_empty() {
            self.fragments
                .push(Fragment::Text(std::mem::take(&mut self.tail)));
        }
    }
}

/// A piece of already-rendered SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    /// A bind marker. Carries the number written in the text for numbered
    /// styles, `None` for positional markers.
    Marker(Option<usize>),
}

/// Splits rendered SQL into text and bind markers.
///
/// Quoted strings, quoted identifiers, dollar-quoted bodies and comments are
/// passed through untouched, so a `?` or `$1` inside them is never taken for
/// a marker. String literals follow the dialect's escaping rules.
pub fn scan<'a>(sql: &'a str, dialect: &dyn Dialect) -> Vec<Token<'a>> {
    let style = dialect.placeholder_style();
    let backslash = dialect.backslash_escapes();
    let bytes = sql.as_bytes();
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\'' | b'"' | b'`' => i = skip_quoted(bytes, i, backslash),
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                i = sql[i..].find('\n').map_or(bytes.len(), |n| i + n + 1);
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = sql[i + 2..].find("*/").map_or(bytes.len(), |n| i + 2 + n + 2);
            }
            b'?' if style == PlaceholderStyle::Positional => {
                push_text(&mut tokens, &sql[start..i]);
                tokens.push(Token::Marker(None));
                i += 1;
                start = i;
            }
            b if matches!(style, PlaceholderStyle::Numbered(p) if p as u32 == b as u32) => {
                let digits = bytes[i + 1..]
                    .iter()
                    .take_while(|b| b.is_ascii_digit())
                    .count();
                if digits > 0 {
                    let number = sql[i + 1..i + 1 + digits].parse().unwrap_or(usize::MAX);
                    push_text(&mut tokens, &sql[start..i]);
                    tokens.push(Token::Marker(Some(number)));
                    i += 1 + digits;
                    start = i;
                } else if b == b'$' {
                    i = skip_dollar_quoted(sql, i);
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    push_text(&mut tokens, &sql[start..]);
    tokens
}

/// Rewrites the bind markers of already-assembled text so they count up
/// from the dialect's start index in textual order.
pub fn renumber(sql: &str, dialect: &dyn Dialect) -> String {
    let mut buffer = SqlBuffer::new();
    for token in scan(sql, dialect) {
        match token {
            Token::Text(text) => buffer.push_str(text),
            Token::Marker(_) => buffer.push_placeholder(),
        }
    }
    buffer.finish(dialect)
}

fn push_text<'a>(tokens: &mut Vec<Token<'a>>, text: &'a str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
}

/// Returns the index just past the closing quote. A doubled quote is an
/// escaped quote, not a terminator. With `backslash` set, `\` escapes the
/// next byte inside string literals (not inside backtick identifiers).
fn skip_quoted(bytes: &[u8], open: usize, backslash: bool) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        if backslash && quote != b'`' && bytes[i] == b'\\' {
            i += 2;
            continue;
        }
        if bytes[i] == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

/// Skips a `$tag$ ... $tag$` body starting at `open`. Anything that is not a
/// well-formed opening tag is treated as a lone `$`.
fn skip_dollar_quoted(sql: &str, open: usize) -> usize {
    let rest = &sql[open + 1..];
    let tag_len = rest
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    if rest.as_bytes().get(tag_len) != Some(&b'$') {
        return open + 1;
    }
    let tag = &sql[open..open + tag_len + 2];
    let body = open + tag.len();
    sql[body..]
        .find(tag)
        .map_or(sql.len(), |n| body + n + tag.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::dialect::{Generic, MySql, Postgres};

    #[test]
    fn test_buffer_numbers_placeholders_in_order() {
        let mut buffer = SqlBuffer::new();
        buffer.push_str("VALUES (");
        buffer.push_placeholder();
        buffer.push_str(", ");
        buffer.push_placeholder();
        buffer.push(')');

        assert_eq!(buffer.placeholder_count(), 2);
        assert_eq!(buffer.clone().finish(&Postgres), "VALUES ($1, $2)");
        assert_eq!(buffer.finish(&MySql), "VALUES (?, ?)");
    }

    #[test]
    fn test_scan_numbered_markers() {
        let tokens = scan("a = $2 AND b = $10", &Postgres);
        assert_eq!(
            tokens,
            vec![
                Token::Text("a = "),
                Token::Marker(Some(2)),
                Token::Text(" AND b = "),
                Token::Marker(Some(10)),
            ]
        );
    }

    #[test]
    fn test_scan_skips_quoted_text_and_comments() {
        let sql = "SELECT '$1 it''s ?', \"?\" -- ?\n FROM t /* $3 */ WHERE x = ?";
        let markers: Vec<_> = scan(sql, &MySql)
            .into_iter()
            .filter(|t| matches!(t, Token::Marker(_)))
            .collect();
        assert_eq!(markers, vec![Token::Marker(None)]);

        let markers = scan(sql, &Generic)
            .into_iter()
            .filter(|t| matches!(t, Token::Marker(_)))
            .count();
        assert_eq!(markers, 0);
    }

    #[test]
    fn test_scan_honours_backslash_escapes() {
        let sql = r"SELECT 'it\'s ?', x FROM s WHERE k = ?";
        assert_eq!(
            scan(sql, &MySql),
            vec![
                Token::Text(r"SELECT 'it\'s ?', x FROM s WHERE k = "),
                Token::Marker(None),
            ]
        );

        // Standard strings end at the quote after the backslash.
        let sql = r"SELECT 'a\', $1";
        assert_eq!(
            scan(sql, &Postgres),
            vec![Token::Text(r"SELECT 'a\', "), Token::Marker(Some(1))]
        );
    }

    #[test]
    fn test_scan_backticks_ignore_backslashes() {
        let sql = r"SELECT `a\` FROM t WHERE b = ?";
        let markers = scan(sql, &MySql)
            .into_iter()
            .filter(|t| matches!(t, Token::Marker(_)))
            .count();
        assert_eq!(markers, 1);
    }

    #[test]
    fn test_scan_skips_dollar_quoted_body() {
        let sql = "SELECT $body$ $1 $body$, $2";
        let tokens = scan(sql, &Postgres);
        assert_eq!(
            tokens,
            vec![Token::Text("SELECT $body$ $1 $body$, "), Token::Marker(Some(2))]
        );
    }

    #[test]
    fn test_renumber_rewrites_duplicates_and_gaps() {
        let sql = "SELECT $3, $1 FROM t WHERE a = $1";
        assert_eq!(renumber(sql, &Postgres), "SELECT $1, $2 FROM t WHERE a = $3");
        assert_eq!(renumber(sql, &Generic), "SELECT $1, $2 FROM t WHERE a = $3");
    }

    #[test]
    fn test_renumber_without_markers_is_identity() {
        let sql = "SELECT 'a$1' FROM t";
        assert_eq!(renumber(sql, &Postgres), sql);
    }
}
