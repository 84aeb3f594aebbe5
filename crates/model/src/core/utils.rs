/// Wraps `s` in single quotes, doubling any embedded quote.
///
/// With `escape_backslash` set, backslashes are doubled too (MySQL treats
/// `\` as an escape character inside string literals by default).
pub fn quote_sql_string(s: &str, escape_backslash: bool) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');

    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' if escape_backslash => out.push_str(r"\\"),
            _ => out.push(ch),
        }
    }

    out.push('\'');
    out
}
