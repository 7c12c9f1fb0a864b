/// Escape user-entered text before it is embedded in markup
///
/// Backslash, double quote, newline, carriage return and tab are replaced by
/// their backslash escapes so a value can never terminate an attribute or
/// break the line structure of a fragment.
///
/// - `sanitize("say \"hi\"")` → `say \"hi\"`
/// - `sanitize("a\nb")` → `a\nb` (two characters `\` `n`)
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

/// `value`, or `fallback` when it is empty
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_escapes_special_characters() {
        assert_eq!(sanitize(r"C:\path"), r"C:\\path");
        assert_eq!(sanitize("say \"hi\""), "say \\\"hi\\\"");
        assert_eq!(sanitize("a\nb\rc\td"), "a\\nb\\rc\\td");
    }

    #[test]
    fn test_sanitize_leaves_plain_text() {
        assert_eq!(sanitize("Plain text <b>"), "Plain text <b>");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default("", "#"), "#");
        assert_eq!(or_default("x", "#"), "x");
    }
}
