//! Quote escaping for literal values persisted as SQL string text

/// Escapes a raw string for inclusion in a quoted SQL literal
pub trait QuoteEscaper {
    fn escape(&self, raw: &str) -> String;
}

/// Backslash-style escaping: `\` → `\\`, `'` → `\'`, `"` → `\"`
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlQuoteEscaper;

impl QuoteEscaper for SqlQuoteEscaper {
    fn escape(&self, raw: &str) -> String {
        escape_quotes(raw)
    }
}

/// Escape backslashes and quotes
///
/// Backslashes are doubled too, so `\'` in the output is always an
/// escaped quote.
pub fn escape_quotes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_both_quotes() {
        assert_eq!(escape_quotes(r#"O'Brien "Bob""#), r#"O\'Brien \"Bob\""#);
    }

    #[test]
    fn test_escape_backslash_first() {
        assert_eq!(escape_quotes(r"a\'b"), r"a\\\'b");
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape_quotes("hello world"), "hello world");
        assert_eq!(escape_quotes(""), "");
        assert_eq!(escape_quotes("héllo"), "héllo");
    }

    #[test]
    fn test_trait_delegates() {
        assert_eq!(SqlQuoteEscaper.escape("it's"), "it\\'s");
    }
}
