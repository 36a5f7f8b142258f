//! Quoted literal scanning.

use latte_core::lang::symbols::ESCAPE;

/// Find the byte index of the quote closing the literal that starts at `text[0]`.
///
/// A quote counts as escaped when an odd number of escape characters directly precede it.
pub(crate) fn closing_quote(text: &str, quote: char) -> Option<usize> {
    let mut from = quote.len_utf8();
    while let Some(rel) = text[from..].find(quote) {
        let at = from + rel;
        let escapes = text[..at].chars().rev().take_while(|c| *c == ESCAPE).count();
        if escapes % 2 == 0 {
            return Some(at);
        }
        from = at + quote.len_utf8();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_literal() {
        assert_eq!(closing_quote("\"abc\" + 1", '"'), Some(4));
    }

    #[test]
    fn escaped_quote_defers_the_end() {
        assert_eq!(closing_quote(r#""a\"b" x"#, '"'), Some(5));
    }

    #[test]
    fn escaped_escape_does_not() {
        assert_eq!(closing_quote(r#""a\\" x"#, '"'), Some(4));
    }

    #[test]
    fn other_quotes_are_ignored() {
        assert_eq!(closing_quote("'it\"s'", '\''), Some(5));
        assert_eq!(closing_quote("\"abc", '"'), None);
    }
}
