//! `define` / `undef` text substitution.
//!
//! ```text
//! define "TRUE" as "true"
//! undef "TRUE"
//! ```
//!
//! A directive occupies a whole line and applies to every following line of the file. Expansion
//! happens before tokenization, on the part of the line that precedes a `;` comment.

use super::strings::closing_quote;
use latte_core::lang::symbols::ESCAPE;

const DEFINE: &str = "define";
const UNDEF: &str = "undef";

/// A parsed directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Directive {
    Define { target: String, replacement: String },
    Undef { target: String },
}

/// Ordered macro table.
#[derive(Debug, Default)]
pub(crate) struct Macros {
    table: Vec<(String, String)>,
}

impl Macros {
    pub(crate) fn define(&mut self, target: String, replacement: String) {
        match self.table.iter_mut().find(|(t, _)| *t == target) {
            Some(entry) => entry.1 = replacement,
            None => self.table.push((target, replacement)),
        }
    }

    /// Remove a macro; `false` when it was never defined.
    pub(crate) fn undef(&mut self, target: &str) -> bool {
        let before = self.table.len();
        self.table.retain(|(t, _)| t != target);
        self.table.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replace every occurrence of every target, longest target first.
    ///
    /// ## Returns
    /// - The expanded text and the targets that fired, or `None` when nothing matched.
    pub(crate) fn expand(&self, code: &str) -> Option<(String, Vec<String>)> {
        let mut order: Vec<&(String, String)> = self.table.iter().collect();
        order.sort_by_key(|(t, _)| std::cmp::Reverse(t.len()));

        let mut out = code.to_string();
        let mut fired = Vec::new();
        for (target, replacement) in order {
            if out.contains(target.as_str()) {
                out = out.replace(target.as_str(), replacement);
                fired.push(target.clone());
            }
        }
        if fired.is_empty() { None } else { Some((out, fired)) }
    }
}

/// Recognize a directive line.
///
/// ## Returns
/// - `None` when the line is not a directive.
/// - `Some(Err(message))` when it is a malformed directive.
pub(crate) fn parse_directive(line: &str) -> Option<Result<Directive, String>> {
    if let Some(rest) = keyword_rest(line, DEFINE) {
        return Some(parse_define(line, rest));
    }
    if let Some(rest) = keyword_rest(line, UNDEF) {
        return Some(parse_undef(line, rest));
    }
    None
}

fn keyword_rest<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    rest.starts_with([' ', '"']).then_some(rest)
}

/// Split `"text" tail` into `text` and `tail`.
fn quoted(text: &str) -> Option<(&str, &str)> {
    let text = text.trim_start();
    if !text.starts_with('"') {
        return None;
    }
    let end = closing_quote(text, '"')?;
    Some((&text[1..end], &text[end + 1..]))
}

fn parse_define(line: &str, rest: &str) -> Result<Directive, String> {
    let illegal = || format!("illegal define command {line}");
    let (target, tail) = quoted(rest).ok_or_else(illegal)?;
    if target.is_empty() {
        return Err(format!("define \"{target}\" length cannot be 0"));
    }
    if target.contains(ESCAPE) {
        return Err(format!("define \"{target}\" cannot contain escape char"));
    }
    let tail = tail.trim_start();
    let after_as = tail
        .strip_prefix("as")
        .filter(|t| t.starts_with([' ', '"']))
        .ok_or_else(|| format!("illegal define command (there should be an `as` between \"{target}\" and the replacement)"))?;
    let (replacement, trailing) = quoted(after_as).ok_or_else(illegal)?;
    if replacement.contains(ESCAPE) {
        return Err(format!("define \"{replacement}\" cannot contain escape char"));
    }
    if !trailing.trim().is_empty() {
        return Err(format!(
            "illegal define command (there should not be characters after \"{replacement}\")"
        ));
    }
    Ok(Directive::Define {
        target: target.to_string(),
        replacement: replacement.to_string(),
    })
}

fn parse_undef(line: &str, rest: &str) -> Result<Directive, String> {
    let (target, trailing) = quoted(rest).ok_or_else(|| format!("illegal undef command {line}"))?;
    if !trailing.trim().is_empty() {
        return Err(format!("illegal undef command (there should not be characters after \"{target}\")"));
    }
    Ok(Directive::Undef {
        target: target.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_undef_lines() {
        assert_eq!(
            parse_directive(r#"define "ONE" as "1""#),
            Some(Ok(Directive::Define {
                target: "ONE".into(),
                replacement: "1".into()
            }))
        );
        assert_eq!(
            parse_directive(r#"undef "ONE""#),
            Some(Ok(Directive::Undef { target: "ONE".into() }))
        );
        assert_eq!(parse_directive("defined = 1"), None);
        assert_eq!(parse_directive("x = 1"), None);
    }

    #[test]
    fn malformed_directives() {
        let msg = |line: &str| parse_directive(line).unwrap().unwrap_err();
        assert!(msg(r#"define "" as "x""#).contains("length cannot be 0"));
        assert!(msg(r#"define "a\b" as "x""#).contains("escape char"));
        assert_eq!(msg(r#"define "a" as "x\y""#), r#"define "x\y" cannot contain escape char"#);
        assert!(msg(r#"define "a" "x""#).contains("`as`"));
        assert!(msg(r#"define "a" as "x" y"#).contains("should not be characters after"));
        assert!(msg("define x as y").starts_with("illegal define command"));
    }

    #[test]
    fn longest_target_expands_first() {
        let mut macros = Macros::default();
        macros.define("A".into(), "1".into());
        macros.define("AB".into(), "2".into());
        let (out, fired) = macros.expand("AB + A").unwrap();
        assert_eq!(out, "2 + 1");
        assert_eq!(fired, ["AB", "A"]);
        assert!(macros.expand("x").is_none());
        assert!(macros.undef("A"));
        assert!(!macros.undef("A"));
    }
}
