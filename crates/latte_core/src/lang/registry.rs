//! Shareable metadata for `latte_core::lang` registries.
//!
//! Every registry (keywords, modifiers, operators, symbols) records the same provenance fields. This
//! submodule provides those small `Copy` types so the registries can live in `const` tables.
//!
//! ## Notes
//! - Metadata is meant for tooling, docs and diagnostics; enforcement of syntax rules still lives
//!   in the lexer/parser.

/// Identify the language version a vocabulary item is available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use latte_core::lang::registry::Since;
///
/// let since = Since(0, 1);
/// assert_eq!(since.to_string(), "0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Since(pub u16, pub u16);

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - `Reserved` spellings are rejected as identifiers but have no syntax attached yet.
///
/// ## Examples
/// ```rust
/// use latte_core::lang::registry::Stability;
///
/// let s = Stability::Stable;
/// assert_eq!(format!("{s:?}"), "Stable");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Reserved,
    Deprecated,
}

/// A small example snippet for documentation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}
