//! Literal-word vocabulary: the spellings that lex as boolean literals.
//!
//! ## Notes
//! - Bool classification wins over every other classification in the lexer, so `yes` is never a
//!   name unless it is written `` `yes` ``.
//! - Lookup via [`from_str`] is **case-sensitive**.
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::literals::{self, BoolId};
//!
//! assert_eq!(literals::from_str("yes"), Some(BoolId::Yes));
//! assert!(literals::value(BoolId::Yes));
//! assert!(!literals::value(BoolId::No));
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every bool spelling.
///
/// ## Notes
/// - Variant order matches [`BOOLS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoolId {
    True,
    False,
    Yes,
    No,
}

/// Metadata for a bool spelling.
#[derive(Debug, Clone, Copy)]
pub struct BoolInfo {
    pub id: BoolId,
    pub canonical: &'static str,
    pub value: bool,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all bool spellings, in [`BoolId`] order.
pub const BOOLS: &[BoolInfo] = &[
    info(BoolId::True, "true", true),
    info(BoolId::False, "false", false),
    info(BoolId::Yes, "yes", true),
    info(BoolId::No, "no", false),
];

/// Return the canonical spelling for a bool literal.
pub fn as_str(id: BoolId) -> &'static str {
    info_for(id).canonical
}

/// Return the value a bool literal denotes.
pub fn value(id: BoolId) -> bool {
    info_for(id).value
}

/// Return the full metadata entry for a bool literal.
pub fn info_for(id: BoolId) -> &'static BoolInfo {
    &BOOLS[id as usize]
}

/// Resolve a spelling to its bool identifier.
pub fn from_str(s: &str) -> Option<BoolId> {
    BOOLS.iter().find(|b| b.canonical == s).map(|b| b.id)
}

const fn info(id: BoolId, canonical: &'static str, value: bool) -> BoolInfo {
    BoolInfo {
        id,
        canonical,
        value,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for (idx, b) in BOOLS.iter().enumerate() {
            assert_eq!(b.id as usize, idx, "`{}` is out of order", b.canonical);
        }
    }

    #[test]
    fn both_values_have_two_spellings() {
        assert_eq!(BOOLS.iter().filter(|b| b.value).count(), 2);
        assert_eq!(BOOLS.iter().filter(|b| !b.value).count(), 2);
        assert!(from_str("True").is_none());
    }
}
