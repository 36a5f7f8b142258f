//! Declaration modifier vocabulary.
//!
//! Modifiers prefix a class, interface, method or variable definition (`val x = 1`,
//! `abstract class A`). They are accumulated by the parser until the next definition consumes them.
//!
//! ## Notes
//! - Modifier classification wins over identifier classification in the lexer: `val` is never a
//!   plain name unless it is written `` `val` ``.
//! - [`compatible`] encodes the combination rules (no duplicates, a single access modifier, `val`
//!   excludes `var` and `abstract`).
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::modifiers::{self, ModifierId};
//!
//! assert_eq!(modifiers::from_str("val"), Some(ModifierId::Val));
//! assert!(modifiers::compatible(&[ModifierId::Public], ModifierId::Val));
//! assert!(!modifiers::compatible(&[ModifierId::Public], ModifierId::Private));
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every modifier.
///
/// ## Notes
/// - Variant order matches [`MODIFIERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierId {
    // Access
    Public,
    Protected,
    Private,
    Internal,

    // Binding
    Val,
    Var,
    Def,

    // Shape
    Abstract,
    Data,
    Implicit,

    // Runtime
    Native,
    Synchronized,
    Transient,
    Volatile,
    Strictfp,

    // Contracts
    Nonnull,
    Nonempty,
}

/// Broad grouping for modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierCategory {
    /// At most one access modifier may appear on a definition.
    Access,
    Binding,
    Shape,
    Runtime,
    Contract,
}

/// Metadata for a modifier.
#[derive(Debug, Clone, Copy)]
pub struct ModifierInfo {
    pub id: ModifierId,
    pub canonical: &'static str,
    pub category: ModifierCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all modifiers, in [`ModifierId`] order.
pub const MODIFIERS: &[ModifierInfo] = &[
    info(ModifierId::Public, "public", ModifierCategory::Access),
    info(ModifierId::Protected, "protected", ModifierCategory::Access),
    info(ModifierId::Private, "private", ModifierCategory::Access),
    info(ModifierId::Internal, "internal", ModifierCategory::Access),
    info(ModifierId::Val, "val", ModifierCategory::Binding),
    info(ModifierId::Var, "var", ModifierCategory::Binding),
    info(ModifierId::Def, "def", ModifierCategory::Binding),
    info(ModifierId::Abstract, "abstract", ModifierCategory::Shape),
    info(ModifierId::Data, "data", ModifierCategory::Shape),
    info(ModifierId::Implicit, "implicit", ModifierCategory::Shape),
    info(ModifierId::Native, "native", ModifierCategory::Runtime),
    info(ModifierId::Synchronized, "synchronized", ModifierCategory::Runtime),
    info(ModifierId::Transient, "transient", ModifierCategory::Runtime),
    info(ModifierId::Volatile, "volatile", ModifierCategory::Runtime),
    info(ModifierId::Strictfp, "strictfp", ModifierCategory::Runtime),
    info(ModifierId::Nonnull, "nonnull", ModifierCategory::Contract),
    info(ModifierId::Nonempty, "nonempty", ModifierCategory::Contract),
];

/// Return the canonical spelling for a modifier.
pub fn as_str(id: ModifierId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a modifier.
pub fn category(id: ModifierId) -> ModifierCategory {
    info_for(id).category
}

/// Return the full metadata entry for a modifier.
pub fn info_for(id: ModifierId) -> &'static ModifierInfo {
    &MODIFIERS[id as usize]
}

/// Resolve a spelling to its modifier identifier.
pub fn from_str(s: &str) -> Option<ModifierId> {
    MODIFIERS.iter().find(|m| m.canonical == s).map(|m| m.id)
}

/// Decide whether `incoming` may join an already accumulated modifier set.
///
/// ## Returns
/// - `false` when `incoming` is already present, when it is a second access modifier, or when it
///   pairs `val` with `var` or `abstract` (in either order).
pub fn compatible(existing: &[ModifierId], incoming: ModifierId) -> bool {
    if existing.contains(&incoming) {
        return false;
    }
    if category(incoming) == ModifierCategory::Access && existing.iter().any(|m| category(*m) == ModifierCategory::Access)
    {
        return false;
    }
    let clashes_with_val = |m: ModifierId| matches!(m, ModifierId::Var | ModifierId::Abstract);
    if incoming == ModifierId::Val {
        return !existing.iter().any(|m| clashes_with_val(*m));
    }
    if clashes_with_val(incoming) {
        return !existing.contains(&ModifierId::Val);
    }
    true
}

const fn info(id: ModifierId, canonical: &'static str, category: ModifierCategory) -> ModifierInfo {
    ModifierInfo {
        id,
        canonical,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_id() {
        for (idx, m) in MODIFIERS.iter().enumerate() {
            assert_eq!(m.id as usize, idx, "`{}` is out of order", m.canonical);
        }
    }

    #[test]
    fn val_excludes_var_and_abstract() {
        assert!(!compatible(&[ModifierId::Val], ModifierId::Var));
        assert!(!compatible(&[ModifierId::Var], ModifierId::Val));
        assert!(!compatible(&[ModifierId::Abstract], ModifierId::Val));
        assert!(!compatible(&[ModifierId::Val], ModifierId::Abstract));
        assert!(compatible(&[ModifierId::Abstract], ModifierId::Var));
    }

    #[test]
    fn duplicates_and_second_access_rejected() {
        assert!(!compatible(&[ModifierId::Data], ModifierId::Data));
        assert!(!compatible(&[ModifierId::Internal, ModifierId::Val], ModifierId::Protected));
        assert!(compatible(&[ModifierId::Internal, ModifierId::Val], ModifierId::Nonnull));
    }

    #[test]
    fn modifiers_are_not_keywords() {
        for m in MODIFIERS {
            assert!(crate::lang::keywords::from_str(m.canonical).is_none(), "{}", m.canonical);
        }
    }
}
