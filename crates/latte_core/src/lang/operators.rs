//! Operator vocabulary.
//!
//! This module defines every symbolic and word operator the parser understands, with its fixity
//! and (for binary operators) its priority class.
//!
//! ## Notes
//! - Priorities are **ranks**: `0` binds tightest. Operators sharing a rank associate left to right.
//!   The parser's rule is "stop when the pending operator's rank is `<=` the incoming rank".
//! - Identifiers used as infix operators (`a plus b`) have no entry here; [`rank_or_lowest`] places
//!   them below every registered operator.
//! - `+`, `-`, `!`, `~`, `++`, `--` carry more than one fixity. Prefix forms marked
//!   [`Fixity::PrefixAtStart`] only apply when no operand has been parsed yet.
//!
//! ## Examples
//! ```rust
//! use latte_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("*"), Some(OperatorId::Star));
//! assert!(operators::binds_at_least_as_tight(OperatorId::Star, OperatorId::Plus));
//! assert!(!operators::binds_at_least_as_tight(OperatorId::Plus, OperatorId::Star));
//! ```

use super::registry::{Since, Stability};

/// How an operator may appear relative to its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    /// `a op b`
    Infix,
    /// `op a`, only recognized before any operand of the current expression was parsed.
    PrefixAtStart,
    /// `op a`, recognized anywhere an operand may start.
    Prefix,
    /// `a op`
    Postfix,
    /// `target op value`
    Assign,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Rank 0..=3: arithmetic
    ColonColonColon,
    CaretCaret,
    Star,
    Slash,
    Percent,
    Plus,
    Minus,

    // Rank 4: shifts
    Shl,
    Shr,
    UShr,

    // Rank 5: ordering
    Gt,
    Lt,
    GtEq,
    LtEq,

    // Rank 6: equality and membership
    EqEq,
    NotEq,
    EqEqEq,
    NotEqEq,
    EqColonEq,
    BangColonEq,
    Is,
    Not,
    In,

    // Rank 7..=9: bit logic
    Amp,
    Caret,
    Pipe,

    // Rank 10..=11: boolean logic
    AmpAmp,
    And,
    PipePipe,
    Or,

    // Rank 12: assignment-like binary operator
    ColonEq,

    // Unary only
    PlusPlus,
    MinusMinus,
    Bang,
    Tilde,

    // Assignment
    Assign,
    PlusAssign,
    MinusAssign,
    StarAssign,
    SlashAssign,
    PercentAssign,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    /// Priority rank for binary use; `None` when the operator is never infix.
    pub rank: Option<u8>,
    pub fixity: &'static [Fixity],
    pub is_keyword_spelling: bool,
    pub since: Since,
    pub stability: Stability,
}

const INFIX: &[Fixity] = &[Fixity::Infix];
const INFIX_OR_PREFIX: &[Fixity] = &[Fixity::Infix, Fixity::PrefixAtStart];
const INCREMENT: &[Fixity] = &[Fixity::PrefixAtStart, Fixity::Postfix];
const NEGATION: &[Fixity] = &[Fixity::PrefixAtStart, Fixity::Prefix];
const ASSIGN: &[Fixity] = &[Fixity::Assign];

/// Registry of all operators, in [`OperatorId`] order.
pub const OPERATORS: &[OperatorInfo] = &[
    binary(OperatorId::ColonColonColon, ":::", 0),
    binary(OperatorId::CaretCaret, "^^", 1),
    binary(OperatorId::Star, "*", 2),
    binary(OperatorId::Slash, "/", 2),
    binary(OperatorId::Percent, "%", 2),
    op(OperatorId::Plus, "+", Some(3), INFIX_OR_PREFIX),
    op(OperatorId::Minus, "-", Some(3), INFIX_OR_PREFIX),
    binary(OperatorId::Shl, "<<", 4),
    binary(OperatorId::Shr, ">>", 4),
    binary(OperatorId::UShr, ">>>", 4),
    binary(OperatorId::Gt, ">", 5),
    binary(OperatorId::Lt, "<", 5),
    binary(OperatorId::GtEq, ">=", 5),
    binary(OperatorId::LtEq, "<=", 5),
    binary(OperatorId::EqEq, "==", 6),
    binary(OperatorId::NotEq, "!=", 6),
    binary(OperatorId::EqEqEq, "===", 6),
    binary(OperatorId::NotEqEq, "!==", 6),
    binary(OperatorId::EqColonEq, "=:=", 6),
    binary(OperatorId::BangColonEq, "!:=", 6),
    word(OperatorId::Is, "is", 6),
    word(OperatorId::Not, "not", 6),
    word(OperatorId::In, "in", 6),
    binary(OperatorId::Amp, "&", 7),
    binary(OperatorId::Caret, "^", 8),
    binary(OperatorId::Pipe, "|", 9),
    binary(OperatorId::AmpAmp, "&&", 10),
    word(OperatorId::And, "and", 10),
    binary(OperatorId::PipePipe, "||", 11),
    word(OperatorId::Or, "or", 11),
    binary(OperatorId::ColonEq, ":=", 12),
    op(OperatorId::PlusPlus, "++", None, INCREMENT),
    op(OperatorId::MinusMinus, "--", None, INCREMENT),
    op(OperatorId::Bang, "!", None, NEGATION),
    op(OperatorId::Tilde, "~", None, NEGATION),
    op(OperatorId::Assign, "=", None, ASSIGN),
    op(OperatorId::PlusAssign, "+=", None, ASSIGN),
    op(OperatorId::MinusAssign, "-=", None, ASSIGN),
    op(OperatorId::StarAssign, "*=", None, ASSIGN),
    op(OperatorId::SlashAssign, "/=", None, ASSIGN),
    op(OperatorId::PercentAssign, "%=", None, ASSIGN),
];

/// Number of distinct binary priority ranks; also the rank given to identifier operators.
pub const LOWEST_RANK: u8 = 13;

/// Return the spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    &OPERATORS[id as usize]
}

/// Resolve a spelling to its operator identifier.
pub fn from_str(s: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == s).map(|o| o.id)
}

/// Return `true` if `id` can be used with the given fixity.
pub fn has_fixity(id: OperatorId, fixity: Fixity) -> bool {
    info_for(id).fixity.contains(&fixity)
}

/// Return the binary rank of an operator, or [`LOWEST_RANK`] for non-binary operators.
pub fn rank_or_lowest(id: Option<OperatorId>) -> u8 {
    id.and_then(|id| info_for(id).rank).unwrap_or(LOWEST_RANK)
}

/// Return `true` if `a` has equal or higher priority than `b`.
pub fn binds_at_least_as_tight(a: OperatorId, b: OperatorId) -> bool {
    rank_or_lowest(Some(a)) <= rank_or_lowest(Some(b))
}

/// Iterate over the binary operators grouped by rank, tightest first.
pub fn binary_ranks() -> impl Iterator<Item = (u8, Vec<&'static str>)> {
    (0..LOWEST_RANK).map(|rank| {
        let spellings = OPERATORS
            .iter()
            .filter(|o| o.rank == Some(rank))
            .map(|o| o.spelling)
            .collect();
        (rank, spellings)
    })
}

const fn op(id: OperatorId, spelling: &'static str, rank: Option<u8>, fixity: &'static [Fixity]) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        rank,
        fixity,
        is_keyword_spelling: false,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}

const fn binary(id: OperatorId, spelling: &'static str, rank: u8) -> OperatorInfo {
    op(id, spelling, Some(rank), INFIX)
}

const fn word(id: OperatorId, spelling: &'static str, rank: u8) -> OperatorInfo {
    OperatorInfo {
        is_keyword_spelling: true,
        ..binary(id, spelling, rank)
    }
}
