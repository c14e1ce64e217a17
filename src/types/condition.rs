use std::fmt;

use super::value::{Params, Value};

/// Comparison operators accepted by numeric conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum CompareOp {
    #[default]
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    /// Parse the editor's operator selector. Accepts both the word form
    /// (`"greater_than"`) and the symbol form (`">"`).
    #[must_use]
    pub fn from_id(id: &str) -> Option<CompareOp> {
        Some(match id {
            "equals" | "eq" | "==" => CompareOp::Eq,
            "not_equals" | "neq" | "!=" | "~=" => CompareOp::Neq,
            "greater_than" | "gt" | ">" => CompareOp::Gt,
            "greater_equals" | "gte" | ">=" => CompareOp::Gte,
            "less_than" | "lt" | "<" => CompareOp::Lt,
            "less_equals" | "lte" | "<=" => CompareOp::Lte,
            _ => return None,
        })
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Eq => write!(f, "=="),
            CompareOp::Neq => write!(f, "~="),
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// How a condition (or group) joins with the one that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "and"),
            Combinator::Or => write!(f, "or"),
        }
    }
}

/// The closed set of condition kinds the compiler understands.
///
/// Tags the editor sends that are not in this set deserialize to
/// [`ConditionKind::Unknown`] and compile to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ConditionKind {
    // Played / discarded hand
    HandType,
    CardCount,
    SuitCount,
    RankCount,
    EnhancementCount,
    SealCount,
    PokerHandBeenPlayed,
    DiscardedCardCount,
    GlassCardDestroyed,

    // The single card in scope
    CardRank,
    CardSuit,
    CardEnhancement,
    CardSeal,
    CardEdition,
    CardIndex,

    // Player and round state
    PlayerMoney,
    RemainingHands,
    RemainingDiscards,
    FirstPlayedHand,
    FirstDiscardedHand,
    HandSize,
    HandLevel,
    DeckSize,
    DeckCount,
    InternalVariable,

    // Jokers and consumables
    JokerCount,
    SpecificJoker,
    JokerPosition,
    ConsumableCount,
    VoucherRedeemed,

    // Blind and run
    BlindType,
    BossBlindActive,
    AnteLevel,
    BlindRequirements,
    SystemDate,

    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl ConditionKind {
    pub const ALL: [ConditionKind; 35] = [
        ConditionKind::HandType,
        ConditionKind::CardCount,
        ConditionKind::SuitCount,
        ConditionKind::RankCount,
        ConditionKind::EnhancementCount,
        ConditionKind::SealCount,
        ConditionKind::PokerHandBeenPlayed,
        ConditionKind::DiscardedCardCount,
        ConditionKind::GlassCardDestroyed,
        ConditionKind::CardRank,
        ConditionKind::CardSuit,
        ConditionKind::CardEnhancement,
        ConditionKind::CardSeal,
        ConditionKind::CardEdition,
        ConditionKind::CardIndex,
        ConditionKind::PlayerMoney,
        ConditionKind::RemainingHands,
        ConditionKind::RemainingDiscards,
        ConditionKind::FirstPlayedHand,
        ConditionKind::FirstDiscardedHand,
        ConditionKind::HandSize,
        ConditionKind::HandLevel,
        ConditionKind::DeckSize,
        ConditionKind::DeckCount,
        ConditionKind::InternalVariable,
        ConditionKind::JokerCount,
        ConditionKind::SpecificJoker,
        ConditionKind::JokerPosition,
        ConditionKind::ConsumableCount,
        ConditionKind::VoucherRedeemed,
        ConditionKind::BlindType,
        ConditionKind::BossBlindActive,
        ConditionKind::AnteLevel,
        ConditionKind::BlindRequirements,
        ConditionKind::SystemDate,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ConditionKind::HandType => "hand_type",
            ConditionKind::CardCount => "card_count",
            ConditionKind::SuitCount => "suit_count",
            ConditionKind::RankCount => "rank_count",
            ConditionKind::EnhancementCount => "enhancement_count",
            ConditionKind::SealCount => "seal_count",
            ConditionKind::PokerHandBeenPlayed => "poker_hand_been_played",
            ConditionKind::DiscardedCardCount => "discarded_card_count",
            ConditionKind::GlassCardDestroyed => "glass_card_destroyed",
            ConditionKind::CardRank => "card_rank",
            ConditionKind::CardSuit => "card_suit",
            ConditionKind::CardEnhancement => "card_enhancement",
            ConditionKind::CardSeal => "card_seal",
            ConditionKind::CardEdition => "card_edition",
            ConditionKind::CardIndex => "card_index",
            ConditionKind::PlayerMoney => "player_money",
            ConditionKind::RemainingHands => "remaining_hands",
            ConditionKind::RemainingDiscards => "remaining_discards",
            ConditionKind::FirstPlayedHand => "first_played_hand",
            ConditionKind::FirstDiscardedHand => "first_discarded_hand",
            ConditionKind::HandSize => "hand_size",
            ConditionKind::HandLevel => "hand_level",
            ConditionKind::DeckSize => "deck_size",
            ConditionKind::DeckCount => "deck_count",
            ConditionKind::InternalVariable => "internal_variable",
            ConditionKind::JokerCount => "joker_count",
            ConditionKind::SpecificJoker => "specific_joker",
            ConditionKind::JokerPosition => "joker_position",
            ConditionKind::ConsumableCount => "consumable_count",
            ConditionKind::VoucherRedeemed => "voucher_redeemed",
            ConditionKind::BlindType => "blind_type",
            ConditionKind::BossBlindActive => "boss_blind_active",
            ConditionKind::AnteLevel => "ante_level",
            ConditionKind::BlindRequirements => "blind_requirements",
            ConditionKind::SystemDate => "system_date",
            ConditionKind::Unknown => "unknown",
        }
    }
}

impl From<&str> for ConditionKind {
    fn from(id: &str) -> Self {
        ConditionKind::ALL
            .into_iter()
            .find(|k| k.as_str() == id)
            .unwrap_or(ConditionKind::Unknown)
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One predicate gating a rule's effects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: ConditionKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Params,
    #[cfg_attr(feature = "serde", serde(default))]
    pub negate: bool,
    /// Joins this condition with the next one in its group.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Combinator,
}

impl Condition {
    #[must_use]
    pub fn new(id: &str, kind: ConditionKind) -> Self {
        Self {
            id: id.to_owned(),
            kind,
            params: Params::new(),
            negate: false,
            next: Combinator::And,
        }
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    #[must_use]
    pub fn negated(mut self) -> Self {
        self.negate = !self.negate;
        self
    }

    /// Join with the following condition using OR instead of AND.
    #[must_use]
    pub fn or_next(mut self) -> Self {
        self.next = Combinator::Or;
        self
    }
}

/// An ordered set of conditions evaluated as one parenthesized unit.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionGroup {
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<Condition>,
    /// Joins this group with the next group of the rule.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Combinator,
}

impl ConditionGroup {
    #[must_use]
    pub fn new(conditions: Vec<Condition>) -> Self {
        Self {
            conditions,
            next: Combinator::And,
        }
    }

    #[must_use]
    pub fn or_next(mut self) -> Self {
        self.next = Combinator::Or;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lua_operators() {
        assert_eq!(CompareOp::Neq.to_string(), "~=");
        assert_eq!(CompareOp::Gte.to_string(), ">=");
        assert_eq!(Combinator::Or.to_string(), "or");
    }

    #[test]
    fn operator_ids() {
        assert_eq!(CompareOp::from_id("greater_than"), Some(CompareOp::Gt));
        assert_eq!(CompareOp::from_id("<="), Some(CompareOp::Lte));
        assert_eq!(CompareOp::from_id("between"), None);
    }

    #[test]
    fn kind_ids_round_trip() {
        for kind in ConditionKind::ALL {
            assert_eq!(ConditionKind::from(kind.as_str()), kind);
        }
        assert_eq!(ConditionKind::from("moon_phase"), ConditionKind::Unknown);
    }

    #[test]
    fn builder_chain() {
        let cond = Condition::new("c1", ConditionKind::PlayerMoney)
            .with("operator", "greater_than")
            .with("value", 10_i64)
            .negated()
            .or_next();
        assert!(cond.negate);
        assert_eq!(cond.next, Combinator::Or);
        assert_eq!(cond.params.number("value"), Some(10.0));
    }
}
