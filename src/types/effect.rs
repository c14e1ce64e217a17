use std::fmt;

use super::value::{Params, Value};

/// The closed set of effect kinds the compiler understands.
///
/// Tags outside this set deserialize to [`EffectKind::Unknown`] and compile
/// to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum EffectKind {
    // Scoring fields
    AddChips,
    AddMult,
    ApplyXMult,
    ApplyXChips,
    ApplyExpMult,
    ApplyExpChips,
    AddDollars,
    Retrigger,
    ShowMessage,
    Balance,
    SwapChipsMult,
    SavedFromDeath,
    DestroyTriggeredCard,

    // Economy
    SetDollars,
    EditInterestCap,
    SetSellValue,
    AllowDebt,

    // Persistent variables
    ModifyInternalVariable,

    // Hands, discards and draws
    LevelUpHand,
    EditHands,
    EditDiscards,
    EditHandSize,
    DrawCards,

    // Slot limits
    EditJokerSlots,
    EditConsumableSlots,
    EditShopSlots,

    // Jokers
    CreateJoker,
    DestroyJoker,
    CopyJoker,
    DestroySelf,

    // Consumables and tags
    CreateConsumable,
    DestroyConsumable,
    CopyConsumable,
    CreateTag,

    // Playing cards
    AddCardToDeck,
    CopyTriggeredCard,
    EditTriggeredCard,
    ConvertCardsSuit,
    ConvertCardsRank,
    PermaBonus,

    // Blind, ante and odds
    EditBlindSize,
    DisableBossBlind,
    SetAnte,
    ModifyProbability,

    // Passive-only
    FreeRerolls,
    Shortcut,
    SplashEffect,
    DiscountItems,
    ReduceFlushStraight,
    CombineSuits,
    CombineRanks,
    Showman,

    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl EffectKind {
    pub const ALL: [EffectKind; 52] = [
        EffectKind::AddChips,
        EffectKind::AddMult,
        EffectKind::ApplyXMult,
        EffectKind::ApplyXChips,
        EffectKind::ApplyExpMult,
        EffectKind::ApplyExpChips,
        EffectKind::AddDollars,
        EffectKind::Retrigger,
        EffectKind::ShowMessage,
        EffectKind::Balance,
        EffectKind::SwapChipsMult,
        EffectKind::SavedFromDeath,
        EffectKind::DestroyTriggeredCard,
        EffectKind::SetDollars,
        EffectKind::EditInterestCap,
        EffectKind::SetSellValue,
        EffectKind::AllowDebt,
        EffectKind::ModifyInternalVariable,
        EffectKind::LevelUpHand,
        EffectKind::EditHands,
        EffectKind::EditDiscards,
        EffectKind::EditHandSize,
        EffectKind::DrawCards,
        EffectKind::EditJokerSlots,
        EffectKind::EditConsumableSlots,
        EffectKind::EditShopSlots,
        EffectKind::CreateJoker,
        EffectKind::DestroyJoker,
        EffectKind::CopyJoker,
        EffectKind::DestroySelf,
        EffectKind::CreateConsumable,
        EffectKind::DestroyConsumable,
        EffectKind::CopyConsumable,
        EffectKind::CreateTag,
        EffectKind::AddCardToDeck,
        EffectKind::CopyTriggeredCard,
        EffectKind::EditTriggeredCard,
        EffectKind::ConvertCardsSuit,
        EffectKind::ConvertCardsRank,
        EffectKind::PermaBonus,
        EffectKind::EditBlindSize,
        EffectKind::DisableBossBlind,
        EffectKind::SetAnte,
        EffectKind::ModifyProbability,
        EffectKind::FreeRerolls,
        EffectKind::Shortcut,
        EffectKind::SplashEffect,
        EffectKind::DiscountItems,
        EffectKind::ReduceFlushStraight,
        EffectKind::CombineSuits,
        EffectKind::CombineRanks,
        EffectKind::Showman,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EffectKind::AddChips => "add_chips",
            EffectKind::AddMult => "add_mult",
            EffectKind::ApplyXMult => "apply_x_mult",
            EffectKind::ApplyXChips => "apply_x_chips",
            EffectKind::ApplyExpMult => "apply_exp_mult",
            EffectKind::ApplyExpChips => "apply_exp_chips",
            EffectKind::AddDollars => "add_dollars",
            EffectKind::Retrigger => "retrigger",
            EffectKind::ShowMessage => "show_message",
            EffectKind::Balance => "balance",
            EffectKind::SwapChipsMult => "swap_chips_mult",
            EffectKind::SavedFromDeath => "saved_from_death",
            EffectKind::DestroyTriggeredCard => "destroy_triggered_card",
            EffectKind::SetDollars => "set_dollars",
            EffectKind::EditInterestCap => "edit_interest_cap",
            EffectKind::SetSellValue => "set_sell_value",
            EffectKind::AllowDebt => "allow_debt",
            EffectKind::ModifyInternalVariable => "modify_internal_variable",
            EffectKind::LevelUpHand => "level_up_hand",
            EffectKind::EditHands => "edit_hands",
            EffectKind::EditDiscards => "edit_discards",
            EffectKind::EditHandSize => "edit_hand_size",
            EffectKind::DrawCards => "draw_cards",
            EffectKind::EditJokerSlots => "edit_joker_slots",
            EffectKind::EditConsumableSlots => "edit_consumable_slots",
            EffectKind::EditShopSlots => "edit_shop_slots",
            EffectKind::CreateJoker => "create_joker",
            EffectKind::DestroyJoker => "destroy_joker",
            EffectKind::CopyJoker => "copy_joker",
            EffectKind::DestroySelf => "destroy_self",
            EffectKind::CreateConsumable => "create_consumable",
            EffectKind::DestroyConsumable => "destroy_consumable",
            EffectKind::CopyConsumable => "copy_consumable",
            EffectKind::CreateTag => "create_tag",
            EffectKind::AddCardToDeck => "add_card_to_deck",
            EffectKind::CopyTriggeredCard => "copy_triggered_card",
            EffectKind::EditTriggeredCard => "edit_triggered_card",
            EffectKind::ConvertCardsSuit => "convert_cards_suit",
            EffectKind::ConvertCardsRank => "convert_cards_rank",
            EffectKind::PermaBonus => "perma_bonus",
            EffectKind::EditBlindSize => "edit_blind_size",
            EffectKind::DisableBossBlind => "disable_boss_blind",
            EffectKind::SetAnte => "set_ante",
            EffectKind::ModifyProbability => "modify_probability",
            EffectKind::FreeRerolls => "free_rerolls",
            EffectKind::Shortcut => "shortcut",
            EffectKind::SplashEffect => "splash_effect",
            EffectKind::DiscountItems => "discount_items",
            EffectKind::ReduceFlushStraight => "reduce_flush_straight",
            EffectKind::CombineSuits => "combine_suits",
            EffectKind::CombineRanks => "combine_ranks",
            EffectKind::Showman => "showman",
            EffectKind::Unknown => "unknown",
        }
    }

    /// Retriggers can only be expressed as a returned `repetitions` field.
    #[must_use]
    pub fn is_retrigger(self) -> bool {
        self == EffectKind::Retrigger
    }

    /// Effects that rewrite the runtime's probability table. A random group
    /// containing one cannot test itself through that same table.
    #[must_use]
    pub fn mutates_probability(self) -> bool {
        self == EffectKind::ModifyProbability
    }

    /// The effect kind that writes an item's own persistent variables.
    #[must_use]
    pub fn mutates_variable(self) -> bool {
        self == EffectKind::ModifyInternalVariable
    }

    /// Kinds that only make sense while the item sits in the deck.
    #[must_use]
    pub fn is_passive_only(self) -> bool {
        matches!(
            self,
            EffectKind::FreeRerolls
                | EffectKind::Shortcut
                | EffectKind::SplashEffect
                | EffectKind::DiscountItems
                | EffectKind::ReduceFlushStraight
                | EffectKind::CombineSuits
                | EffectKind::CombineRanks
                | EffectKind::Showman
        )
    }
}

impl From<&str> for EffectKind {
    fn from(id: &str) -> Self {
        EffectKind::ALL
            .into_iter()
            .find(|k| k.as_str() == id)
            .unwrap_or(EffectKind::Unknown)
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic state mutation or scoring contribution.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub id: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub params: Params,
    /// Display text replacing the effect's default status message.
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
}

impl Effect {
    #[must_use]
    pub fn new(id: &str, kind: EffectKind) -> Self {
        Self {
            id: id.to_owned(),
            kind,
            params: Params::new(),
            message: None,
        }
    }

    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    #[must_use]
    pub fn message(mut self, text: &str) -> Self {
        self.message = Some(text.to_owned());
        self
    }

    /// The user message, ignoring blank text.
    #[must_use]
    pub fn custom_message(&self) -> Option<&str> {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ids_round_trip() {
        for kind in EffectKind::ALL {
            assert_eq!(EffectKind::from(kind.as_str()), kind);
        }
        assert_eq!(EffectKind::from("summon_dragon"), EffectKind::Unknown);
    }

    #[test]
    fn classification() {
        assert!(EffectKind::Retrigger.is_retrigger());
        assert!(EffectKind::ModifyProbability.mutates_probability());
        assert!(EffectKind::ModifyInternalVariable.mutates_variable());
        assert!(EffectKind::Shortcut.is_passive_only());
        assert!(!EffectKind::EditHandSize.is_passive_only());
    }

    #[test]
    fn blank_message_is_ignored() {
        let effect = Effect::new("e1", EffectKind::AddMult).message("   ");
        assert_eq!(effect.custom_message(), None);
        let effect = Effect::new("e1", EffectKind::AddMult).message("Boom");
        assert_eq!(effect.custom_message(), Some("Boom"));
    }
}
