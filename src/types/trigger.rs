use std::fmt;

/// The event that activates a rule.
///
/// Every variant except [`Trigger::Passive`] maps to one guard over the
/// runtime's `context` table. `Passive` is the always-active pseudo-trigger
/// compiled into deck enter/exit hooks instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Trigger {
    HandPlayed,
    CardScored,
    CardHeldInHand,
    CardHeldInHandEndOfRound,
    BeforeHandPlayed,
    AfterHandPlayed,
    BlindSelected,
    BlindSkipped,
    BossDefeated,
    RoundEnd,
    BoosterOpened,
    BoosterSkipped,
    ConsumableUsed,
    HandDiscarded,
    CardDiscarded,
    ShopReroll,
    ShopExited,
    CardSold,
    SellingSelf,
    CardDestroyed,
    Passive,
}

impl Trigger {
    pub const ALL: [Trigger; 21] = [
        Trigger::HandPlayed,
        Trigger::CardScored,
        Trigger::CardHeldInHand,
        Trigger::CardHeldInHandEndOfRound,
        Trigger::BeforeHandPlayed,
        Trigger::AfterHandPlayed,
        Trigger::BlindSelected,
        Trigger::BlindSkipped,
        Trigger::BossDefeated,
        Trigger::RoundEnd,
        Trigger::BoosterOpened,
        Trigger::BoosterSkipped,
        Trigger::ConsumableUsed,
        Trigger::HandDiscarded,
        Trigger::CardDiscarded,
        Trigger::ShopReroll,
        Trigger::ShopExited,
        Trigger::CardSold,
        Trigger::SellingSelf,
        Trigger::CardDestroyed,
        Trigger::Passive,
    ];

    /// The editor's identifier for this trigger.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Trigger::HandPlayed => "hand_played",
            Trigger::CardScored => "card_scored",
            Trigger::CardHeldInHand => "card_held_in_hand",
            Trigger::CardHeldInHandEndOfRound => "card_held_in_hand_end_of_round",
            Trigger::BeforeHandPlayed => "before_hand_played",
            Trigger::AfterHandPlayed => "after_hand_played",
            Trigger::BlindSelected => "blind_selected",
            Trigger::BlindSkipped => "blind_skipped",
            Trigger::BossDefeated => "boss_defeated",
            Trigger::RoundEnd => "round_end",
            Trigger::BoosterOpened => "booster_opened",
            Trigger::BoosterSkipped => "booster_skipped",
            Trigger::ConsumableUsed => "consumable_used",
            Trigger::HandDiscarded => "hand_discarded",
            Trigger::CardDiscarded => "card_discarded",
            Trigger::ShopReroll => "shop_reroll",
            Trigger::ShopExited => "shop_exited",
            Trigger::CardSold => "card_sold",
            Trigger::SellingSelf => "selling_self",
            Trigger::CardDestroyed => "card_destroyed",
            Trigger::Passive => "passive",
        }
    }

    /// Parse an editor identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Trigger> {
        Trigger::ALL.into_iter().find(|t| t.as_str() == id)
    }

    /// Guard over `context` selecting this trigger's firing.
    ///
    /// `retrigger` selects the repetition pass on per-card triggers, where
    /// `repetitions` results are collected. Returns `None` for `Passive`.
    #[must_use]
    pub fn context_guard(self, retrigger: bool) -> Option<&'static str> {
        let guard = match self {
            Trigger::HandPlayed => "context.cardarea == G.jokers and context.joker_main",
            Trigger::CardScored if retrigger => {
                "context.repetition and context.cardarea == G.play"
            }
            Trigger::CardScored => "context.individual and context.cardarea == G.play",
            Trigger::CardHeldInHand if retrigger => {
                "context.repetition and context.cardarea == G.hand and (next(context.card_effects[1]) or #context.card_effects > 1)"
            }
            Trigger::CardHeldInHand => {
                "context.individual and context.cardarea == G.hand and not context.end_of_round"
            }
            Trigger::CardHeldInHandEndOfRound => {
                "context.individual and context.cardarea == G.hand and context.end_of_round"
            }
            Trigger::BeforeHandPlayed => "context.before and context.cardarea == G.jokers",
            Trigger::AfterHandPlayed => "context.after and context.cardarea == G.jokers",
            Trigger::BlindSelected => "context.setting_blind",
            Trigger::BlindSkipped => "context.skip_blind",
            Trigger::BossDefeated => {
                "context.end_of_round and context.main_eval and G.GAME.blind.boss"
            }
            Trigger::RoundEnd => {
                "context.end_of_round and context.game_over == false and context.main_eval"
            }
            Trigger::BoosterOpened => "context.open_booster",
            Trigger::BoosterSkipped => "context.skipping_booster",
            Trigger::ConsumableUsed => "context.using_consumeable",
            Trigger::HandDiscarded => "context.pre_discard",
            Trigger::CardDiscarded => "context.discard",
            Trigger::ShopReroll => "context.reroll_shop",
            Trigger::ShopExited => "context.ending_shop",
            Trigger::CardSold => "context.selling_card",
            Trigger::SellingSelf => "context.selling_self",
            Trigger::CardDestroyed => "context.remove_playing_cards",
            Trigger::Passive => return None,
        };
        Some(guard)
    }

    /// Whether `context.other_card` names a single playing card for this trigger.
    #[must_use]
    pub fn is_per_card(self) -> bool {
        matches!(
            self,
            Trigger::CardScored
                | Trigger::CardHeldInHand
                | Trigger::CardHeldInHandEndOfRound
                | Trigger::CardDiscarded
        )
    }

    /// Whether retriggering cards is meaningful for this trigger.
    #[must_use]
    pub fn supports_retrigger(self) -> bool {
        matches!(self, Trigger::CardScored | Trigger::CardHeldInHand)
    }

    /// Whether a played hand (`context.scoring_hand`, `context.scoring_name`) is in scope.
    #[must_use]
    pub fn has_played_hand(self) -> bool {
        matches!(
            self,
            Trigger::HandPlayed
                | Trigger::CardScored
                | Trigger::CardHeldInHand
                | Trigger::BeforeHandPlayed
                | Trigger::AfterHandPlayed
        )
    }

    /// Whether a discarded hand (`context.full_hand`) is in scope.
    #[must_use]
    pub fn has_discarded_hand(self) -> bool {
        matches!(self, Trigger::HandDiscarded | Trigger::CardDiscarded)
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for trigger in Trigger::ALL {
            assert_eq!(Trigger::from_id(trigger.as_str()), Some(trigger));
        }
        assert_eq!(Trigger::from_id("nonsense"), None);
    }

    #[test]
    fn passive_has_no_guard() {
        assert_eq!(Trigger::Passive.context_guard(false), None);
        for trigger in Trigger::ALL.into_iter().filter(|t| *t != Trigger::Passive) {
            assert!(trigger.context_guard(false).is_some(), "{trigger}");
        }
    }

    #[test]
    fn retrigger_switches_to_repetition_pass() {
        let guard = Trigger::CardScored.context_guard(true).unwrap();
        assert!(guard.starts_with("context.repetition"));
        assert_eq!(
            Trigger::HandPlayed.context_guard(true),
            Trigger::HandPlayed.context_guard(false)
        );
    }
}
