//! Conditions on the single playing card in scope (`context.other_card`).

use super::{ConditionCx, count_cards};
use crate::lua;
use crate::types::card::{prefixed, Rank, Suit};
use crate::types::{Params, Trigger};

const CARD: &str = "context.other_card";

fn in_scope(cx: &ConditionCx<'_>) -> Option<&'static str> {
    cx.trigger.is_per_card().then_some(CARD)
}

/// Rank test on `var`. `"face"` selects face cards.
pub(super) fn rank_predicate(var: &str, raw: &str) -> Option<String> {
    match raw.to_ascii_lowercase().as_str() {
        "face" => Some(format!("{var}:is_face()")),
        "any" => None,
        _ => Rank::parse(raw).map(|rank| format!("{var}:get_id() == {}", rank.id())),
    }
}

/// Suit test on `var`. `"red"` and `"black"` cover two suits.
pub(super) fn suit_predicate(var: &str, raw: &str) -> Option<String> {
    match raw.to_ascii_lowercase().as_str() {
        "red" => Some(format!(
            "({var}:is_suit(\"Hearts\") or {var}:is_suit(\"Diamonds\"))"
        )),
        "black" => Some(format!(
            "({var}:is_suit(\"Spades\") or {var}:is_suit(\"Clubs\"))"
        )),
        _ => Suit::parse(raw).map(|suit| format!("{var}:is_suit({})", lua::quote(suit.name()))),
    }
}

/// Enhancement test on `var`: `"any"`, `"none"` or a center key.
pub(super) fn enhancement_predicate(var: &str, raw: &str) -> String {
    match raw {
        "any" => format!("next(SMODS.get_enhancements({var}))"),
        "none" => format!("not next(SMODS.get_enhancements({var}))"),
        key => format!(
            "SMODS.has_enhancement({var}, {})",
            lua::quote(&prefixed("m_", &key.to_ascii_lowercase()))
        ),
    }
}

/// Seal test on `var`: `"any"`, `"none"` or a seal name.
pub(super) fn seal_predicate(var: &str, raw: &str) -> String {
    match raw {
        "any" => format!("{var}.seal ~= nil"),
        "none" => format!("{var}.seal == nil"),
        seal => format!("{var}.seal == {}", lua::quote(seal)),
    }
}

/// Edition test on `var`: `"any"`, `"none"` or an edition key.
pub(super) fn edition_predicate(var: &str, raw: &str) -> String {
    match raw {
        "any" => format!("{var}.edition ~= nil"),
        "none" => format!("{var}.edition == nil"),
        key => format!(
            "({var}.edition and {var}.edition.key == {})",
            lua::quote(&prefixed("e_", &key.to_ascii_lowercase()))
        ),
    }
}

pub(super) fn rank(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    rank_predicate(in_scope(cx)?, p.str("rank")?)
}

pub(super) fn suit(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    suit_predicate(in_scope(cx)?, p.str("suit")?)
}

pub(super) fn enhancement(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(enhancement_predicate(in_scope(cx)?, p.str_or("enhancement", "any")))
}

pub(super) fn seal(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(seal_predicate(in_scope(cx)?, p.str_or("seal", "any")))
}

pub(super) fn edition(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(edition_predicate(in_scope(cx)?, p.str_or("edition", "any")))
}

/// Position of the card within its area: `"first"`, `"last"` or 1-based index.
pub(super) fn index(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let card = in_scope(cx)?;
    let area = match cx.trigger {
        Trigger::CardScored => "context.scoring_hand",
        Trigger::CardDiscarded => "context.full_hand",
        _ => "G.hand.cards",
    };
    let slot = match (p.number("position"), p.str_or("position", "first")) {
        (Some(n), _) => lua::number(n.trunc()),
        (None, "last") => format!("#{area}"),
        (None, _) => "1".to_owned(),
    };
    Some(format!("{card} == {area}[{slot}]"))
}

/// Number of cards in `area` matching whichever of `suit`, `rank`,
/// `enhancement` or `seal` is set. `None` when no filter is set.
pub(super) fn filtered_count(area: &str, p: &Params) -> Option<String> {
    let var = "playing_card";
    let predicate = if let Some(suit) = p.str("suit") {
        suit_predicate(var, suit)?
    } else if let Some(rank) = p.str("rank") {
        rank_predicate(var, rank)?
    } else if let Some(enhancement) = p.str("enhancement") {
        enhancement_predicate(var, enhancement)
    } else if let Some(seal) = p.str("seal") {
        seal_predicate(var, seal)
    } else {
        return None;
    };
    Some(count_cards(area, &predicate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::GameVariableRegistry;

    fn scored() -> (GameVariableRegistry, Trigger) {
        (GameVariableRegistry::builtin(), Trigger::CardScored)
    }

    #[test]
    fn rank_of_scored_card() {
        let (registry, trigger) = scored();
        let cx = ConditionCx { trigger, registry: &registry };
        let p = Params::new().with("rank", "Ace");
        assert_eq!(rank(&p, &cx).as_deref(), Some("context.other_card:get_id() == 14"));
        let p = Params::new().with("rank", "face");
        assert_eq!(rank(&p, &cx).as_deref(), Some("context.other_card:is_face()"));
    }

    #[test]
    fn per_card_conditions_need_per_card_trigger() {
        let registry = GameVariableRegistry::builtin();
        let cx = ConditionCx {
            trigger: Trigger::HandPlayed,
            registry: &registry,
        };
        assert_eq!(suit(&Params::new().with("suit", "Hearts"), &cx), None);
    }

    #[test]
    fn compound_predicates_are_parenthesized() {
        assert_eq!(
            suit_predicate("c", "red").as_deref(),
            Some("(c:is_suit(\"Hearts\") or c:is_suit(\"Diamonds\"))")
        );
        assert_eq!(
            edition_predicate("c", "foil"),
            "(c.edition and c.edition.key == \"e_foil\")"
        );
    }

    #[test]
    fn enhancement_keys_are_prefixed() {
        assert_eq!(
            enhancement_predicate("c", "glass"),
            "SMODS.has_enhancement(c, \"m_glass\")"
        );
        assert_eq!(
            enhancement_predicate("c", "m_steel"),
            "SMODS.has_enhancement(c, \"m_steel\")"
        );
    }

    #[test]
    fn index_positions() {
        let (registry, trigger) = scored();
        let cx = ConditionCx { trigger, registry: &registry };
        assert_eq!(
            index(&Params::new().with("position", "last"), &cx).as_deref(),
            Some("context.other_card == context.scoring_hand[#context.scoring_hand]")
        );
        assert_eq!(
            index(&Params::new().with("position", 2_i64), &cx).as_deref(),
            Some("context.other_card == context.scoring_hand[2]")
        );
    }
}
