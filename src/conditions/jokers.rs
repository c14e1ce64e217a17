//! Conditions on owned jokers, consumables and vouchers.

use super::{compare, ConditionCx};
use crate::lua;
use crate::types::card::prefixed;
use crate::types::Params;

/// Owned jokers, optionally of one rarity (`1`..`4` or a rarity key).
pub(super) fn joker_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let lhs = match p.str("rarity").filter(|r| *r != "any") {
        Some(rarity) => {
            let rarity = match rarity {
                "common" => "1".to_owned(),
                "uncommon" => "2".to_owned(),
                "rare" => "3".to_owned(),
                "legendary" => "4".to_owned(),
                other => lua::quote(other),
            };
            format!(
                "(function() local count = 0 for _, joker in ipairs(G.jokers.cards) do if joker.config.center.rarity == {rarity} then count = count + 1 end end return count end)()"
            )
        }
        None => "#G.jokers.cards".to_owned(),
    };
    Some(compare(&lhs, p, 1, cx))
}

pub(super) fn specific_joker(p: &Params) -> Option<String> {
    let key = prefixed("j_", p.str("joker_key")?);
    Some(format!("next(SMODS.find_card({}))", lua::quote(&key)))
}

/// Position of this joker: `"first"`, `"last"` or 1-based index.
pub(super) fn joker_position(p: &Params) -> Option<String> {
    let slot = match (p.number("position"), p.str_or("position", "first")) {
        (Some(n), _) => lua::number(n.trunc()),
        (None, "last") => "#G.jokers.cards".to_owned(),
        (None, "first") => "1".to_owned(),
        (None, _) => return None,
    };
    Some(format!("G.jokers.cards[{slot}] == card"))
}

/// Held consumables, optionally of one set (`Tarot`, `Planet`, `Spectral`).
pub(super) fn consumable_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let lhs = match p.str("consumable_type").filter(|t| *t != "any") {
        Some(set) => format!(
            "(function() local count = 0 for _, consumable in ipairs(G.consumeables.cards) do if consumable.ability.set == {} then count = count + 1 end end return count end)()",
            lua::quote(set)
        ),
        None => "#G.consumeables.cards".to_owned(),
    };
    Some(compare(&lhs, p, 1, cx))
}

pub(super) fn voucher_redeemed(p: &Params) -> Option<String> {
    let key = prefixed("v_", p.str("voucher_key")?);
    Some(format!("G.GAME.used_vouchers[{}]", lua::quote(&key)))
}
