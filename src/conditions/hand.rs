//! Conditions on the played or discarded hand.

use super::card::{enhancement_predicate, rank_predicate, seal_predicate, suit_predicate};
use super::{compare, count_cards, hand_area, ConditionCx};
use crate::lua;
use crate::types::{Params, Trigger};

/// `scope = "scoring"` compares the scored hand name; `"all"` accepts any
/// hand contained in the played cards.
pub(super) fn hand_type(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let hand = lua::quote(p.str("hand_type")?);
    if cx.trigger.has_played_hand() {
        Some(match p.str_or("scope", "scoring") {
            "all" => format!("next(context.poker_hands[{hand}])"),
            _ => format!("context.scoring_name == {hand}"),
        })
    } else if cx.trigger == Trigger::HandDiscarded {
        Some(format!(
            "G.FUNCS.get_poker_hand_info(context.full_hand) == {hand}"
        ))
    } else {
        None
    }
}

pub(super) fn card_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let area = hand_area(p, cx.trigger)?;
    Some(compare(&format!("#{area}"), p, 5, cx))
}

fn matching_count(
    p: &Params,
    cx: &ConditionCx<'_>,
    predicate: Option<String>,
) -> Option<String> {
    let area = hand_area(p, cx.trigger)?;
    Some(compare(&count_cards(area, &predicate?), p, 1, cx))
}

pub(super) fn suit_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let predicate = suit_predicate("playing_card", p.str("suit")?);
    matching_count(p, cx, predicate)
}

pub(super) fn rank_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let predicate = rank_predicate("playing_card", p.str("rank")?);
    matching_count(p, cx, predicate)
}

pub(super) fn enhancement_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let predicate = enhancement_predicate("playing_card", p.str_or("enhancement", "any"));
    matching_count(p, cx, Some(predicate))
}

pub(super) fn seal_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let predicate = seal_predicate("playing_card", p.str_or("seal", "any"));
    matching_count(p, cx, Some(predicate))
}

/// Whether a hand type has been played this round (`scope = "round"`) or this
/// run (`"run"`). Without a hand type, tests the hand being played now.
pub(super) fn poker_hand_been_played(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let hand = match p.str("hand_type") {
        Some(hand) => lua::quote(hand),
        None if cx.trigger.has_played_hand() => "context.scoring_name".to_owned(),
        None => return None,
    };
    // The hand being scored already counts as played once.
    let threshold = if p.str("hand_type").is_none() { 1 } else { 0 };
    Some(match p.str_or("scope", "round") {
        "run" => format!("G.GAME.hands[{hand}].played > {threshold}"),
        _ => format!("G.GAME.hands[{hand}].played_this_round > {threshold}"),
    })
}

pub(super) fn discarded_card_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    cx.trigger
        .has_discarded_hand()
        .then(|| compare("#context.full_hand", p, 5, cx))
}

pub(super) fn glass_card_destroyed(cx: &ConditionCx<'_>) -> Option<String> {
    (cx.trigger == Trigger::CardDestroyed).then(|| {
        "(function() for _, removed_card in ipairs(context.removed or {}) do if SMODS.has_enhancement(removed_card, \"m_glass\") then return true end end return false end)()".to_owned()
    })
}
