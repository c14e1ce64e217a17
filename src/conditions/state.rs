//! Conditions on player, round, blind and run state.

use super::card::filtered_count;
use super::{compare, ConditionCx};
use crate::lua;
use crate::types::Params;

pub(super) fn player_money(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare(
        "(G.GAME.dollars + (G.GAME.dollar_buffer or 0))",
        p,
        0,
        cx,
    ))
}

pub(super) fn remaining_hands(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare("G.GAME.current_round.hands_left", p, 1, cx))
}

pub(super) fn remaining_discards(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare("G.GAME.current_round.discards_left", p, 1, cx))
}

pub(super) fn first_played_hand() -> String {
    "G.GAME.current_round.hands_played == 0".to_owned()
}

pub(super) fn first_discarded_hand() -> String {
    "G.GAME.current_round.discards_used == 0".to_owned()
}

pub(super) fn hand_size(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare("G.hand.config.card_limit", p, 8, cx))
}

/// Level of a named hand, or of the hand being played when unnamed.
pub(super) fn hand_level(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let hand = match p.str("hand_type") {
        Some(hand) => lua::quote(hand),
        None if cx.trigger.has_played_hand() => "context.scoring_name".to_owned(),
        None => return None,
    };
    Some(compare(&format!("G.GAME.hands[{hand}].level"), p, 1, cx))
}

pub(super) fn deck_size(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let area = match p.str_or("scope", "full") {
        "remaining" => "#G.deck.cards",
        _ => "#G.playing_cards",
    };
    Some(compare(area, p, 52, cx))
}

/// Cards in the full deck matching a suit, rank, enhancement or seal filter.
pub(super) fn deck_count(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let lhs = filtered_count("G.playing_cards", p).unwrap_or_else(|| "#G.playing_cards".to_owned());
    Some(compare(&lhs, p, 1, cx))
}

pub(super) fn internal_variable(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let name = lua::variable_slot(p.str("variable_name")?);
    if name.is_empty() {
        return None;
    }
    Some(compare(&lua::slot(&name), p, 0, cx))
}

/// `"small"`, `"big"` or `"boss"`.
pub(super) fn blind_type(p: &Params) -> Option<String> {
    let kind = match p.str("blind_type")?.to_ascii_lowercase().as_str() {
        "small" => "Small",
        "big" => "Big",
        "boss" => "Boss",
        _ => return None,
    };
    Some(format!("G.GAME.blind:get_type() == {}", lua::quote(kind)))
}

pub(super) fn boss_blind_active() -> String {
    "(G.GAME.blind.boss and not G.GAME.blind.disabled)".to_owned()
}

pub(super) fn ante_level(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare("G.GAME.round_resets.ante", p, 1, cx))
}

/// Current chips as a percentage of the blind requirement.
pub(super) fn blind_requirements(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    Some(compare(
        "(G.GAME.chips / math.max(G.GAME.blind.chips, 1) * 100)",
        p,
        100,
        cx,
    ))
}

/// A field of the local clock: `day`, `month`, `year`, `weekday` or `hour`.
pub(super) fn system_date(p: &Params, cx: &ConditionCx<'_>) -> Option<String> {
    let format = match p.str_or("date_part", "day") {
        "day" => "%d",
        "month" => "%m",
        "year" => "%Y",
        "weekday" => "%w",
        "hour" => "%H",
        _ => return None,
    };
    Some(compare(
        &format!("tonumber(os.date({}))", lua::quote(format)),
        p,
        1,
        cx,
    ))
}
