//! Playing-card creation and modification.

use super::jokers::edition_call;
use super::{colour, event, EffectCx, EffectOutput};
use crate::conditions::hand_area;
use crate::lua;
use crate::types::card::{prefixed, Rank, Suit};
use crate::types::Effect;

const TRIGGERED: &str = "context.other_card";

fn pick(options: &[&str], seed: &str) -> String {
    let list = options
        .iter()
        .map(|o| lua::quote_single(o))
        .collect::<Vec<_>>()
        .join(", ");
    format!("pseudorandom_element({{ {list} }}, pseudoseed({seed}))")
}

fn suit_names() -> Vec<&'static str> {
    Suit::ALL.iter().map(|s| s.name()).collect()
}

fn rank_keys() -> Vec<&'static str> {
    Rank::LETTERS
        .iter()
        .filter_map(|l| Rank::parse(l))
        .map(Rank::key)
        .collect()
}

/// `:set_ability(...)` for an enhancement name, `"none"` or `"random"`.
fn enhancement_call(var: &str, raw: &str, seed: &str) -> String {
    match raw.to_ascii_lowercase().as_str() {
        "none" => format!("{var}:set_ability(G.P_CENTERS.c_base)"),
        "random" => format!(
            "{var}:set_ability(SMODS.poll_enhancement({{ guaranteed = true, key = {seed} }}))"
        ),
        name => format!("{var}:set_ability(G.P_CENTERS.{})", prefixed("m_", name)),
    }
}

/// `:set_seal(...)` for a seal name, `"none"` or `"random"`.
fn seal_call(var: &str, raw: &str, seed: &str) -> String {
    match raw.to_ascii_lowercase().as_str() {
        "none" => format!("{var}:set_seal(nil)"),
        "random" => format!(
            "{var}:set_seal(SMODS.poll_seal({{ guaranteed = true, key = {seed} }}), true)"
        ),
        name => {
            let mut chars = name.chars();
            let seal = chars
                .next()
                .map(|c| c.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default();
            format!("{var}:set_seal({}, true)", lua::quote(&seal))
        }
    }
}

/// Creates a playing card in the deck. Unset or `"random"` suit and rank are
/// drawn at runtime.
pub(super) fn add_card_to_deck(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let seed = cx.seed("add_card", effect);
    let suit = effect.params.str("suit").and_then(Suit::parse);
    let rank = effect.params.str("rank").and_then(Rank::parse);
    let front = match (suit, rank) {
        (Some(suit), Some(rank)) => format!(
            "G.P_CARDS[{}]",
            lua::quote_single(&format!("{}_{}", suit.letter(), rank.letter()))
        ),
        (Some(suit), None) => format!(
            "G.P_CARDS['{}_' .. {}]",
            suit.letter(),
            pick(&Rank::LETTERS, &seed)
        ),
        (None, Some(rank)) => format!(
            "G.P_CARDS[{} .. '_{}']",
            pick(&["S", "H", "C", "D"], &seed),
            rank.letter()
        ),
        (None, None) => format!("pseudorandom_element(G.P_CARDS, pseudoseed({seed}))"),
    };
    let center = match effect.params.str("enhancement") {
        Some(name) if name != "none" && name != "random" => {
            format!("G.P_CENTERS.{}", prefixed("m_", &name.to_ascii_lowercase()))
        }
        _ => "G.P_CENTERS.c_base".to_owned(),
    };
    let mut code = vec![
        format!("local card_front = {front}"),
        format!(
            "local new_card = create_playing_card({{ front = card_front, center = {center} }}, G.discard, true, false, nil, true)"
        ),
    ];
    if effect.params.str("enhancement") == Some("random") {
        code.push(enhancement_call("new_card", "random", &seed));
    }
    if let Some(seal) = effect.params.str("seal").filter(|s| *s != "none") {
        code.push(seal_call("new_card", seal, &seed));
    }
    code.extend(edition_call("new_card", effect, "edition"));
    code.extend([
        "G.E_MANAGER:add_event(Event({\n    func = function()\n        new_card:start_materialize()\n        G.play:emplace(new_card)\n        return true\n    end\n}))".to_owned(),
        "G.E_MANAGER:add_event(Event({\n    func = function()\n        G.deck.config.card_limit = G.deck.config.card_limit + 1\n        return true\n    end\n}))".to_owned(),
        "draw_card(G.play, G.deck, 90, 'up')".to_owned(),
        "SMODS.calculate_context({ playing_card_added = true, cards = { new_card } })".to_owned(),
    ]);
    EffectOutput::closure(code.join("\n"))
        .message("\"Added Card!\"")
        .colour(colour::GREEN)
}

/// Copies the card that fired a per-card trigger into the hand.
pub(super) fn copy_triggered_card(cx: &EffectCx<'_>) -> Option<EffectOutput> {
    if !cx.trigger.is_per_card() {
        return None;
    }
    let code = [
        "G.playing_card = (G.playing_card and G.playing_card + 1) or 1".to_owned(),
        format!("local copied_card = copy_card({TRIGGERED}, nil, nil, G.playing_card)"),
        "copied_card:add_to_deck()".to_owned(),
        "G.deck.config.card_limit = G.deck.config.card_limit + 1".to_owned(),
        "table.insert(G.playing_cards, copied_card)".to_owned(),
        "G.hand:emplace(copied_card)".to_owned(),
        "copied_card.states.visible = nil".to_owned(),
        event("copied_card:start_materialize()"),
    ];
    Some(
        EffectOutput::closure(code.join("\n"))
            .message("localize('k_copied_ex')")
            .colour(colour::CHIPS),
    )
}

/// Rewrites rank, suit, enhancement, seal or edition of the triggering card.
/// Nothing to change yields `None`.
pub(super) fn edit_triggered_card(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    if !cx.trigger.is_per_card() {
        return None;
    }
    let p = &effect.params;
    let seed = cx.seed("edit_card", effect);
    let mut code = Vec::new();

    let suit = match p.str("new_suit") {
        Some("random") => Some(pick(&suit_names(), &seed)),
        Some(raw) => Suit::parse(raw).map(|s| lua::quote(s.name())),
        None => None,
    };
    let rank = match p.str("new_rank") {
        Some("random") => Some(pick(&rank_keys(), &seed)),
        Some(raw) => Rank::parse(raw).map(|r| lua::quote(r.key())),
        None => None,
    };
    if suit.is_some() || rank.is_some() {
        code.push(format!(
            "assert(SMODS.change_base({TRIGGERED}, {}, {}))",
            suit.as_deref().unwrap_or("nil"),
            rank.as_deref().unwrap_or("nil")
        ));
    }
    if let Some(raw) = p.str("new_enhancement") {
        code.push(enhancement_call(TRIGGERED, raw, &seed));
    }
    if let Some(raw) = p.str("new_seal") {
        code.push(seal_call(TRIGGERED, raw, &seed));
    }
    match p.str("new_edition") {
        Some("none") => code.push(format!("{TRIGGERED}:set_edition(nil, true)")),
        Some(_) => code.extend(edition_call(TRIGGERED, effect, "new_edition")),
        None => {}
    }
    if code.is_empty() {
        return None;
    }
    Some(
        EffectOutput::closure(code.join("\n"))
            .message("\"Card Modified!\"")
            .colour(colour::BLUE),
    )
}

fn conversion_area(effect: &Effect, cx: &EffectCx<'_>) -> &'static str {
    hand_area(&effect.params, cx.trigger).unwrap_or("G.hand.cards")
}

/// Changes the suit of every card in the hand area to `suit`.
pub(super) fn convert_cards_suit(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    let (suit, hoisted) = match effect.params.str_or("suit", "random") {
        "random" => {
            let chosen = cx.local("target_suit");
            let seed = cx.seed("convert_suit", effect);
            let code = format!("local {chosen} = {}", pick(&suit_names(), &seed));
            (chosen, Some(code))
        }
        raw => (lua::quote(Suit::parse(raw)?.name()), None),
    };
    let area = conversion_area(effect, cx);
    let output = EffectOutput::closure(format!(
        "for _, playing_card in ipairs({area}) do\n    assert(SMODS.change_base(playing_card, {suit}))\nend"
    ))
    .message("\"Suits Changed!\"")
    .colour(colour::PURPLE);
    Some(match hoisted {
        Some(code) => output.hoist(code),
        None => output,
    })
}

/// Changes the rank of every card in the hand area to `rank`.
pub(super) fn convert_cards_rank(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    let (rank, hoisted) = match effect.params.str_or("rank", "random") {
        "random" => {
            let chosen = cx.local("target_rank");
            let seed = cx.seed("convert_rank", effect);
            let code = format!("local {chosen} = {}", pick(&rank_keys(), &seed));
            (chosen, Some(code))
        }
        raw => (lua::quote(Rank::parse(raw)?.key()), None),
    };
    let area = conversion_area(effect, cx);
    let output = EffectOutput::closure(format!(
        "for _, playing_card in ipairs({area}) do\n    assert(SMODS.change_base(playing_card, nil, {rank}))\nend"
    ))
    .message("\"Ranks Changed!\"")
    .colour(colour::PURPLE);
    Some(match hoisted {
        Some(code) => output.hoist(code),
        None => output,
    })
}

/// Permanently raises a bonus stored on the triggering card.
///
/// `bonus_type` names the ability field: `perma_bonus` (chips), `perma_mult`,
/// `perma_x_mult`, `perma_h_chips`, `perma_h_mult`, `perma_p_dollars`...
pub(super) fn perma_bonus(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    if !cx.trigger.is_per_card() {
        return None;
    }
    let field = lua::identifier(effect.params.str_or("bonus_type", "perma_bonus"));
    if !field.starts_with("perma_") {
        return None;
    }
    let v = cx.value(effect, "value", &field, 1_i64);
    let target = format!("{TRIGGERED}.ability.{field}");
    let tint = match field.as_str() {
        "perma_mult" | "perma_h_mult" | "perma_x_mult" | "perma_h_x_mult" => colour::MULT,
        "perma_p_dollars" | "perma_h_dollars" => colour::MONEY,
        _ => colour::CHIPS,
    };
    Some(
        EffectOutput::closure(format!(
            "{target} = ({target} or 0) + {}",
            super::grouped(&v)
        ))
        .message("localize('k_upgrade_ex')")
        .colour(tint),
    )
}
