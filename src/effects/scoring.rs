//! Effects expressed purely as fields of the returned table.

use super::{colour, EffectCx, EffectOutput};
use crate::lua;
use crate::types::{Effect, Trigger};

fn field(key: &str, expr: &str) -> Vec<String> {
    vec![format!("{key} = {expr}")]
}

pub(super) fn add_chips(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "chips", 10_i64);
    EffectOutput::fields(field("chips", &v)).colour(colour::CHIPS)
}

pub(super) fn add_mult(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "mult", 4_i64);
    EffectOutput::fields(field("mult", &v)).colour(colour::MULT)
}

pub(super) fn apply_x_mult(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "xmult", 1.5);
    EffectOutput::fields(field("Xmult", &v)).colour(colour::MULT)
}

pub(super) fn apply_x_chips(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "xchips", 1.5);
    EffectOutput::fields(field("x_chips", &v)).colour(colour::CHIPS)
}

pub(super) fn apply_exp_mult(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "emult", 1.1);
    EffectOutput::fields(field("e_mult", &v)).colour(colour::DARK_EDITION)
}

pub(super) fn apply_exp_chips(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "echips", 1.1);
    EffectOutput::fields(field("e_chips", &v)).colour(colour::DARK_EDITION)
}

pub(super) fn add_dollars(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "dollars", 5_i64);
    EffectOutput::fields(field("dollars", &v)).colour(colour::MONEY)
}

/// Only per-card triggers have a repetition pass to return into.
pub(super) fn retrigger(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    if !cx.trigger.supports_retrigger() {
        return None;
    }
    let v = cx.value(effect, "value", "repetitions", 1_i64);
    Some(
        EffectOutput::fields(field("repetitions", &v))
            .message("localize('k_again_ex')")
            .colour(colour::ORANGE),
    )
}

pub(super) fn show_message(effect: &Effect) -> EffectOutput {
    let text = effect.params.str_or("text", "Hello!");
    EffectOutput::message_only(lua::quote(text))
        .colour(colour::named(effect.params.str_or("colour", "white")))
}

pub(super) fn balance() -> EffectOutput {
    EffectOutput::fields(field("balance", "true")).colour(colour::PURPLE)
}

pub(super) fn swap_chips_mult() -> EffectOutput {
    EffectOutput::fields(field("swap", "true"))
        .message("localize('k_swapped_ex')")
        .colour(colour::PURPLE)
}

/// Prevents a lost round. Rules carrying it switch the round-end guard to
/// the game-over pass.
pub(super) fn saved_from_death(cx: &EffectCx<'_>) -> Option<EffectOutput> {
    (cx.trigger == Trigger::RoundEnd).then(|| {
        EffectOutput::fields(field("saved", "true"))
            .message("localize('k_saved_ex')")
            .colour(colour::RED)
    })
}

/// Discards can remove the card in place; scored or held cards are
/// destroyed through the runtime helper.
pub(super) fn destroy_triggered_card(cx: &EffectCx<'_>) -> Option<EffectOutput> {
    let output = match cx.trigger {
        Trigger::CardDiscarded => EffectOutput::fields(field("remove", "true")),
        t if t.is_per_card() => EffectOutput::closure("SMODS.destroy_cards(context.other_card)"),
        _ => return None,
    };
    Some(output.message("\"Destroyed!\"").colour(colour::RED))
}
