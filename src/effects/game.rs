//! Hands, discards, draws, slot limits, blind, ante and odds.

use super::{amount_message, colour, EffectCx, EffectOutput, Operation};
use crate::lua;
use crate::types::Effect;

/// Levels up the hand being played (`hand_type = "current"`), a named hand,
/// or a random visible hand chosen in hoisted code.
pub(super) fn level_up_hand(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    let selector = effect.params.str_or("hand_type", "current");
    if selector == "current" && !cx.trigger.has_played_hand() {
        return None;
    }
    let levels = cx.value(effect, "value", "levels", 1_i64);
    let output = match selector {
        "current" => EffectOutput::fields(vec![format!("level_up = {levels}")]),
        "random" => {
            let pool = cx.local("hand_pool");
            let chosen = cx.local("random_hand");
            let seed = cx.seed("level_up_hand", effect);
            EffectOutput::closure(format!("level_up_hand(card, {chosen}, true, {levels})")).hoist(
                format!(
                    "local {pool} = {{}}\nfor hand_key, hand in pairs(G.GAME.hands) do\n    if hand.visible then\n        {pool}[#{pool} + 1] = hand_key\n    end\nend\nlocal {chosen} = pseudorandom_element({pool}, pseudoseed({seed}))"
                ),
            )
        }
        hand => EffectOutput::closure(format!(
            "level_up_hand(card, {}, true, {levels})",
            lua::quote(hand)
        )),
    };
    Some(
        output
            .message("localize('k_level_up_ex')")
            .colour(colour::RED),
    )
}

pub(super) fn edit_hands(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "hands", 1_i64);
    EffectOutput::closure(format!(
        "ease_hands_played({})",
        op.delta("G.GAME.current_round.hands_left", &v)
    ))
    .message(amount_message(op, &v, "Hand"))
    .colour(colour::BLUE)
}

pub(super) fn edit_discards(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "discards", 1_i64);
    EffectOutput::closure(format!(
        "ease_discard({})",
        op.delta("G.GAME.current_round.discards_left", &v)
    ))
    .message(amount_message(op, &v, "Discard"))
    .colour(colour::RED)
}

pub(super) fn edit_hand_size(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "hand_size", 1_i64);
    EffectOutput::closure(format!(
        "G.hand:change_size({})",
        op.delta("G.hand.config.card_limit", &v)
    ))
    .message(amount_message(op, &v, "Hand Size"))
    .colour(colour::BLUE)
}

pub(super) fn draw_cards(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "cards", 1_i64);
    EffectOutput::closure(format!(
        "if G.deck and #G.deck.cards > 0 then\n    SMODS.draw_cards({v})\nend"
    ))
    .message(amount_message(Operation::Add, &v, "Cards"))
    .colour(colour::BLUE)
}

pub(super) fn edit_joker_slots(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "joker_slots", 1_i64);
    EffectOutput::closure(op.assign("G.jokers.config.card_limit", &v))
        .message(amount_message(op, &v, "Joker Slot"))
        .colour(colour::DARK_EDITION)
}

pub(super) fn edit_consumable_slots(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "consumable_slots", 1_i64);
    EffectOutput::closure(op.assign("G.consumeables.config.card_limit", &v))
        .message(amount_message(op, &v, "Consumable Slot"))
        .colour(colour::PURPLE)
}

pub(super) fn edit_shop_slots(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "shop_slots", 1_i64);
    EffectOutput::closure(format!(
        "change_shop_size({})",
        op.delta("G.GAME.shop.joker_max", &v)
    ))
    .message(amount_message(op, &v, "Shop Slot"))
    .colour(colour::MONEY)
}

pub(super) fn edit_blind_size(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Multiply);
    let v = cx.value(effect, "value", "blind_size", 2_i64);
    let code = [
        op.assign("G.GAME.blind.chips", &v),
        "G.GAME.blind.chips = math.floor(G.GAME.blind.chips)".to_owned(),
        "G.GAME.blind.chip_text = number_format(G.GAME.blind.chips)".to_owned(),
        "G.HUD_blind:recalculate()".to_owned(),
    ]
    .join("\n");
    EffectOutput::closure(code)
        .message(amount_message(op, &v, "Blind Size"))
        .colour(colour::GREEN)
}

pub(super) fn disable_boss_blind() -> EffectOutput {
    EffectOutput::closure(
        "if G.GAME.blind and G.GAME.blind.boss and not G.GAME.blind.disabled then\n    G.GAME.blind:disable()\n    play_sound('timpani')\nend",
    )
    .message("localize('ph_boss_disabled')")
    .colour(colour::GREEN)
}

pub(super) fn set_ante(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "ante", 1_i64);
    let code = [
        format!(
            "local ante_change = {}",
            op.delta("G.GAME.round_resets.ante", &v)
        ),
        "ease_ante(ante_change)".to_owned(),
        "G.GAME.round_resets.blind_ante = G.GAME.round_resets.blind_ante or G.GAME.round_resets.ante"
            .to_owned(),
        "G.GAME.round_resets.blind_ante = G.GAME.round_resets.blind_ante + ante_change".to_owned(),
    ]
    .join("\n");
    EffectOutput::closure(code)
        .message(amount_message(op, &v, "Ante"))
        .colour(colour::FILTER)
}

/// Rewrites every entry of the runtime probability table. Random groups
/// containing this effect test their odds without that table.
pub(super) fn modify_probability(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Multiply);
    let v = cx.value(effect, "value", "probability", 2_i64);
    EffectOutput::closure(format!(
        "for probability_key in pairs(G.GAME.probabilities) do\n    {}\nend",
        op.assign("G.GAME.probabilities[probability_key]", &v)
    ))
    .message(amount_message(op, &v, "Odds"))
    .colour(colour::GREEN)
}

#[cfg(test)]
mod tests {
    use crate::effects::test_support::compile;
    use crate::effects::Body;
    use crate::types::{Effect, EffectKind, Trigger};

    #[test]
    fn level_up_current_hand_is_a_field() {
        let effect = Effect::new("e1", EffectKind::LevelUpHand);
        let out = compile(&effect, Trigger::HandPlayed).0.unwrap();
        assert_eq!(
            out.body,
            Body::Fields(vec!["level_up = card.ability.extra.levels".to_owned()])
        );
        assert!(compile(&effect, Trigger::ShopExited).0.is_none());
    }

    #[test]
    fn level_up_random_hand_hoists_pick() {
        let effect = Effect::new("e1", EffectKind::LevelUpHand).with("hand_type", "random");
        let out = compile(&effect, Trigger::RoundEnd).0.unwrap();
        assert_eq!(out.hoisted.len(), 1);
        assert!(out.hoisted[0].starts_with("local hand_pool = {}"));
        assert!(out.hoisted[0].ends_with(
            "local random_hand = pseudorandom_element(hand_pool, pseudoseed('level_up_hand_e1'))"
        ));
        assert_eq!(
            out.body,
            Body::Closure(
                "level_up_hand(card, random_hand, true, card.ability.extra.levels)".to_owned()
            )
        );
    }

    #[test]
    fn joker_slots_assign_limit() {
        let effect = Effect::new("e1", EffectKind::EditJokerSlots).with("value", 2_i64);
        let out = compile(&effect, Trigger::BossDefeated).0.unwrap();
        assert_eq!(
            out.body,
            Body::Closure(
                "G.jokers.config.card_limit = G.jokers.config.card_limit + card.ability.extra.joker_slots"
                    .to_owned()
            )
        );
        assert_eq!(
            out.message.as_deref(),
            Some("\"+\"..tostring(card.ability.extra.joker_slots)..\" Joker Slot\"")
        );
    }

    #[test]
    fn blind_size_defaults_to_multiply() {
        let effect = Effect::new("e1", EffectKind::EditBlindSize);
        let out = compile(&effect, Trigger::BlindSelected).0.unwrap();
        let Body::Closure(code) = out.body else {
            panic!("expected closure");
        };
        assert!(code.starts_with(
            "G.GAME.blind.chips = G.GAME.blind.chips * card.ability.extra.blind_size"
        ));
    }
}
