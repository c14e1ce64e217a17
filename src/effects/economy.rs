//! Money, interest, sell value and debt.

use super::{colour, EffectCx, EffectOutput, Operation};
use crate::types::Effect;

pub(super) fn set_dollars(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "dollars", 5_i64);
    let code = match op {
        Operation::Set => format!("ease_dollars({}, true)", op.delta("G.GAME.dollars", &v)),
        _ => format!("ease_dollars({})", op.delta("G.GAME.dollars", &v)),
    };
    let message = match op {
        Operation::Set => format!("\"$\"..tostring({v})"),
        _ => format!("\"{}$\"..tostring({v})", op.sign()),
    };
    EffectOutput::closure(code)
        .message(message)
        .colour(colour::MONEY)
}

pub(super) fn edit_interest_cap(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "interest_cap", 5_i64);
    EffectOutput::closure(op.assign("G.GAME.interest_cap", &v))
        .message("\"Interest Cap Changed!\"")
        .colour(colour::MONEY)
}

/// Sell value of this joker (`target = "self"`), every joker (`"all_jokers"`)
/// or every held consumable (`"all_consumables"`).
pub(super) fn set_sell_value(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let op = Operation::from_params(&effect.params, Operation::Add);
    let v = cx.value(effect, "value", "sell_value", 1_i64);
    let update = |var: &str| {
        format!(
            "{var}.ability.extra_value = {var}.ability.extra_value or 0\n{}\n{var}:set_cost()",
            op.assign(&format!("{var}.ability.extra_value"), &v)
        )
    };
    let area = match effect.params.str_or("target", "self") {
        "all_jokers" => Some("G.jokers.cards"),
        "all_consumables" => Some("G.consumeables.cards"),
        _ => None,
    };
    let code = match area {
        Some(area) => format!(
            "for _, target_card in ipairs({area}) do\n{}\nend",
            crate::lua::indent(&update("target_card"), 1)
        ),
        None => update("card"),
    };
    EffectOutput::closure(code)
        .message("localize('k_val_up')")
        .colour(colour::MONEY)
}

/// Lowers the bankruptcy floor so the player can go into debt.
pub(super) fn allow_debt(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let v = cx.value(effect, "value", "debt", 20_i64);
    EffectOutput::closure(Operation::Subtract.assign("G.GAME.bankrupt_at", &v))
        .message("\"Debt Allowed!\"")
        .colour(colour::MONEY)
}

#[cfg(test)]
mod tests {
    use crate::effects::test_support::compile;
    use crate::effects::Body;
    use crate::types::{Effect, EffectKind, Trigger};

    #[test]
    fn set_dollars_operations() {
        let add = Effect::new("e1", EffectKind::SetDollars).with("value", 3_i64);
        let out = compile(&add, Trigger::RoundEnd).0.unwrap();
        assert_eq!(
            out.body,
            Body::Closure("ease_dollars(card.ability.extra.dollars)".to_owned())
        );
        assert_eq!(
            out.message.as_deref(),
            Some("\"+$\"..tostring(card.ability.extra.dollars)")
        );

        let set = add.clone().with("operation", "set");
        let out = compile(&set, Trigger::RoundEnd).0.unwrap();
        assert_eq!(
            out.body,
            Body::Closure(
                "ease_dollars(card.ability.extra.dollars - G.GAME.dollars, true)".to_owned()
            )
        );

        let sub = add.with("operation", "subtract");
        let out = compile(&sub, Trigger::RoundEnd).0.unwrap();
        assert_eq!(
            out.message.as_deref(),
            Some("\"-$\"..tostring(card.ability.extra.dollars)")
        );
    }

    #[test]
    fn sell_value_of_all_jokers_loops() {
        let effect = Effect::new("e1", EffectKind::SetSellValue).with("target", "all_jokers");
        let out = compile(&effect, Trigger::ShopExited).0.unwrap();
        let Body::Closure(code) = out.body else {
            panic!("expected closure");
        };
        assert!(code.starts_with("for _, target_card in ipairs(G.jokers.cards) do"));
        assert!(code.contains(
            "target_card.ability.extra_value = target_card.ability.extra_value + card.ability.extra.sell_value"
        ));
    }

    #[test]
    fn debt_lowers_floor() {
        let out = compile(&Effect::new("e1", EffectKind::AllowDebt), Trigger::BlindSelected)
            .0
            .unwrap();
        assert_eq!(
            out.body,
            Body::Closure(
                "G.GAME.bankrupt_at = G.GAME.bankrupt_at - card.ability.extra.debt".to_owned()
            )
        );
    }
}
