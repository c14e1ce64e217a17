//! Mutation of the item's own persistent variables.

use super::{colour, EffectCx, EffectOutput, Operation};
use crate::lua;
use crate::types::{ConfigSlot, Effect};

/// Hoists `card.ability.extra.<name> = ...` ahead of the return so the new
/// value is in place before any sibling field is built. Siblings that read
/// the same variable are given the pre-mutation snapshot by the coordinator.
///
/// The target slot is declared with initial 0; a user variable of the same
/// name takes precedence at emission.
pub(super) fn modify_internal_variable(
    effect: &Effect,
    cx: &mut EffectCx<'_>,
) -> Option<EffectOutput> {
    let name = lua::variable_slot(effect.params.str("variable_name")?);
    if name.is_empty() {
        return None;
    }
    let op = Operation::from_params(&effect.params, Operation::Add);
    let amount = cx.value(effect, "value", &format!("{name}_change"), 1_i64);
    let target = lua::slot(&name);
    cx.item.note_write(&name);
    let message = match op {
        Operation::Add | Operation::Multiply => "localize('k_upgrade_ex')".to_owned(),
        Operation::Set => "\"Reset!\"".to_owned(),
        Operation::Subtract | Operation::Divide => "\"Downgrade!\"".to_owned(),
    };
    let mut output = EffectOutput::message_only(message)
        .colour(colour::GREEN)
        .hoist(op.assign(&target, &amount));
    output.new_slots.push(ConfigSlot::new(name, 0_i64));
    Some(output)
}
