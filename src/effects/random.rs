//! Probability-gated effect groups.
//!
//! A group compiles to one `if <roll> then ... end` block. Inside the block
//! every effect runs as a statement, since the surrounding return table has
//! already been built by the time the block executes. Retriggers are the
//! exception: they only exist as a returned `repetitions` field, so a group
//! holding one returns it and runs its other effects from that table's
//! `func`.

use tracing::{debug, trace};

use super::{compile_bundle, Body, EffectOutput};
use crate::context::ItemContext;
use crate::lua;
use crate::resolve::GameVariableRegistry;
use crate::types::{RandomGroup, Trigger};

/// The probability test guarding a group. Groups that rewrite the runtime
/// probability table roll against their own odds directly so the rewrite
/// cannot feed back into the roll.
#[must_use]
pub fn roll(group: &RandomGroup, odds_slot: &str, owner_key: &str) -> String {
    let seed = lua::quote_single(&format!("group_{}", lua::identifier(&group.id)));
    let odds = lua::slot(odds_slot);
    if group.mutates_probability() {
        format!("pseudorandom({seed}) < {} / {odds}", group.numerator)
    } else {
        format!(
            "SMODS.pseudorandom_probability(card, {seed}, {}, {odds}, {})",
            group.numerator,
            lua::quote_single(owner_key)
        )
    }
}

/// `{message = ..., colour = ...}` entries, empty without a message.
fn message_entries(output: &EffectOutput) -> Vec<String> {
    match &output.message {
        Some(message) => vec![
            format!("message = {message}"),
            format!("colour = {}", output.colour),
        ],
        None => Vec::new(),
    }
}

fn status_text(output: &EffectOutput) -> Option<String> {
    let entries = message_entries(output);
    (!entries.is_empty()).then(|| {
        format!(
            "card_eval_status_text(card, 'extra', nil, nil, nil, {{ {} }})",
            entries.join(", ")
        )
    })
}

/// One effect as a statement.
fn statement(output: &EffectOutput) -> Option<String> {
    match &output.body {
        Body::Fields(fields) => {
            let mut entries = fields.clone();
            entries.extend(message_entries(output));
            Some(format!(
                "SMODS.calculate_effect({{ {} }}, card)",
                entries.join(", ")
            ))
        }
        Body::Closure(code) => Some(match status_text(output) {
            Some(status) => format!("{code}\n{status}"),
            None => code.clone(),
        }),
        Body::MessageOnly => status_text(output),
    }
}

fn is_retrigger(output: &EffectOutput) -> bool {
    matches!(&output.body, Body::Fields(fields) if fields.iter().any(|f| f.starts_with("repetitions = ")))
}

/// Compile one group into its guarded block. A group whose effects all drop
/// yields `None`.
pub fn compile_random_group(
    group: &RandomGroup,
    trigger: Trigger,
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Option<String> {
    let bundle = compile_bundle(&group.effects, trigger, item, registry);
    if bundle.is_empty() {
        debug!(group = %group.id, "random group has no surviving effects");
        return None;
    }
    let odds = item.odds_slot(group.numerator, group.denominator);
    let mut body = bundle.hoisted();

    let (retriggers, others): (Vec<&EffectOutput>, Vec<&EffectOutput>) =
        bundle.outputs.iter().partition(|o| is_retrigger(o));
    let calls: Vec<String> = others.into_iter().filter_map(statement).collect();
    match retriggers.first() {
        Some(retrigger) => {
            let Body::Fields(fields) = &retrigger.body else {
                return None;
            };
            let mut entries = fields.clone();
            entries.extend(message_entries(retrigger));
            if !calls.is_empty() {
                entries.push(format!("func = {}", lua::closure(&calls.join("\n"))));
            }
            body.push(format!("return {}", lua::table(&entries)));
        }
        None => body.extend(calls),
    }
    trace!(group = %group.id, odds = %odds, "compiled random group");
    Some(format!(
        "if {} then\n{}\nend",
        roll(group, &odds, item.owner_key()),
        lua::indent(&body.join("\n"), 1)
    ))
}
