//! The `calculate` function: trigger guards around per-rule bodies.
//!
//! Rules that share a trigger guard share one `if` block. Within it,
//! conditional rules form an `if`/`elseif` chain in authored order and
//! unconditional rules are merged into the final `else`, or form the whole
//! block when there is nothing conditional.

use tracing::{debug, trace};

use crate::assemble::assemble;
use crate::conditions::{compile_guard, ConditionCx};
use crate::context::ItemContext;
use crate::effects::compile_bundle;
use crate::effects::random::compile_random_group;
use crate::lua;
use crate::resolve::GameVariableRegistry;
use crate::types::{Effect, EffectKind, RandomGroup, Rule, Trigger};

const GAME_OVER_GUARD: &str = "context.end_of_round and context.game_over and context.main_eval";

fn all_effects(rule: &Rule) -> impl Iterator<Item = &Effect> {
    rule.effects
        .iter()
        .chain(rule.random_groups.iter().flat_map(|g| &g.effects))
}

/// The context guard a rule fires under.
fn trigger_guard(rule: &Rule) -> Option<&'static str> {
    if rule.trigger == Trigger::RoundEnd
        && all_effects(rule).any(|e| e.kind == EffectKind::SavedFromDeath)
    {
        return Some(GAME_OVER_GUARD);
    }
    rule.trigger
        .context_guard(rule.retriggers() && rule.trigger.supports_retrigger())
}

/// Copies made by Blueprint-style jokers must not mutate this card's state.
fn excludes_blueprint(rules: &[&Rule]) -> bool {
    rules.iter().copied().flat_map(all_effects).any(|e| {
        matches!(
            e.kind,
            EffectKind::ModifyInternalVariable | EffectKind::DestroySelf
        )
    })
}

/// Compile one bundle of effects and random groups into a body.
fn body(
    effects: &[Effect],
    groups: &[RandomGroup],
    trigger: Trigger,
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Option<String> {
    let bundle = compile_bundle(effects, trigger, item, registry);
    let blocks: Vec<String> = groups
        .iter()
        .filter_map(|g| compile_random_group(g, trigger, item, registry))
        .collect();
    assemble(&bundle, &blocks)
}

/// Compile the rules sharing one trigger guard into the inside of its block.
fn guard_block(
    rules: &[&Rule],
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Option<String> {
    let mut branches: Vec<(String, String)> = Vec::new();
    let mut merged_effects = Vec::new();
    let mut merged_groups = Vec::new();
    let mut trigger = None;

    for rule in rules {
        trigger = Some(rule.trigger);
        let cx = ConditionCx {
            trigger: rule.trigger,
            registry,
        };
        match compile_guard(&rule.condition_groups, &cx) {
            Some(guard) => {
                if let Some(body) = body(
                    &rule.effects,
                    &rule.random_groups,
                    rule.trigger,
                    item,
                    registry,
                ) {
                    trace!(rule = %rule.id, "conditional branch");
                    branches.push((guard, body));
                }
            }
            None => {
                merged_effects.extend(rule.effects.iter().cloned());
                merged_groups.extend(rule.random_groups.iter().cloned());
            }
        }
    }
    let fallback = match trigger {
        Some(trigger) => body(&merged_effects, &merged_groups, trigger, item, registry),
        None => None,
    };

    if branches.is_empty() {
        return fallback;
    }
    let mut out = String::new();
    for (i, (guard, body)) in branches.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "elseif" };
        out.push_str(&format!("{keyword} {guard} then\n{}\n", lua::indent(body, 1)));
    }
    if let Some(fallback) = fallback {
        out.push_str(&format!("else\n{}\n", lua::indent(&fallback, 1)));
    }
    out.push_str("end");
    Some(out)
}

/// Compile every non-passive rule of an item into a `calculate` function.
/// `None` when no rule produces code.
pub fn compile_calculate(
    rules: &[Rule],
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Option<String> {
    let mut grouped: Vec<(&'static str, Vec<&Rule>)> = Vec::new();
    for rule in rules.iter().filter(|r| r.trigger != Trigger::Passive) {
        let Some(guard) = trigger_guard(rule) else {
            continue;
        };
        match grouped.iter_mut().find(|(g, _)| *g == guard) {
            Some((_, members)) => members.push(rule),
            None => grouped.push((guard, vec![rule])),
        }
    }

    let mut blocks = Vec::new();
    for (guard, members) in &grouped {
        let Some(inner) = guard_block(members, item, registry) else {
            debug!(guard, "no rule under this trigger produced code");
            continue;
        };
        let guard = if excludes_blueprint(members) {
            format!("{guard} and not context.blueprint")
        } else {
            (*guard).to_owned()
        };
        blocks.push(format!("if {guard} then\n{}\nend", lua::indent(&inner, 1)));
    }
    if blocks.is_empty() {
        return None;
    }
    Some(format!(
        "function(self, card, context)\n{}\nend",
        lua::indent(&blocks.join("\n"), 1)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, ConditionGroup, ConditionKind};

    fn compile(rules: &[Rule]) -> (Option<String>, ItemContext) {
        let mut item = ItemContext::new("j_mod_test");
        let out = compile_calculate(rules, &mut item, &GameVariableRegistry::builtin());
        (out, item)
    }

    fn flush() -> ConditionGroup {
        ConditionGroup::new(vec![Condition::new("c1", ConditionKind::HandType)
            .with("hand_type", "Flush")])
    }

    #[test]
    fn single_unconditional_rule() {
        let rule = Rule::new("r1", Trigger::HandPlayed)
            .effect(Effect::new("e1", EffectKind::AddMult).with("value", 8_i64));
        let (out, _) = compile(&[rule]);
        assert_eq!(
            out.unwrap(),
            "function(self, card, context)\n    if context.cardarea == G.jokers and context.joker_main then\n        return {\n            mult = card.ability.extra.mult\n        }\n    end\nend"
        );
    }

    #[test]
    fn conditional_rules_chain_with_merged_else() {
        let rules = [
            Rule::new("r1", Trigger::HandPlayed)
                .when(flush())
                .effect(Effect::new("e1", EffectKind::AddMult).with("value", 8_i64)),
            Rule::new("r2", Trigger::HandPlayed)
                .effect(Effect::new("e2", EffectKind::AddChips).with("value", 10_i64)),
            Rule::new("r3", Trigger::HandPlayed)
                .effect(Effect::new("e3", EffectKind::AddChips).with("value", 5_i64)),
        ];
        let (out, item) = compile(&rules);
        let out = out.unwrap();
        assert!(out.contains("        if context.scoring_name == \"Flush\" then\n"));
        assert!(out.contains("        else\n            return {\n                chips = card.ability.extra.chips,\n                extra = {\n                    chips = card.ability.extra.chips2\n                }\n            }\n        end"));
        assert_eq!(out.matches("context.joker_main").count(), 1);
        let names: Vec<_> = item.derived_slots().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["mult", "chips", "chips2"]);
    }

    #[test]
    fn retrigger_rules_use_repetition_pass() {
        let rules = [
            Rule::new("r1", Trigger::CardScored).effect(Effect::new("e1", EffectKind::AddChips)),
            Rule::new("r2", Trigger::CardScored).effect(Effect::new("e2", EffectKind::Retrigger)),
        ];
        let out = compile(&rules).0.unwrap();
        assert!(out.contains("if context.individual and context.cardarea == G.play then"));
        assert!(out.contains("if context.repetition and context.cardarea == G.play then"));
    }

    #[test]
    fn mutations_skip_blueprint_copies() {
        let rule = Rule::new("r1", Trigger::RoundEnd).effect(
            Effect::new("e1", EffectKind::ModifyInternalVariable).with("variable_name", "count"),
        );
        let out = compile(&[rule]).0.unwrap();
        assert!(out.contains("context.main_eval and not context.blueprint then"));
    }

    #[test]
    fn saved_from_death_uses_game_over_pass() {
        let rule = Rule::new("r1", Trigger::RoundEnd)
            .effect(Effect::new("e1", EffectKind::SavedFromDeath));
        let out = compile(&[rule]).0.unwrap();
        assert!(out.contains("if context.end_of_round and context.game_over and context.main_eval then"));
    }

    #[test]
    fn passive_and_empty_rules_produce_nothing() {
        let rules = [
            Rule::new("r1", Trigger::Passive).effect(Effect::new("e1", EffectKind::EditHandSize)),
            Rule::new("r2", Trigger::HandPlayed).effect(Effect::new("e2", EffectKind::Unknown)),
        ];
        assert!(compile(&rules).0.is_none());
    }
}
