//! Passive-effect compiler.
//!
//! Passive effects hold for as long as the item is owned: each compiles to a
//! statement run when the card enters the deck and its inverse run when it
//! leaves. Effects that need a shared runtime function patched also file a
//! [`HookRequest`].

pub mod hooks;

use tracing::{trace, warn};

pub use hooks::{synthesize, HookKind, HookRequest};

use crate::context::ItemContext;
use crate::coordinate::Bindings;
use crate::effects::{event, grouped, EffectCx, Operation};
use crate::lua;
use crate::resolve::GameVariableRegistry;
use crate::types::card::{Rank, Suit};
use crate::types::{Effect, EffectKind, Rule, Trigger};

/// One passive effect: its enter/exit statements and any hook it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassiveEffect {
    pub enter: Option<String>,
    pub exit: Option<String>,
    pub hook: Option<HookRequest>,
}

impl PassiveEffect {
    fn pair(enter: String, exit: String) -> Self {
        Self {
            enter: Some(enter),
            exit: Some(exit),
            hook: None,
        }
    }

    fn hook(request: HookRequest) -> Self {
        Self {
            hook: Some(request),
            ..Self::default()
        }
    }
}

/// Everything the passive rules of one item contribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassiveParts {
    pub add_to_deck: Vec<String>,
    pub remove_from_deck: Vec<String>,
    pub hooks: Vec<HookRequest>,
}

impl PassiveParts {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.add_to_deck.is_empty() && self.remove_from_deck.is_empty() && self.hooks.is_empty()
    }

    fn push(&mut self, effect: PassiveEffect) {
        self.add_to_deck.extend(effect.enter);
        self.remove_from_deck.extend(effect.exit);
        self.hooks.extend(effect.hook);
    }
}

/// `target` moved by `amount` on enter and back on exit.
fn shift(target: &str, amount: &str, negative: bool) -> PassiveEffect {
    let (on, off) = if negative {
        (Operation::Subtract, Operation::Add)
    } else {
        (Operation::Add, Operation::Subtract)
    };
    PassiveEffect::pair(on.assign(target, amount), off.assign(target, amount))
}

/// `function(amount)` on enter and `function(-amount)` on exit.
fn call(function: &str, amount: &str, negative: bool) -> PassiveEffect {
    let positive = grouped(amount);
    let negated = format!("-{positive}");
    let (on, off) = if negative {
        (negated, positive)
    } else {
        (positive, negated)
    };
    PassiveEffect::pair(format!("{function}({on})"), format!("{function}({off})"))
}

fn join(a: PassiveEffect, b: PassiveEffect) -> PassiveEffect {
    let glue = |x: Option<String>, y: Option<String>| match (x, y) {
        (Some(x), Some(y)) => Some(format!("{x}\n{y}")),
        (x, y) => x.or(y),
    };
    PassiveEffect {
        enter: glue(a.enter, b.enter),
        exit: glue(a.exit, b.exit),
        hook: a.hook.or(b.hook),
    }
}

/// Lua test over a local `id` for a comma-separated rank list or `"face"`.
fn rank_matcher(raw: &str) -> Option<String> {
    let ids: Vec<u8> = if raw.eq_ignore_ascii_case("face") {
        vec![11, 12, 13]
    } else {
        raw.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| Rank::parse(s).map(Rank::id))
            .collect::<Option<_>>()?
    };
    if ids.is_empty() {
        return None;
    }
    let tests = ids
        .iter()
        .map(|id| format!("id == {id}"))
        .collect::<Vec<_>>()
        .join(" or ");
    Some(format!("({tests})"))
}

fn generate(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<PassiveEffect> {
    let negative = Operation::from_params(&effect.params, Operation::Add) == Operation::Subtract;
    let owner = cx.item.owner_key().to_owned();
    Some(match effect.kind {
        EffectKind::EditHandSize => {
            let v = cx.value(effect, "value", "hand_size", 1_i64);
            call("G.hand:change_size", &v, negative)
        }
        EffectKind::EditHands => {
            let v = cx.value(effect, "value", "hands", 1_i64);
            join(
                shift("G.GAME.round_resets.hands", &v, negative),
                call("ease_hands_played", &v, negative),
            )
        }
        EffectKind::EditDiscards => {
            let v = cx.value(effect, "value", "discards", 1_i64);
            join(
                shift("G.GAME.round_resets.discards", &v, negative),
                call("ease_discard", &v, negative),
            )
        }
        EffectKind::EditJokerSlots => {
            let v = cx.value(effect, "value", "joker_slots", 1_i64);
            shift("G.jokers.config.card_limit", &v, negative)
        }
        EffectKind::EditConsumableSlots => {
            let v = cx.value(effect, "value", "consumable_slots", 1_i64);
            shift("G.consumeables.config.card_limit", &v, negative)
        }
        EffectKind::EditShopSlots => {
            let v = cx.value(effect, "value", "shop_slots", 1_i64);
            call("change_shop_size", &v, negative)
        }
        EffectKind::EditInterestCap => {
            let v = cx.value(effect, "value", "interest_cap", 5_i64);
            shift("G.GAME.interest_cap", &v, negative)
        }
        EffectKind::AllowDebt => {
            let v = cx.value(effect, "value", "debt", 20_i64);
            shift("G.GAME.bankrupt_at", &v, true)
        }
        EffectKind::FreeRerolls => {
            let v = cx.value(effect, "value", "free_rerolls", 1_i64);
            call("SMODS.change_free_rerolls", &v, negative)
        }
        EffectKind::DiscountItems => {
            let v = cx.value(effect, "value", "discount", 1_i64);
            let mode = match effect.params.str_or("discount_type", "flat") {
                "percentage" | "percent" => "percentage",
                _ => "flat",
            };
            let refresh = event(
                "for _, item in pairs(G.I.CARD) do\n    if item.set_cost then\n        item:set_cost()\n    end\nend",
            );
            PassiveEffect {
                enter: Some(refresh.clone()),
                exit: Some(refresh),
                hook: Some(
                    HookRequest::new(HookKind::SetCost, &owner)
                        .param("amount", v)
                        .param("mode", mode),
                ),
            }
        }
        EffectKind::ReduceFlushStraight => PassiveEffect::hook(HookRequest::new(HookKind::FourFingers, &owner)),
        EffectKind::Shortcut => PassiveEffect::hook(HookRequest::new(HookKind::Shortcut, &owner)),
        EffectKind::SplashEffect => PassiveEffect::hook(HookRequest::new(HookKind::AlwaysScores, &owner)),
        EffectKind::Showman => PassiveEffect::hook(HookRequest::new(HookKind::Showman, &owner)),
        EffectKind::CombineSuits => {
            let a = Suit::parse(effect.params.str_or("suit_1", "Hearts"))?;
            let b = Suit::parse(effect.params.str_or("suit_2", "Diamonds"))?;
            if a == b {
                return None;
            }
            PassiveEffect::hook(
                HookRequest::new(HookKind::IsSuit, &owner)
                    .param("suit_1", lua::quote(a.name()))
                    .param("suit_2", lua::quote(b.name())),
            )
        }
        EffectKind::CombineRanks => {
            let matches = rank_matcher(effect.params.str_or("source_ranks", "face"))?;
            let target = Rank::parse(effect.params.str_or("target_rank", "K"))?;
            PassiveEffect::hook(
                HookRequest::new(HookKind::GetId, &owner)
                    .param("matches", matches)
                    .param("target", target.id().to_string()),
            )
        }
        _ => return None,
    })
}

/// Compile one effect under the passive trigger. Kinds with no passive form
/// yield `None`.
pub fn compile_passive(
    effect: &Effect,
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Option<PassiveEffect> {
    let bindings = Bindings::new();
    let (compiled, slots) = {
        let mut cx = EffectCx::new(Trigger::Passive, item, registry, &bindings);
        let compiled = generate(effect, &mut cx);
        (compiled, cx.take_slots())
    };
    let Some(compiled) = compiled else {
        warn!(effect = %effect.id, kind = %effect.kind, "dropping effect with no passive form");
        return None;
    };
    item.declare_passive(&effect.id, slots);
    trace!(effect = %effect.id, kind = %effect.kind, "compiled passive effect");
    Some(compiled)
}

/// Compile every effect of a passive rule. Conditions and random groups have
/// no meaning while always active and are ignored.
pub fn compile_passive_rule(
    rule: &Rule,
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> PassiveParts {
    if rule.has_conditions() {
        warn!(rule = %rule.id, "passive rule carries conditions; ignoring them");
    }
    if !rule.random_groups.is_empty() {
        warn!(rule = %rule.id, "passive rule carries random groups; ignoring them");
    }
    let mut parts = PassiveParts::default();
    for effect in &rule.effects {
        if let Some(compiled) = compile_passive(effect, item, registry) {
            parts.push(compiled);
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(effect: &Effect) -> (Option<PassiveEffect>, ItemContext) {
        let mut item = ItemContext::new("j_mod_wide");
        let out = compile_passive(effect, &mut item, &GameVariableRegistry::builtin());
        (out, item)
    }

    #[test]
    fn joker_slots_enter_and_exit_are_inverse() {
        let effect = Effect::new("p1", EffectKind::EditJokerSlots)
            .with("operation", "add")
            .with("value", 1_i64);
        let (out, item) = compile(&effect);
        let out = out.unwrap();
        assert_eq!(
            out.enter.as_deref(),
            Some("G.jokers.config.card_limit = G.jokers.config.card_limit + card.ability.extra.joker_slots")
        );
        assert_eq!(
            out.exit.as_deref(),
            Some("G.jokers.config.card_limit = G.jokers.config.card_limit - card.ability.extra.joker_slots")
        );
        assert_eq!(item.passive_slots().len(), 1);
        assert!(item.derived_slots().is_empty());
    }

    #[test]
    fn hand_size_subtract_flips_calls() {
        let effect = Effect::new("p1", EffectKind::EditHandSize)
            .with("operation", "subtract")
            .with("value", 2_i64);
        let out = compile(&effect).0.unwrap();
        assert_eq!(
            out.enter.as_deref(),
            Some("G.hand:change_size(-card.ability.extra.hand_size)")
        );
        assert_eq!(
            out.exit.as_deref(),
            Some("G.hand:change_size(card.ability.extra.hand_size)")
        );
    }

    #[test]
    fn extra_hands_adjust_reset_and_current() {
        let out = compile(&Effect::new("p1", EffectKind::EditHands)).0.unwrap();
        assert_eq!(
            out.enter.as_deref(),
            Some("G.GAME.round_resets.hands = G.GAME.round_resets.hands + card.ability.extra.hands\nease_hands_played(card.ability.extra.hands)")
        );
    }

    #[test]
    fn shortcut_files_a_hook_only() {
        let out = compile(&Effect::new("p1", EffectKind::Shortcut)).0.unwrap();
        assert!(out.enter.is_none());
        assert_eq!(out.hook.unwrap(), HookRequest::new(HookKind::Shortcut, "j_mod_wide"));
    }

    #[test]
    fn discount_hook_carries_slot_read() {
        let effect = Effect::new("p1", EffectKind::DiscountItems)
            .with("discount_type", "percentage")
            .with("value", 25_i64);
        let out = compile(&effect).0.unwrap();
        let hook = out.hook.unwrap();
        assert_eq!(hook.params["amount"], "card.ability.extra.discount");
        assert_eq!(hook.params["mode"], "percentage");
        assert!(out.enter.unwrap().contains("item:set_cost()"));
    }

    #[test]
    fn rank_lists() {
        assert_eq!(rank_matcher("2, 3").as_deref(), Some("(id == 2 or id == 3)"));
        assert_eq!(rank_matcher("face").as_deref(), Some("(id == 11 or id == 12 or id == 13)"));
        assert_eq!(rank_matcher("2, X"), None);
        assert_eq!(rank_matcher(""), None);
    }

    #[test]
    fn scoring_effects_have_no_passive_form() {
        assert!(compile(&Effect::new("p1", EffectKind::AddMult)).0.is_none());
    }

    #[test]
    fn rule_collects_parts() {
        let rule = Rule::new("r1", Trigger::Passive)
            .effect(Effect::new("p1", EffectKind::EditDiscards))
            .effect(Effect::new("p2", EffectKind::Showman));
        let mut item = ItemContext::new("j_mod_wide");
        let parts = compile_passive_rule(&rule, &mut item, &GameVariableRegistry::builtin());
        assert_eq!(parts.add_to_deck.len(), 1);
        assert_eq!(parts.remove_from_deck.len(), 1);
        assert_eq!(parts.hooks.len(), 1);
    }
}
