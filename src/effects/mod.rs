//! Effect compiler.
//!
//! Each generator turns one [`Effect`] into an [`EffectOutput`]: the code to
//! run before the return statement, the fragment that goes into the return
//! table, and the status message shown when it fires. Numeric parameters go
//! through [`EffectCx::value`], the one path into the resolver.

mod cards;
mod consumables;
mod economy;
mod game;
mod jokers;
pub mod random;
mod scoring;
mod variables;

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::context::ItemContext;
use crate::coordinate::{coordinate, Bindings};
use crate::lua;
use crate::resolve::{resolve_effect_value, GameVariableRegistry};
use crate::types::{ConfigSlot, Effect, EffectKind, Params, Trigger, Value};

pub(crate) mod colour {
    pub const CHIPS: &str = "G.C.CHIPS";
    pub const MULT: &str = "G.C.MULT";
    pub const MONEY: &str = "G.C.MONEY";
    pub const RED: &str = "G.C.RED";
    pub const BLUE: &str = "G.C.BLUE";
    pub const GREEN: &str = "G.C.GREEN";
    pub const PURPLE: &str = "G.C.PURPLE";
    pub const ORANGE: &str = "G.C.ORANGE";
    pub const FILTER: &str = "G.C.FILTER";
    pub const WHITE: &str = "G.C.WHITE";
    pub const DARK_EDITION: &str = "G.C.DARK_EDITION";
    pub const TAROT: &str = "G.C.SECONDARY_SET.Tarot";
    pub const PLANET: &str = "G.C.SECONDARY_SET.Planet";
    pub const SPECTRAL: &str = "G.C.SECONDARY_SET.Spectral";

    /// Map an editor colour name to a colour constant.
    #[must_use]
    pub fn named(name: &str) -> &'static str {
        match name.to_ascii_lowercase().as_str() {
            "red" | "mult" => RED,
            "blue" | "chips" => BLUE,
            "green" => GREEN,
            "purple" => PURPLE,
            "orange" => ORANGE,
            "gold" | "money" | "yellow" => MONEY,
            "edition" => DARK_EDITION,
            "tarot" => TAROT,
            "planet" => PLANET,
            "spectral" => SPECTRAL,
            _ => WHITE,
        }
    }
}

static NO_BINDINGS: Bindings = BTreeMap::new();

/// How an effect contributes to the return statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// `key = value` entries spliced into the return table.
    Fields(Vec<String>),
    /// Statements run through the table's `func` callback.
    Closure(String),
    /// Only a status message; any work happens in hoisted code.
    MessageOnly,
}

/// One compiled effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectOutput {
    /// Statements that run before the return table is built, in order.
    pub hoisted: Vec<String>,
    pub body: Body,
    /// Lua expression for the status message.
    pub message: Option<String>,
    pub colour: &'static str,
    /// Slots this effect reads, declared by the caller.
    pub new_slots: Vec<ConfigSlot>,
}

impl EffectOutput {
    #[must_use]
    pub fn fields(fields: Vec<String>) -> Self {
        Self::with_body(Body::Fields(fields))
    }

    #[must_use]
    pub fn closure(code: impl Into<String>) -> Self {
        Self::with_body(Body::Closure(code.into()))
    }

    #[must_use]
    pub fn message_only(message: impl Into<String>) -> Self {
        Self::with_body(Body::MessageOnly).message(message)
    }

    fn with_body(body: Body) -> Self {
        Self {
            hoisted: Vec::new(),
            body,
            message: None,
            colour: colour::WHITE,
            new_slots: Vec::new(),
        }
    }

    /// Lua expression shown as the status message.
    #[must_use]
    pub fn message(mut self, expr: impl Into<String>) -> Self {
        self.message = Some(expr.into());
        self
    }

    #[must_use]
    pub fn colour(mut self, colour: &'static str) -> Self {
        self.colour = colour;
        self
    }

    #[must_use]
    pub fn hoist(mut self, code: impl Into<String>) -> Self {
        self.hoisted.push(code.into());
        self
    }
}

/// State an effect generator may read or extend.
pub struct EffectCx<'a> {
    pub trigger: Trigger,
    pub item: &'a mut ItemContext,
    pub registry: &'a GameVariableRegistry,
    pub bindings: &'a Bindings,
    pending: Vec<ConfigSlot>,
}

impl<'a> EffectCx<'a> {
    #[must_use]
    pub fn new(
        trigger: Trigger,
        item: &'a mut ItemContext,
        registry: &'a GameVariableRegistry,
        bindings: &'a Bindings,
    ) -> Self {
        Self {
            trigger,
            item,
            registry,
            bindings,
            pending: Vec::new(),
        }
    }

    /// Resolve `effect.params[key]` (or `default` when absent) into a Lua
    /// expression, naming any new slot after `kind`.
    ///
    /// Mutating effects never see coordinator bindings: they read live slots.
    pub fn value(
        &mut self,
        effect: &Effect,
        key: &str,
        kind: &str,
        default: impl Into<Value>,
    ) -> String {
        let name = self.item.slot_name(kind);
        let default = default.into();
        let value = effect.params.get(key).unwrap_or(&default);
        let bindings = if effect.kind.mutates_variable() {
            &NO_BINDINGS
        } else {
            self.bindings
        };
        let resolved = resolve_effect_value(value, &effect.id, &name, self.registry, bindings);
        if let Some(reference) = &resolved.reference {
            self.item.note_reference(reference);
        }
        if let Some(slot) = resolved.offset_slot {
            self.item.require_slot(slot);
        }
        self.pending.extend(resolved.new_slots);
        resolved.expression
    }

    /// A unique Lua local name for hoisted code.
    pub fn local(&mut self, stem: &str) -> String {
        self.item.local_name(stem)
    }

    /// A seed string for `pseudoseed`, unique to the effect.
    #[must_use]
    pub fn seed(&self, stem: &str, effect: &Effect) -> String {
        lua::quote_single(&format!("{stem}_{}", lua::identifier(&effect.id)))
    }

    pub(crate) fn take_slots(&mut self) -> Vec<ConfigSlot> {
        std::mem::take(&mut self.pending)
    }
}

/// Arithmetic applied by effects with an `operation` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Set,
    Multiply,
    Divide,
}

impl Operation {
    /// The `operation` parameter, or `default` when absent or unknown.
    #[must_use]
    pub fn from_params(params: &Params, default: Operation) -> Operation {
        match params.str("operation") {
            Some("add" | "increment" | "increase" | "plus") => Operation::Add,
            Some("subtract" | "decrement" | "decrease" | "remove" | "minus") => {
                Operation::Subtract
            }
            Some("set") => Operation::Set,
            Some("multiply") => Operation::Multiply,
            Some("divide") => Operation::Divide,
            _ => default,
        }
    }

    /// `target = target <op> amount`.
    #[must_use]
    pub fn assign(self, target: &str, amount: &str) -> String {
        let amount = grouped(amount);
        match self {
            Operation::Add => format!("{target} = {target} + {amount}"),
            Operation::Subtract => format!("{target} = {target} - {amount}"),
            Operation::Set => format!("{target} = {amount}"),
            Operation::Multiply => format!("{target} = {target} * {amount}"),
            Operation::Divide => format!("{target} = {target} / {amount}"),
        }
    }

    /// The signed change this operation makes to `current`, for the
    /// runtime's `ease_*` helpers which take a delta.
    #[must_use]
    pub fn delta(self, current: &str, amount: &str) -> String {
        let amount = grouped(amount);
        match self {
            Operation::Add => amount,
            Operation::Subtract => format!("-{amount}"),
            Operation::Set => format!("{amount} - {current}"),
            Operation::Multiply => format!("{current} * ({amount} - 1)"),
            Operation::Divide => format!("{current} / {amount} - {current}"),
        }
    }

    /// Status-message prefix: `+`, `-`, `X`...
    #[must_use]
    pub fn sign(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Set => "=",
            Operation::Multiply => "X",
            Operation::Divide => "/",
        }
    }
}

/// Parenthesize compound expressions before embedding them in arithmetic.
#[must_use]
pub(crate) fn grouped(expr: &str) -> String {
    if expr.contains(' ') && !(expr.starts_with('(') && expr.ends_with(')')) {
        format!("({expr})")
    } else {
        expr.to_owned()
    }
}

/// `"<sign>" .. tostring(<amount>) .. " <unit>"`, a status message showing
/// the amount changed.
#[must_use]
pub(crate) fn amount_message(op: Operation, amount: &str, unit: &str) -> String {
    if unit.is_empty() {
        format!("\"{}\"..tostring({amount})", op.sign())
    } else {
        format!("\"{}\"..tostring({amount})..\" {unit}\"", op.sign())
    }
}

/// Wrap `code` in an event so it runs after the current scoring step.
#[must_use]
pub(crate) fn event(code: &str) -> String {
    format!(
        "G.E_MANAGER:add_event(Event({{\n{}\n}}))",
        lua::indent(&format!("func = {}", lua::closure(code)), 1)
    )
}

/// Compile one effect. Unsupported kinds, and kinds that need a trigger the
/// rule does not have, yield `None`.
pub fn compile_effect(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    let output = if effect.kind.is_passive_only() {
        None
    } else {
        generate(effect, cx)
    };
    let slots = cx.take_slots();
    let Some(mut output) = output else {
        warn!(
            effect = %effect.id,
            kind = %effect.kind,
            trigger = %cx.trigger,
            "dropping unsupported effect"
        );
        return None;
    };
    if let Some(custom) = effect.custom_message() {
        output.message = Some(lua::quote(custom));
        if let Body::Fields(fields) = &mut output.body {
            fields.push("remove_default_message = true".to_owned());
        }
    }
    let mut generated = std::mem::take(&mut output.new_slots);
    output.new_slots = slots;
    output.new_slots.append(&mut generated);
    trace!(
        effect = %effect.id,
        kind = %effect.kind,
        slots = output.new_slots.len(),
        "compiled effect"
    );
    Some(output)
}

/// Effects compiled together for one return, after variable coordination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bundle {
    /// Snapshot captures that must run before any effect's hoisted code.
    pub prelude: Vec<String>,
    pub outputs: Vec<EffectOutput>,
}

impl Bundle {
    /// Hoisted statements in run order: snapshots first, then each effect's.
    #[must_use]
    pub fn hoisted(&self) -> Vec<String> {
        self.prelude
            .iter()
            .chain(self.outputs.iter().flat_map(|o| &o.hoisted))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

/// Coordinate and compile `effects` in order, declaring every slot they need
/// on `item`. Dropped effects leave no trace.
pub fn compile_bundle(
    effects: &[Effect],
    trigger: Trigger,
    item: &mut ItemContext,
    registry: &GameVariableRegistry,
) -> Bundle {
    let coordination = coordinate(effects);
    let mut outputs = Vec::with_capacity(effects.len());
    for effect in effects {
        let compiled = {
            let mut cx = EffectCx::new(trigger, item, registry, &coordination.bindings);
            compile_effect(effect, &mut cx)
        };
        if let Some(output) = compiled {
            item.declare(&effect.id, output.new_slots.clone());
            outputs.push(output);
        }
    }
    Bundle {
        prelude: coordination.hoisted,
        outputs,
    }
}

fn generate(effect: &Effect, cx: &mut EffectCx<'_>) -> Option<EffectOutput> {
    match effect.kind {
        EffectKind::AddChips => Some(scoring::add_chips(effect, cx)),
        EffectKind::AddMult => Some(scoring::add_mult(effect, cx)),
        EffectKind::ApplyXMult => Some(scoring::apply_x_mult(effect, cx)),
        EffectKind::ApplyXChips => Some(scoring::apply_x_chips(effect, cx)),
        EffectKind::ApplyExpMult => Some(scoring::apply_exp_mult(effect, cx)),
        EffectKind::ApplyExpChips => Some(scoring::apply_exp_chips(effect, cx)),
        EffectKind::AddDollars => Some(scoring::add_dollars(effect, cx)),
        EffectKind::Retrigger => scoring::retrigger(effect, cx),
        EffectKind::ShowMessage => Some(scoring::show_message(effect)),
        EffectKind::Balance => Some(scoring::balance()),
        EffectKind::SwapChipsMult => Some(scoring::swap_chips_mult()),
        EffectKind::SavedFromDeath => scoring::saved_from_death(cx),
        EffectKind::DestroyTriggeredCard => scoring::destroy_triggered_card(cx),
        EffectKind::SetDollars => Some(economy::set_dollars(effect, cx)),
        EffectKind::EditInterestCap => Some(economy::edit_interest_cap(effect, cx)),
        EffectKind::SetSellValue => Some(economy::set_sell_value(effect, cx)),
        EffectKind::AllowDebt => Some(economy::allow_debt(effect, cx)),
        EffectKind::ModifyInternalVariable => variables::modify_internal_variable(effect, cx),
        EffectKind::LevelUpHand => game::level_up_hand(effect, cx),
        EffectKind::EditHands => Some(game::edit_hands(effect, cx)),
        EffectKind::EditDiscards => Some(game::edit_discards(effect, cx)),
        EffectKind::EditHandSize => Some(game::edit_hand_size(effect, cx)),
        EffectKind::DrawCards => Some(game::draw_cards(effect, cx)),
        EffectKind::EditJokerSlots => Some(game::edit_joker_slots(effect, cx)),
        EffectKind::EditConsumableSlots => Some(game::edit_consumable_slots(effect, cx)),
        EffectKind::EditShopSlots => Some(game::edit_shop_slots(effect, cx)),
        EffectKind::EditBlindSize => Some(game::edit_blind_size(effect, cx)),
        EffectKind::DisableBossBlind => Some(game::disable_boss_blind()),
        EffectKind::SetAnte => Some(game::set_ante(effect, cx)),
        EffectKind::ModifyProbability => Some(game::modify_probability(effect, cx)),
        EffectKind::CreateJoker => Some(jokers::create_joker(effect, cx)),
        EffectKind::DestroyJoker => Some(jokers::destroy_joker(effect, cx)),
        EffectKind::CopyJoker => Some(jokers::copy_joker(effect, cx)),
        EffectKind::DestroySelf => Some(jokers::destroy_self()),
        EffectKind::CreateConsumable => Some(consumables::create_consumable(effect, cx)),
        EffectKind::DestroyConsumable => Some(consumables::destroy_consumable(effect, cx)),
        EffectKind::CopyConsumable => Some(consumables::copy_consumable(effect, cx)),
        EffectKind::CreateTag => Some(consumables::create_tag(effect, cx)),
        EffectKind::AddCardToDeck => Some(cards::add_card_to_deck(effect, cx)),
        EffectKind::CopyTriggeredCard => cards::copy_triggered_card(cx),
        EffectKind::EditTriggeredCard => cards::edit_triggered_card(effect, cx),
        EffectKind::ConvertCardsSuit => cards::convert_cards_suit(effect, cx),
        EffectKind::ConvertCardsRank => cards::convert_cards_rank(effect, cx),
        EffectKind::PermaBonus => cards::perma_bonus(effect, cx),
        EffectKind::FreeRerolls
        | EffectKind::Shortcut
        | EffectKind::SplashEffect
        | EffectKind::DiscountItems
        | EffectKind::ReduceFlushStraight
        | EffectKind::CombineSuits
        | EffectKind::CombineRanks
        | EffectKind::Showman
        | EffectKind::Unknown => None,
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::compile;
    use super::*;

    #[test]
    fn operations_assign() {
        assert_eq!(Operation::Add.assign("x", "card.ability.extra.y"), "x = x + card.ability.extra.y");
        assert_eq!(Operation::Multiply.assign("x", "a + b"), "x = x * (a + b)");
        assert_eq!(Operation::Set.assign("x", "2"), "x = 2");
    }

    #[test]
    fn operations_delta() {
        assert_eq!(Operation::Subtract.delta("cur", "a"), "-a");
        assert_eq!(Operation::Set.delta("cur", "a"), "a - cur");
    }

    #[test]
    fn operation_ids() {
        let p = Params::new().with("operation", "decrement");
        assert_eq!(Operation::from_params(&p, Operation::Add), Operation::Subtract);
        assert_eq!(Operation::from_params(&Params::new(), Operation::Set), Operation::Set);
    }

    #[test]
    fn custom_message_on_fields_removes_default() {
        let effect = Effect::new("e1", EffectKind::AddMult)
            .with("value", 8_i64)
            .message("Big!");
        let (out, _) = compile(&effect, Trigger::HandPlayed);
        let out = out.unwrap();
        assert_eq!(out.message.as_deref(), Some("\"Big!\""));
        assert_eq!(
            out.body,
            Body::Fields(vec![
                "mult = card.ability.extra.mult".to_owned(),
                "remove_default_message = true".to_owned(),
            ])
        );
    }

    #[test]
    fn passive_only_kinds_drop_outside_passive() {
        let (out, _) = compile(&Effect::new("e1", EffectKind::Shortcut), Trigger::HandPlayed);
        assert!(out.is_none());
    }

    #[test]
    fn unknown_kind_drops() {
        let (out, _) = compile(&Effect::new("e1", EffectKind::Unknown), Trigger::HandPlayed);
        assert!(out.is_none());
    }

    #[test]
    fn slots_travel_with_output() {
        let effect = Effect::new("e1", EffectKind::AddDollars).with("value", "RANGE:2|6");
        let (out, _) = compile(&effect, Trigger::HandPlayed);
        let names: Vec<_> = out.unwrap().new_slots.into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["dollars_min", "dollars_max"]);
    }

    #[test]
    fn bundle_snapshots_before_mutation() {
        let effects = [
            Effect::new("m1", EffectKind::ModifyInternalVariable)
                .with("variable_name", "stacks")
                .with("value", 1_i64),
            Effect::new("e2", EffectKind::AddMult).with("value", "stacks"),
        ];
        let registry = GameVariableRegistry::builtin();
        let mut item = ItemContext::new("j_test_joker");
        let bundle = compile_bundle(&effects, Trigger::HandPlayed, &mut item, &registry);
        assert_eq!(
            bundle.hoisted(),
            [
                "local stacks_value = card.ability.extra.stacks",
                "card.ability.extra.stacks = card.ability.extra.stacks + card.ability.extra.stacks_change",
            ]
        );
        assert_eq!(
            bundle.outputs[1].body,
            Body::Fields(vec!["mult = stacks_value".to_owned()])
        );
        assert_eq!(item.slots_for("m1"), ["stacks_change".to_owned(), "stacks".to_owned()]);
        assert!(item.slots_for("e2").is_empty());
    }

    #[test]
    fn event_wraps_closure() {
        assert_eq!(
            event("play_sound('tarot1')"),
            "G.E_MANAGER:add_event(Event({\n    func = function()\n        play_sound('tarot1')\n        return true\n    end\n}))"
        );
    }
}
