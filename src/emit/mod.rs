//! Item emitter: one `SMODS.Joker` definition block per item.

pub mod atlas;
mod calculate;
pub mod text;

use std::collections::BTreeSet;

use tracing::{debug, instrument, warn};

pub use atlas::{AtlasAllocator, AtlasCell, AtlasPos};
pub use calculate::compile_calculate;

use crate::config::ExportConfig;
use crate::context::ItemContext;
use crate::lua;
use crate::passive::{compile_passive_rule, HookRequest, PassiveParts};
use crate::types::{ConfigSlot, ExportError, Item, Trigger};

/// One compiled item.
#[derive(Debug, Clone, PartialEq)]
pub struct EmittedItem {
    /// Full runtime key, e.g. `j_mymod_lucky_cat`.
    pub key: String,
    /// The `SMODS.Joker { ... }` block.
    pub source: String,
    /// The item's storage slots, in declaration order.
    pub slots: Vec<ConfigSlot>,
    /// Shared overrides this item takes part in.
    pub hooks: Vec<HookRequest>,
}

/// User variables as storage slots, first spelling of each slot name winning.
fn user_slots(item: &Item) -> Vec<ConfigSlot> {
    let mut slots: Vec<ConfigSlot> = Vec::with_capacity(item.user_variables.len());
    for variable in &item.user_variables {
        let slot = ConfigSlot::from(variable);
        if slot.name.is_empty() {
            warn!(variable = %variable.name, "variable name has no letters or digits; skipping");
        } else if slots.iter().any(|s| s.name == slot.name) {
            warn!(variable = %variable.name, slot = %slot.name, "variable repeats an earlier slot; skipping");
        } else {
            slots.push(slot);
        }
    }
    slots
}

/// Storage in declaration order: passive slots, user variables, then slots
/// derived from triggered effects. User variables claim their names.
fn storage(user: &[ConfigSlot], cx: &ItemContext) -> Vec<ConfigSlot> {
    let claimed: BTreeSet<&str> = user.iter().map(|v| v.name.as_str()).collect();
    let mut slots: Vec<ConfigSlot> = cx
        .passive_slots()
        .iter()
        .filter(|s| !claimed.contains(s.name.as_str()))
        .cloned()
        .collect();
    slots.extend(user.iter().cloned());
    for slot in cx.derived_slots() {
        if !claimed.contains(slot.name.as_str()) && !slots.iter().any(|s| s.name == slot.name) {
            slots.push(slot.clone());
        }
    }
    slots
}

/// `loc_vars`: every slot once, in storage order, with probability slots
/// replaced by the numerator/denominator pair the runtime scales.
fn loc_vars(slots: &[ConfigSlot], cx: &ItemContext) -> String {
    let mut locals = Vec::new();
    let mut vars = Vec::new();
    for slot in slots {
        match cx.odds().iter().position(|o| o.name == slot.name) {
            Some(i) => {
                let odds = &cx.odds()[i];
                let suffix = if i == 0 { String::new() } else { (i + 1).to_string() };
                let (num, den) = (format!("numerator{suffix}"), format!("denominator{suffix}"));
                locals.push(format!(
                    "local {num}, {den} = SMODS.get_probability_vars(card, {}, {}, {})",
                    odds.numerator,
                    lua::slot(&slot.name),
                    lua::quote_single(cx.owner_key())
                ));
                vars.push(num);
                vars.push(den);
            }
            None => vars.push(lua::slot(&slot.name)),
        }
    }
    if vars.is_empty() {
        locals.push("return { vars = {} }".to_owned());
    } else {
        locals.push(format!("return {{ vars = {{ {} }} }}", vars.join(", ")));
    }
    format!(
        "function(self, info_queue, card)\n{}\nend",
        lua::indent(&locals.join("\n"), 1)
    )
}

fn deck_hook(statements: &[String]) -> String {
    format!(
        "function(self, card, from_debuff)\n{}\nend",
        lua::indent(&statements.join("\n"), 1)
    )
}

fn loc_txt(item: &Item, width: usize) -> String {
    let lines: Vec<String> = text::wrap(&item.description, width)
        .iter()
        .map(|l| lua::quote_single(l))
        .collect();
    let mut entries = vec![
        format!("['name'] = {}", lua::quote_single(item.name.trim())),
        format!("['text'] = {}", lua::table(&lines)),
    ];
    if let Some(unlock) = item.unlock_description.as_deref().filter(|u| !u.trim().is_empty()) {
        let unlock: Vec<String> = text::wrap(unlock, width)
            .iter()
            .map(|l| lua::quote_single(l))
            .collect();
        entries.push(format!("['unlock'] = {}", lua::table(&unlock)));
    }
    lua::table(&entries)
}

/// Every game-state offset is read from a slot declared under its
/// label-derived name with the offset as its initial value. The slot must not
/// double as a user variable or a mutation target.
fn check_offset_slots(
    item: &Item,
    slots: &[ConfigSlot],
    user: &[ConfigSlot],
    cx: &ItemContext,
) -> Result<(), ExportError> {
    for required in cx.required_slots() {
        let Some(declared) = slots.iter().find(|s| s.name == required.name) else {
            return Err(ExportError::UndeclaredOffsetSlot {
                item: item.name.clone(),
                slot: required.name.clone(),
            });
        };
        let shared = declared.initial != required.initial
            || user.iter().any(|u| u.name == required.name)
            || cx.written().contains(&required.name);
        if shared {
            return Err(ExportError::ConflictingOffsetSlot {
                item: item.name.clone(),
                slot: required.name.clone(),
                offset: required.initial.to_lua(),
            });
        }
    }
    Ok(())
}

/// Compile one item into its definition block.
///
/// # Errors
///
/// [`ExportError::MissingName`] or [`ExportError::InvalidKey`] for items
/// lacking identity, [`ExportError::UndeclaredOffsetSlot`] if a game-state
/// offset is read from a slot the storage block does not declare, and
/// [`ExportError::ConflictingOffsetSlot`] if that slot is shared with another
/// value.
#[instrument(skip_all, fields(item = %item.name))]
pub fn emit_item(
    item: &Item,
    cell: AtlasCell,
    config: &ExportConfig,
) -> Result<EmittedItem, ExportError> {
    if item.name.trim().is_empty() {
        return Err(ExportError::MissingName {
            item: item.id.clone(),
        });
    }
    let slug = item.slug();
    if slug.is_empty() {
        return Err(ExportError::InvalidKey {
            item: item.name.clone(),
        });
    }
    let key = config.owner_key(&slug);
    let registry = &config.registry;
    let mut cx = ItemContext::new(&key);

    let mut passive = PassiveParts::default();
    for rule in item.rules.iter().filter(|r| r.trigger == Trigger::Passive) {
        let parts = compile_passive_rule(rule, &mut cx, registry);
        passive.add_to_deck.extend(parts.add_to_deck);
        passive.remove_from_deck.extend(parts.remove_from_deck);
        passive.hooks.extend(parts.hooks);
    }
    let calculate = compile_calculate(&item.rules, &mut cx, registry);

    let user = user_slots(item);
    let slots = storage(&user, &cx);
    check_offset_slots(item, &slots, &user, &cx)?;
    let declared: BTreeSet<&str> = slots.iter().map(|s| s.name.as_str()).collect();
    for name in cx.references().iter().filter(|n| !declared.contains(n.as_str())) {
        warn!(variable = %name, "value references an undeclared variable");
    }

    let extra: Vec<String> = slots.iter().map(ConfigSlot::declaration).collect();
    let mut entries = vec![
        format!("key = {}", lua::quote(&slug)),
        format!("config = {}", lua::table(&[format!("extra = {}", lua::table(&extra))])),
        format!("loc_txt = {}", loc_txt(item, config.wrap_width)),
        format!("pos = {}", cell.pos.to_lua()),
    ];
    if let Some(soul) = cell.soul_pos {
        entries.push(format!("soul_pos = {}", soul.to_lua()));
    }
    entries.extend([
        format!("cost = {}", item.cost.unwrap_or_else(|| item.rarity.default_cost())),
        format!("rarity = {}", item.rarity.to_lua()),
        format!("blueprint_compat = {}", item.blueprint_compat),
        format!("eternal_compat = {}", item.eternal_compat),
        format!("perishable_compat = {}", item.perishable_compat),
        format!("unlocked = {}", item.unlocked),
        format!("discovered = {}", item.discovered),
        format!("atlas = {}", lua::quote_single(&config.atlas_key)),
        format!("loc_vars = {}", loc_vars(&slots, &cx)),
    ]);
    if let Some(calculate) = calculate {
        entries.push(format!("calculate = {calculate}"));
    }
    if !passive.add_to_deck.is_empty() {
        entries.push(format!("add_to_deck = {}", deck_hook(&passive.add_to_deck)));
    }
    if !passive.remove_from_deck.is_empty() {
        entries.push(format!(
            "remove_from_deck = {}",
            deck_hook(&passive.remove_from_deck)
        ));
    }
    debug!(key = %key, slots = slots.len(), hooks = passive.hooks.len(), "emitted item");
    Ok(EmittedItem {
        key,
        source: format!("SMODS.Joker {}", lua::table(&entries)),
        slots,
        hooks: passive.hooks,
    })
}
