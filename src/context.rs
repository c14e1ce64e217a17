//! Per-item compilation state.
//!
//! One [`ItemContext`] lives for exactly one item. It hands out unique slot
//! and local names and remembers every slot the item's effects require, so
//! the storage block, `loc_vars` and `calculate` agree with each other.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use tracing::warn;

use crate::types::{ConfigSlot, Value};

/// A probability-divisor slot shared by every random group with the same
/// denominator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OddsSlot {
    pub name: String,
    pub numerator: u32,
    pub denominator: u32,
}

#[derive(Debug, Default)]
pub struct ItemContext {
    owner_key: String,
    value_kinds: HashMap<String, u32>,
    locals: HashMap<String, u32>,
    odds: Vec<OddsSlot>,
    passive_slots: Vec<ConfigSlot>,
    derived_slots: Vec<ConfigSlot>,
    effect_slots: BTreeMap<String, Vec<String>>,
    references: BTreeSet<String>,
    required_slots: Vec<ConfigSlot>,
    written: BTreeSet<String>,
}

impl ItemContext {
    /// `owner_key` is the item's full runtime key, e.g. `j_mymod_lucky_cat`.
    #[must_use]
    pub fn new(owner_key: &str) -> Self {
        Self {
            owner_key: owner_key.to_owned(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn owner_key(&self) -> &str {
        &self.owner_key
    }

    /// Next slot name for a value kind: `kind`, then `kind2`, `kind3`...
    pub fn slot_name(&mut self, kind: &str) -> String {
        suffixed(&mut self.value_kinds, kind)
    }

    /// Next free Lua local name with the given stem.
    pub fn local_name(&mut self, stem: &str) -> String {
        suffixed(&mut self.locals, stem)
    }

    /// The divisor slot for `denominator`, allocating it on first use. A zero
    /// denominator reads as 1.
    pub fn odds_slot(&mut self, numerator: u32, denominator: u32) -> String {
        if denominator == 0 {
            warn!("random group has a zero denominator; using 1");
        }
        let denominator = denominator.max(1);
        if let Some(existing) = self.odds.iter().find(|o| o.denominator == denominator) {
            return existing.name.clone();
        }
        let name = self.slot_name("odds");
        self.derived_slots
            .push(ConfigSlot::new(name.clone(), Value::from(denominator)));
        self.odds.push(OddsSlot {
            name: name.clone(),
            numerator,
            denominator,
        });
        name
    }

    /// Record slots required by a non-passive effect. The first declaration
    /// of a name wins.
    pub fn declare(&mut self, effect_id: &str, slots: Vec<ConfigSlot>) {
        let names = self.effect_slots.entry(effect_id.to_owned()).or_default();
        for slot in slots {
            names.push(slot.name.clone());
            if !self.passive_slots.iter().chain(&self.derived_slots).any(|s| s.name == slot.name) {
                self.derived_slots.push(slot);
            }
        }
    }

    /// Record slots required by a passive effect.
    pub fn declare_passive(&mut self, effect_id: &str, slots: Vec<ConfigSlot>) {
        let names = self.effect_slots.entry(effect_id.to_owned()).or_default();
        for slot in slots {
            names.push(slot.name.clone());
            if !self.passive_slots.iter().any(|s| s.name == slot.name) {
                self.passive_slots.push(slot);
            }
        }
    }

    /// Note that a value reads the named variable without allocating it.
    pub fn note_reference(&mut self, name: &str) {
        self.references.insert(name.to_owned());
    }

    /// Note a game-state offset slot whose declaration, name and initial
    /// value both, the emitter must verify.
    pub fn require_slot(&mut self, slot: ConfigSlot) {
        if !self.required_slots.contains(&slot) {
            self.required_slots.push(slot);
        }
    }

    /// Note a slot some effect assigns to at runtime.
    pub fn note_write(&mut self, name: &str) {
        self.written.insert(name.to_owned());
    }

    #[must_use]
    pub fn passive_slots(&self) -> &[ConfigSlot] {
        &self.passive_slots
    }

    #[must_use]
    pub fn derived_slots(&self) -> &[ConfigSlot] {
        &self.derived_slots
    }

    #[must_use]
    pub fn odds(&self) -> &[OddsSlot] {
        &self.odds
    }

    /// Slot names allocated for one effect, in allocation order.
    #[must_use]
    pub fn slots_for(&self, effect_id: &str) -> &[String] {
        self.effect_slots.get(effect_id).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn references(&self) -> &BTreeSet<String> {
        &self.references
    }

    #[must_use]
    pub fn required_slots(&self) -> &[ConfigSlot] {
        &self.required_slots
    }

    #[must_use]
    pub fn written(&self) -> &BTreeSet<String> {
        &self.written
    }
}

fn suffixed(counters: &mut HashMap<String, u32>, stem: &str) -> String {
    let n = counters.entry(stem.to_owned()).or_insert(0);
    *n += 1;
    if *n == 1 {
        stem.to_owned()
    } else {
        format!("{stem}{n}")
    }
}
