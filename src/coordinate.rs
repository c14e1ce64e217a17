//! Read/write hazard detection across effects compiled into one return.
//!
//! Every field of a return table is built in one expression, but variable
//! mutations are hoisted ahead of it. An effect reading a variable that a
//! sibling mutates would therefore observe the new value. The coordinator
//! snapshots such variables into locals before any mutation runs.

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::lua;
use crate::types::{Effect, Value};

/// Variable name to the local holding its pre-mutation value.
pub type Bindings = BTreeMap<String, String>;

/// Parameter keys whose string values are selectors, not variable reads.
const STRUCTURAL_KEYS: &[&str] = &["operation", "variable_name"];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coordination {
    /// `local <name>_value = card.ability.extra.<name>` captures, in name order.
    pub hoisted: Vec<String>,
    pub bindings: Bindings,
}

/// Variables targeted by a mutation in `effects`.
#[must_use]
pub fn written(effects: &[Effect]) -> BTreeSet<String> {
    effects
        .iter()
        .filter(|e| e.kind.mutates_variable())
        .filter_map(|e| e.params.str("variable_name"))
        .map(lua::variable_slot)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Every string parameter value across `effects`, minus structural keys.
#[must_use]
pub fn read(effects: &[Effect]) -> BTreeSet<String> {
    effects
        .iter()
        .flat_map(|e| e.params.iter())
        .filter(|(key, _)| !STRUCTURAL_KEYS.contains(key))
        .filter_map(|(_, value)| match value {
            Value::String(s) if value.as_f64().is_none() => Some(lua::variable_slot(s)),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Snapshot every variable both read and written within `effects`.
#[must_use]
pub fn coordinate(effects: &[Effect]) -> Coordination {
    let written = written(effects);
    if written.is_empty() {
        return Coordination::default();
    }
    let mut out = Coordination::default();
    for name in read(effects).intersection(&written) {
        let local = format!("{name}_value");
        trace!(variable = %name, local = %local, "capturing pre-mutation value");
        out.hoisted
            .push(format!("local {local} = {}", lua::slot(name)));
        out.bindings.insert(name.clone(), local);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EffectKind;

    fn bump(var: &str) -> Effect {
        Effect::new("m1", EffectKind::ModifyInternalVariable)
            .with("variable_name", var)
            .with("operation", "increment")
            .with("value", 1_i64)
    }

    #[test]
    fn no_mutation_no_bindings() {
        let effects = vec![Effect::new("e1", EffectKind::AddMult).with("value", "counter")];
        assert_eq!(coordinate(&effects), Coordination::default());
    }

    #[test]
    fn conflict_is_captured() {
        let effects = vec![
            bump("counter"),
            Effect::new("e1", EffectKind::AddMult).with("value", "counter"),
        ];
        let c = coordinate(&effects);
        assert_eq!(c.hoisted, vec!["local counter_value = card.ability.extra.counter"]);
        assert_eq!(c.bindings.get("counter").map(String::as_str), Some("counter_value"));
    }

    #[test]
    fn spellings_of_one_variable_conflict() {
        let effects = vec![
            bump("Stacks"),
            Effect::new("e1", EffectKind::AddMult).with("value", "stacks "),
        ];
        let c = coordinate(&effects);
        assert_eq!(c.hoisted, vec!["local stacks_value = card.ability.extra.stacks"]);
        assert_eq!(c.bindings.get("stacks").map(String::as_str), Some("stacks_value"));
    }

    #[test]
    fn target_name_alone_is_not_a_read() {
        let effects = vec![bump("counter")];
        assert!(coordinate(&effects).bindings.is_empty());
    }

    #[test]
    fn numeric_strings_are_not_reads() {
        let effects = vec![bump("7"), Effect::new("e1", EffectKind::AddMult).with("value", "7")];
        assert!(read(&effects).is_empty());
    }
}
