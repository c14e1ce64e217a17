//! Game-variable resolver: turns an authored parameter value into a Lua
//! expression plus the persistent slots that expression reads.
//!
//! Four encodings are recognised:
//!
//! | Authored value            | Expression                                  | New slots            |
//! |---------------------------|---------------------------------------------|----------------------|
//! | `GAMEVAR:id\|m\|o`        | affine read of live game state              | offset slot if o ≠ 0 |
//! | `RANGE:min\|max`          | `pseudorandom(...)` over two slots          | `<hint>_min/_max`    |
//! | number or boolean         | `card.ability.extra.<hint>`                 | `<hint>`             |
//! | any other string          | `card.ability.extra.<name>` (or a binding)  | none                 |

mod registry;

pub use registry::{GameVariable, GameVariableRegistry};

use tracing::warn;

use crate::coordinate::Bindings;
use crate::lua;
use crate::parse::{self, Encoding};
use crate::types::{ConfigSlot, Value};

/// Result of resolving one parameter value.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedValue {
    /// Lua expression producing the value at runtime.
    pub expression: String,
    /// Slots the expression reads that the caller must declare.
    pub new_slots: Vec<ConfigSlot>,
    /// Whether the value is computed on read (game state or random).
    pub is_dynamic: bool,
    /// The variable named by a plain string reference.
    pub reference: Option<String>,
    /// The game-state offset slot the expression reads, with the offset it
    /// must hold.
    pub offset_slot: Option<ConfigSlot>,
}

impl ResolvedValue {
    fn constant(expression: String) -> Self {
        Self {
            expression,
            new_slots: Vec::new(),
            is_dynamic: false,
            reference: None,
            offset_slot: None,
        }
    }
}

/// Name of the slot holding a game-state offset, derived from the state's
/// display label: lower-cased with all whitespace removed.
///
/// `"Hands Remaining"` becomes `"handsremaining"`. Every emitter that resolves
/// a `GAMEVAR:` value with a non-zero offset declares exactly this slot.
#[must_use]
pub fn offset_slot_name(label: &str) -> String {
    label
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Combine a state template with multiplier and offset.
///
/// The offset is read from `offset_expr` so the caller decides whether it
/// lives in a slot or is inlined.
#[must_use]
pub fn value_expression(template: &str, multiplier: f64, offset: f64, offset_expr: &str) -> String {
    let unit = multiplier == 1.0;
    let zero = offset == 0.0;
    match (unit, zero) {
        (true, true) => template.to_owned(),
        (false, true) => format!("({template}) * {}", lua::number(multiplier)),
        (true, false) => format!("{offset_expr} + ({template})"),
        (false, false) => format!(
            "{offset_expr} + ({template}) * {}",
            lua::number(multiplier)
        ),
    }
}

/// Resolve an effect parameter.
///
/// `hint` names the slot a literal is stored in (and prefixes range slots).
/// String references found in `bindings` resolve to the bound local instead
/// of the live slot.
#[must_use]
pub fn resolve_effect_value(
    value: &Value,
    effect_id: &str,
    hint: &str,
    registry: &GameVariableRegistry,
    bindings: &Bindings,
) -> ResolvedValue {
    match value {
        Value::String(raw) if parse::is_encoded(raw) => match parse::parse_encoding(raw) {
            Ok(Encoding::GameVar {
                id,
                multiplier,
                offset,
            }) => resolve_game_var(&id, multiplier, offset, registry),
            Ok(Encoding::Range { min, max }) => resolve_range(min, max, effect_id, hint),
            Err(err) => {
                warn!(value = %raw, error = %err, "malformed value encoding; using 0");
                ResolvedValue::constant("0".to_owned())
            }
        },
        Value::String(raw) if value.as_f64().is_none() => {
            let name = lua::variable_slot(raw);
            if name.is_empty() {
                warn!(value = %raw, "reference names no variable; using 0");
                return ResolvedValue::constant("0".to_owned());
            }
            let expression = match bindings.get(&name) {
                Some(local) => local.clone(),
                None => lua::slot(&name),
            };
            ResolvedValue {
                expression,
                new_slots: Vec::new(),
                is_dynamic: false,
                reference: Some(name),
                offset_slot: None,
            }
        }
        literal => {
            let initial = match literal {
                Value::String(_) => literal.as_f64().map_or(Value::Int(0), number_value),
                other => other.clone(),
            };
            ResolvedValue {
                expression: lua::slot(hint),
                new_slots: vec![ConfigSlot::new(hint, initial)],
                is_dynamic: false,
                reference: None,
                offset_slot: None,
            }
        }
    }
}

fn resolve_game_var(
    id: &str,
    multiplier: f64,
    offset: f64,
    registry: &GameVariableRegistry,
) -> ResolvedValue {
    let Some(var) = registry.get(id) else {
        warn!(id, "unknown game variable; using 0");
        return ResolvedValue::constant("0".to_owned());
    };
    let slot_name = offset_slot_name(&var.label);
    let expression = value_expression(&var.template, multiplier, offset, &lua::slot(&slot_name));
    let (new_slots, offset_slot) = if offset == 0.0 {
        (Vec::new(), None)
    } else {
        let slot = ConfigSlot::new(slot_name, number_value(offset));
        (vec![slot.clone()], Some(slot))
    };
    ResolvedValue {
        expression,
        new_slots,
        is_dynamic: true,
        reference: None,
        offset_slot,
    }
}

fn resolve_range(min: f64, max: f64, effect_id: &str, hint: &str) -> ResolvedValue {
    let min_slot = format!("{hint}_min");
    let max_slot = format!("{hint}_max");
    let seed = lua::quote_single(&format!("{hint}_{effect_id}"));
    ResolvedValue {
        expression: format!(
            "pseudorandom({seed}, {}, {})",
            lua::slot(&min_slot),
            lua::slot(&max_slot)
        ),
        new_slots: vec![
            ConfigSlot::new(min_slot, number_value(min)),
            ConfigSlot::new(max_slot, number_value(max)),
        ],
        is_dynamic: true,
        reference: None,
        offset_slot: None,
    }
}

/// Resolve a condition operand. Conditions never allocate slots: offsets are
/// inlined and string references read the named slot directly.
#[must_use]
pub fn resolve_condition_value(value: &Value, registry: &GameVariableRegistry) -> String {
    match value {
        Value::String(raw) if parse::is_encoded(raw) => match parse::parse_encoding(raw) {
            Ok(Encoding::GameVar {
                id,
                multiplier,
                offset,
            }) => match registry.get(&id) {
                Some(var) => {
                    value_expression(&var.template, multiplier, offset, &lua::number(offset))
                }
                None => {
                    warn!(id = %id, "unknown game variable in condition; using 0");
                    "0".to_owned()
                }
            },
            Ok(Encoding::Range { min, max }) => format!(
                "pseudorandom('condition', {}, {})",
                lua::number(min),
                lua::number(max)
            ),
            Err(err) => {
                warn!(value = %raw, error = %err, "malformed value encoding; using 0");
                "0".to_owned()
            }
        },
        Value::String(raw) => match value.as_f64() {
            Some(n) => lua::number(n),
            None => {
                let name = lua::variable_slot(raw);
                if name.is_empty() {
                    warn!(value = %raw, "reference names no variable; using 0");
                    "0".to_owned()
                } else {
                    lua::slot(&name)
                }
            }
        },
        Value::Int(n) => n.to_string(),
        Value::Float(n) => lua::number(*n),
        Value::Bool(b) => b.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_value(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Value::Int(n as i64)
    } else {
        Value::Float(n)
    }
}
