//! Compiles authored joker rules into Steamodded Lua definitions.
//!
//! An [`Item`] carries [`Rule`]s: a [`Trigger`], condition groups gating it,
//! effects, and random groups. [`ModCompiler`] turns a list of items into one
//! `SMODS.Joker { ... }` block each, plus the shared function overrides that
//! passive behaviours need, synthesized once for the whole mod.
//!
//! ```
//! use jokerc::{
//!     Condition, ConditionGroup, ConditionKind, Effect, EffectKind, ExportConfig, Item,
//!     ModCompiler, Rule, Trigger,
//! };
//!
//! let flusher = Item::new("Flusher").rule(
//!     Rule::new("r1", Trigger::HandPlayed)
//!         .when(ConditionGroup::new(vec![
//!             Condition::new("c1", ConditionKind::HandType).with("hand_type", "Flush"),
//!         ]))
//!         .effect(Effect::new("e1", EffectKind::AddMult).with("value", 8)),
//! );
//! let compiled = ModCompiler::new(ExportConfig::new().prefix("demo"))
//!     .compile(&[flusher])
//!     .unwrap();
//! assert!(compiled.source().contains("mult = card.ability.extra.mult"));
//! ```

pub mod assemble;
mod compile;
pub mod conditions;
mod config;
pub mod context;
pub mod coordinate;
pub mod effects;
pub mod emit;
mod error;
pub mod lua;
pub mod parse;
pub mod passive;
pub mod resolve;
mod types;

pub use compile::{compile_mod, CompiledMod, ModCompiler};
pub use config::ExportConfig;
pub use context::ItemContext;
pub use emit::{emit_item, AtlasAllocator, AtlasCell, AtlasPos, EmittedItem};
pub use error::JokercError;
pub use parse::ParseError;
pub use passive::{HookKind, HookRequest};
pub use resolve::{GameVariable, GameVariableRegistry};
pub use types::card;
pub use types::{
    Combinator, CompareOp, Condition, ConditionGroup, ConditionKind, ConfigSlot, Effect,
    EffectKind, ExportError, Item, Params, RandomGroup, Rarity, Rule, Trigger, UserVariable,
    Value,
};
