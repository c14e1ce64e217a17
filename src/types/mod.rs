pub mod card;
mod condition;
mod effect;
mod error;
mod item;
mod rule;
mod slot;
mod trigger;
mod value;

pub use condition::{Combinator, CompareOp, Condition, ConditionGroup, ConditionKind};
pub use effect::{Effect, EffectKind};
pub use error::ExportError;
pub use item::{Item, Rarity, UserVariable};
pub use rule::{RandomGroup, Rule};
pub use slot::ConfigSlot;
pub use trigger::Trigger;
pub use value::{Params, Value};
