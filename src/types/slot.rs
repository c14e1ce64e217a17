use super::item::UserVariable;
use super::value::Value;

/// A persistent per-item storage location, declared under `config.extra`.
///
/// Slot names are unique within one item; the compiler allocates them while
/// compiling that item's effects and they have no existence outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSlot {
    pub name: String,
    pub initial: Value,
    pub description: Option<String>,
}

impl ConfigSlot {
    #[must_use]
    pub fn new(name: impl Into<String>, initial: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            initial: initial.into(),
            description: None,
        }
    }

    /// `name = initial`, as written in the storage declaration.
    #[must_use]
    pub fn declaration(&self) -> String {
        format!("{} = {}", self.name, self.initial.to_lua())
    }
}

impl From<&UserVariable> for ConfigSlot {
    fn from(variable: &UserVariable) -> Self {
        Self {
            name: crate::lua::variable_slot(&variable.name),
            initial: variable.initial.clone(),
            description: variable.description.clone(),
        }
    }
}
