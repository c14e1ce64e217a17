use std::fmt;

use super::rule::Rule;
use super::value::Value;

/// Joker rarity tier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
    /// A rarity registered by another mod, referenced by key.
    Custom(String),
}

impl Rarity {
    /// The `rarity = ...` value in the definition block.
    #[must_use]
    pub fn to_lua(&self) -> String {
        match self {
            Rarity::Common => "1".to_owned(),
            Rarity::Uncommon => "2".to_owned(),
            Rarity::Rare => "3".to_owned(),
            Rarity::Legendary => "4".to_owned(),
            Rarity::Custom(key) => crate::lua::quote(key),
        }
    }

    /// Shop price used when the author leaves cost unset.
    #[must_use]
    pub fn default_cost(&self) -> u32 {
        match self {
            Rarity::Common | Rarity::Custom(_) => 4,
            Rarity::Uncommon => 6,
            Rarity::Rare => 8,
            Rarity::Legendary => 20,
        }
    }
}

/// An author-declared persistent slot.
///
/// User variables are declared under their normalised slot name (see
/// [`crate::lua::variable_slot`]) and win over any derived slot with the same
/// name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserVariable {
    pub id: String,
    pub name: String,
    pub initial: Value,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
}

impl UserVariable {
    #[must_use]
    pub fn new(name: &str, initial: impl Into<Value>) -> Self {
        Self {
            id: name.to_owned(),
            name: name.to_owned(),
            initial: initial.into(),
            description: None,
        }
    }
}

/// The authored entity (a joker) whose rules compile to one definition block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Slug used in the definition key. Derived from `name` when blank.
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cost: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub blueprint_compat: bool,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub eternal_compat: bool,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub perishable_compat: bool,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub unlocked: bool,
    #[cfg_attr(feature = "serde", serde(default = "enabled"))]
    pub discovered: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub unlock_description: Option<String>,
    /// Whether a secondary overlay ("soul") image is drawn over the card.
    #[cfg_attr(feature = "serde", serde(default))]
    pub has_overlay: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rules: Vec<Rule>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub user_variables: Vec<UserVariable>,
}

#[cfg(feature = "serde")]
fn enabled() -> bool {
    true
}

impl Item {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            id: name.to_owned(),
            name: name.to_owned(),
            key: String::new(),
            description: String::new(),
            cost: None,
            rarity: Rarity::Common,
            blueprint_compat: true,
            eternal_compat: true,
            perishable_compat: true,
            unlocked: true,
            discovered: true,
            unlock_description: None,
            has_overlay: false,
            rules: Vec::new(),
            user_variables: Vec::new(),
        }
    }

    #[must_use]
    pub fn key(mut self, key: &str) -> Self {
        self.key = key.to_owned();
        self
    }

    #[must_use]
    pub fn description(mut self, text: &str) -> Self {
        self.description = text.to_owned();
        self
    }

    #[must_use]
    pub fn rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn cost(mut self, cost: u32) -> Self {
        self.cost = Some(cost);
        self
    }

    #[must_use]
    pub fn overlay(mut self) -> Self {
        self.has_overlay = true;
        self
    }

    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn variable(mut self, variable: UserVariable) -> Self {
        self.user_variables.push(variable);
        self
    }

    /// The definition key: the authored slug, or one derived from the name.
    #[must_use]
    pub fn slug(&self) -> String {
        let authored = crate::lua::identifier(&self.key);
        if authored.is_empty() {
            crate::lua::identifier(&self.name)
        } else {
            authored
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({}, {} rules)", self.name, self.rules.len())
    }
}
