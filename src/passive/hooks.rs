//! Shared runtime overrides requested by passive effects.
//!
//! Several passive behaviors can only be expressed by wrapping a function the
//! whole game shares. Every request is collected across the mod first, then
//! each hooked function is overridden exactly once with a branch per owner.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::lua;

/// A shared runtime function a passive effect overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookKind {
    /// `Card:set_cost`, for shop discounts.
    SetCost,
    /// `SMODS.four_fingers`, flushes and straights from four cards.
    FourFingers,
    /// `SMODS.shortcut`, straights with gaps.
    Shortcut,
    /// `SMODS.always_scores`, every played card scores.
    AlwaysScores,
    /// `SMODS.showman`, duplicate cards may appear.
    Showman,
    /// `Card:is_suit`, two suits count as each other.
    IsSuit,
    /// `Card:get_id`, some ranks count as another.
    GetId,
}

impl HookKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            HookKind::SetCost => "Card:set_cost",
            HookKind::FourFingers => "SMODS.four_fingers",
            HookKind::Shortcut => "SMODS.shortcut",
            HookKind::AlwaysScores => "SMODS.always_scores",
            HookKind::Showman => "SMODS.showman",
            HookKind::IsSuit => "Card:is_suit",
            HookKind::GetId => "Card:get_id",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One item's request to take part in a shared override. `params` holds Lua
/// fragments prepared by the passive compiler; slot reads in them see the
/// owning card as `card`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookRequest {
    pub kind: HookKind,
    pub owner_key: String,
    pub params: BTreeMap<String, String>,
}

impl HookRequest {
    #[must_use]
    pub fn new(kind: HookKind, owner_key: &str) -> Self {
        Self {
            kind,
            owner_key: owner_key.to_owned(),
            params: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn param(mut self, key: &str, lua: impl Into<String>) -> Self {
        self.params.insert(key.to_owned(), lua.into());
        self
    }

    fn get(&self, key: &str) -> &str {
        self.params.get(key).map_or("nil", String::as_str)
    }

    fn present(&self) -> String {
        format!("next(SMODS.find_card({}))", lua::quote(&self.owner_key))
    }

    fn each_owner(&self, body: &str) -> String {
        format!(
            "for _, card in ipairs(SMODS.find_card({})) do\n{}\nend",
            lua::quote(&self.owner_key),
            lua::indent(body, 1)
        )
    }
}

/// Synthesize one override per hooked function, in a stable order.
#[must_use]
pub fn synthesize(requests: &[HookRequest]) -> Vec<String> {
    let mut by_kind: BTreeMap<HookKind, Vec<&HookRequest>> = BTreeMap::new();
    for request in requests {
        let owners = by_kind.entry(request.kind).or_default();
        if !owners.iter().any(|r| r == &request) {
            owners.push(request);
        }
    }
    by_kind
        .into_iter()
        .map(|(kind, owners)| {
            debug!(hook = %kind, owners = owners.len(), "synthesizing hook override");
            match kind {
                HookKind::SetCost => set_cost(&owners),
                HookKind::FourFingers => flag_override(kind, "4", &owners),
                HookKind::Shortcut | HookKind::AlwaysScores | HookKind::Showman => {
                    flag_override(kind, "true", &owners)
                }
                HookKind::IsSuit => is_suit(&owners),
                HookKind::GetId => get_id(&owners),
            }
        })
        .collect()
}

/// Override returning `value` while any owner is present.
fn flag_override(kind: HookKind, value: &str, owners: &[&HookRequest]) -> String {
    let function = kind.as_str();
    let reference = format!("{}_ref", function.to_ascii_lowercase().replace('.', "_"));
    let present = owners
        .iter()
        .map(|r| r.present())
        .collect::<Vec<_>>()
        .join(" or ");
    format!(
        "local {reference} = {function}\nfunction {function}(...)\n    if {present} then\n        return {value}\n    end\n    return {reference}(...)\nend"
    )
}

fn set_cost(owners: &[&HookRequest]) -> String {
    let branches = owners
        .iter()
        .map(|r| {
            let amount = r.get("amount");
            let adjust = if r.get("mode") == "percentage" {
                format!("self.cost = math.max(0, math.floor(self.cost * (1 - {amount} / 100)))")
            } else {
                format!("self.cost = math.max(0, self.cost - {amount})")
            };
            r.each_owner(&adjust)
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "local card_set_cost_ref = Card.set_cost\nfunction Card:set_cost()\n    card_set_cost_ref(self)\n    if self.area and self.area ~= G.jokers and self.area ~= G.consumeables then\n{}\n        self.sell_cost = math.max(1, math.floor(self.cost / 2)) + (self.ability.extra_value or 0)\n        self.sell_cost_label = self.facing == 'back' and '?' or self.sell_cost\n    end\nend",
        lua::indent(&branches, 2)
    )
}

fn is_suit(owners: &[&HookRequest]) -> String {
    let branches = owners
        .iter()
        .map(|r| {
            let (a, b) = (r.get("suit_1"), r.get("suit_2"));
            format!(
                "if {} then\n    if (suit == {a} and self.base.suit == {b}) or (suit == {b} and self.base.suit == {a}) then\n        return true\n    end\nend",
                r.present()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "local card_is_suit_ref = Card.is_suit\nfunction Card:is_suit(suit, bypass_debuff, flush_calc)\n    local ret = card_is_suit_ref(self, suit, bypass_debuff, flush_calc)\n    if not ret and not SMODS.has_no_suit(self) then\n{}\n    end\n    return ret\nend",
        lua::indent(&branches, 2)
    )
}

fn get_id(owners: &[&HookRequest]) -> String {
    let branches = owners
        .iter()
        .map(|r| {
            format!(
                "if {} and {} then\n    return {}\nend",
                r.present(),
                r.get("matches"),
                r.get("target")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "local card_get_id_ref = Card.get_id\nfunction Card:get_id()\n    local id = card_get_id_ref(self)\n    if id and id > 0 then\n{}\n    end\n    return id\nend",
        lua::indent(&branches, 2)
    )
}
