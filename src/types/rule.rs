use super::condition::ConditionGroup;
use super::effect::Effect;
use super::trigger::Trigger;

/// One trigger plus its condition groups, effects and random groups.
///
/// Rules are authored in the editor and consumed read-only by the compiler.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rule {
    pub id: String,
    pub trigger: Trigger,
    #[cfg_attr(feature = "serde", serde(default))]
    pub condition_groups: Vec<ConditionGroup>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub random_groups: Vec<RandomGroup>,
}

impl Rule {
    #[must_use]
    pub fn new(id: &str, trigger: Trigger) -> Self {
        Self {
            id: id.to_owned(),
            trigger,
            condition_groups: Vec::new(),
            effects: Vec::new(),
            random_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn when(mut self, group: ConditionGroup) -> Self {
        self.condition_groups.push(group);
        self
    }

    #[must_use]
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    #[must_use]
    pub fn random_group(mut self, group: RandomGroup) -> Self {
        self.random_groups.push(group);
        self
    }

    /// Whether any condition is present at all.
    #[must_use]
    pub fn has_conditions(&self) -> bool {
        self.condition_groups
            .iter()
            .any(|g| !g.conditions.is_empty())
    }

    /// Whether the main effects or any random group retrigger cards.
    #[must_use]
    pub fn retriggers(&self) -> bool {
        self.effects.iter().any(|e| e.kind.is_retrigger())
            || self
                .random_groups
                .iter()
                .any(|g| g.effects.iter().any(|e| e.kind.is_retrigger()))
    }
}

/// Effects gated together by one `numerator / denominator` chance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomGroup {
    pub id: String,
    pub numerator: u32,
    pub denominator: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl RandomGroup {
    /// A `numerator in denominator` group. A zero denominator is clamped to 1
    /// here and again when the divisor slot is allocated, so groups built
    /// field by field or deserialized get the same treatment.
    #[must_use]
    pub fn new(id: &str, numerator: u32, denominator: u32) -> Self {
        Self {
            id: id.to_owned(),
            numerator,
            denominator: denominator.max(1),
            effects: Vec::new(),
        }
    }

    #[must_use]
    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Whether any member rewrites the runtime probability table.
    #[must_use]
    pub fn mutates_probability(&self) -> bool {
        self.effects.iter().any(|e| e.kind.mutates_probability())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Condition, ConditionKind, EffectKind};

    #[test]
    fn rule_builder_collects_parts() {
        let rule = Rule::new("r1", Trigger::HandPlayed)
            .when(ConditionGroup::new(vec![Condition::new(
                "c1",
                ConditionKind::FirstPlayedHand,
            )]))
            .effect(Effect::new("e1", EffectKind::AddMult))
            .random_group(RandomGroup::new("g1", 1, 4));
        assert!(rule.has_conditions());
        assert_eq!(rule.effects.len(), 1);
        assert_eq!(rule.random_groups.len(), 1);
    }

    #[test]
    fn empty_groups_are_not_conditions() {
        let rule = Rule::new("r1", Trigger::HandPlayed).when(ConditionGroup::default());
        assert!(!rule.has_conditions());
    }

    #[test]
    fn retrigger_detection_covers_random_groups() {
        let rule = Rule::new("r1", Trigger::CardScored).random_group(
            RandomGroup::new("g1", 1, 2).effect(Effect::new("e1", EffectKind::Retrigger)),
        );
        assert!(rule.retriggers());
    }

    #[test]
    fn zero_denominator_clamps() {
        assert_eq!(RandomGroup::new("g", 1, 0).denominator, 1);
    }
}
