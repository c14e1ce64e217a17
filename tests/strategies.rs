use jokerc::conditions::{GuardGroup, GuardTerm};
use jokerc::{Combinator, Effect, EffectKind, RandomGroup};
use proptest::prelude::*;

// --- Guard shapes ---
// Terms are atoms `v0`, `v1`, ... numbered left to right across all groups,
// optionally negated the way compiled conditions are: `not (vN)`.

pub const HAND_TYPES: &[&str] = &[
    "High Card",
    "Pair",
    "Two Pair",
    "Three of a Kind",
    "Straight",
    "Flush",
    "Full House",
    "Four of a Kind",
    "Straight Flush",
];

pub const COMPARE_OPS: &[&str] = &[
    "equals",
    "not_equals",
    "greater_than",
    "greater_equals",
    "less_than",
    "less_equals",
];

pub fn arb_combinator() -> impl Strategy<Value = Combinator> {
    prop_oneof![Just(Combinator::And), Just(Combinator::Or)]
}

/// One generated term: negated?, joiner to the next term.
#[derive(Debug, Clone)]
pub struct GenTerm {
    pub negate: bool,
    pub next: Combinator,
}

#[derive(Debug, Clone)]
pub struct GenGroup {
    pub terms: Vec<GenTerm>,
    pub next: Combinator,
}

fn arb_term() -> impl Strategy<Value = GenTerm> {
    (any::<bool>(), arb_combinator()).prop_map(|(negate, next)| GenTerm { negate, next })
}

fn arb_group() -> impl Strategy<Value = GenGroup> {
    (prop::collection::vec(arb_term(), 1..=4), arb_combinator())
        .prop_map(|(terms, next)| GenGroup { terms, next })
}

/// 1..=4 groups of 1..=4 terms each.
pub fn arb_guard_shape() -> impl Strategy<Value = Vec<GenGroup>> {
    prop::collection::vec(arb_group(), 1..=4)
}

/// Truth values for up to 16 atoms.
pub fn arb_assignment() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 16)
}

/// Compiled-guard input for a shape, with atoms numbered in order.
pub fn guard_groups(shape: &[GenGroup]) -> Vec<GuardGroup> {
    let mut n = 0;
    shape
        .iter()
        .map(|group| GuardGroup {
            terms: group
                .terms
                .iter()
                .map(|term| {
                    let atom = format!("v{n}");
                    n += 1;
                    GuardTerm {
                        expr: if term.negate {
                            format!("not ({atom})")
                        } else {
                            atom
                        },
                        next: term.next,
                    }
                })
                .collect(),
            next: group.next,
        })
        .collect()
}

// --- Effects ---

const SCORING_KINDS: &[EffectKind] = &[
    EffectKind::AddChips,
    EffectKind::AddMult,
    EffectKind::ApplyXMult,
    EffectKind::ApplyXChips,
    EffectKind::AddDollars,
];

/// 1..=8 scoring effects with literal values and distinct ids.
pub fn arb_scoring_effects() -> impl Strategy<Value = Vec<Effect>> {
    prop::collection::vec((prop::sample::select(SCORING_KINDS), 1_i64..=100), 1..=8).prop_map(
        |specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (kind, value))| Effect::new(&format!("e{i}"), kind).with("value", value))
                .collect()
        },
    )
}

/// Random groups with denominators drawn from a small range, so repeats are
/// common.
pub fn arb_random_groups() -> impl Strategy<Value = Vec<RandomGroup>> {
    prop::collection::vec((1_u32..=2, 2_u32..=6), 1..=6).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (num, den))| {
                RandomGroup::new(&format!("g{i}"), num, den)
                    .effect(Effect::new(&format!("ge{i}"), EffectKind::AddMult))
            })
            .collect()
    })
}
