//! Condition compiler: one Lua boolean expression per condition, folded into
//! a single guard.
//!
//! Every binary step of the fold is parenthesized, so the guard evaluates
//! strictly left to right regardless of Lua's `and`/`or` precedence.

mod card;
mod hand;
mod jokers;
mod state;

use tracing::{trace, warn};

use crate::resolve::{resolve_condition_value, GameVariableRegistry};
use crate::types::{
    Combinator, CompareOp, Condition, ConditionGroup, ConditionKind, Params, Trigger, Value,
};

/// What every condition compiler sees besides its own parameters.
#[derive(Debug, Clone, Copy)]
pub struct ConditionCx<'a> {
    pub trigger: Trigger,
    pub registry: &'a GameVariableRegistry,
}

/// One compiled term and how it joins the next term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardTerm {
    pub expr: String,
    pub next: Combinator,
}

/// Compiled terms of one group and how the group joins the next group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardGroup {
    pub terms: Vec<GuardTerm>,
    pub next: Combinator,
}

fn fold<T>(
    items: &[T],
    expr: impl Fn(&T) -> Option<String>,
    next: impl Fn(&T) -> Combinator,
) -> Option<String> {
    let mut acc: Option<(String, Combinator)> = None;
    for item in items {
        let Some(e) = expr(item) else { continue };
        acc = Some(match acc {
            None => (e, next(item)),
            Some((prev, joiner)) => (format!("({prev} {joiner} {e})"), next(item)),
        });
    }
    acc.map(|(e, _)| e)
}

/// Fold compiled groups into one guard: terms left to right within each
/// group, then groups left to right. `None` when nothing survives.
#[must_use]
pub fn fold_guard(groups: &[GuardGroup]) -> Option<String> {
    fold(
        groups,
        |g| fold(&g.terms, |t| Some(t.expr.clone()), |t| t.next),
        |g| g.next,
    )
}

/// Compile one condition, applying its negation. Unsupported kinds and
/// conditions that make no sense under `cx.trigger` yield `None`.
#[must_use]
pub fn compile_condition(condition: &Condition, cx: &ConditionCx<'_>) -> Option<String> {
    let p = &condition.params;
    let expr = match condition.kind {
        ConditionKind::HandType => hand::hand_type(p, cx),
        ConditionKind::CardCount => hand::card_count(p, cx),
        ConditionKind::SuitCount => hand::suit_count(p, cx),
        ConditionKind::RankCount => hand::rank_count(p, cx),
        ConditionKind::EnhancementCount => hand::enhancement_count(p, cx),
        ConditionKind::SealCount => hand::seal_count(p, cx),
        ConditionKind::PokerHandBeenPlayed => hand::poker_hand_been_played(p, cx),
        ConditionKind::DiscardedCardCount => hand::discarded_card_count(p, cx),
        ConditionKind::GlassCardDestroyed => hand::glass_card_destroyed(cx),
        ConditionKind::CardRank => card::rank(p, cx),
        ConditionKind::CardSuit => card::suit(p, cx),
        ConditionKind::CardEnhancement => card::enhancement(p, cx),
        ConditionKind::CardSeal => card::seal(p, cx),
        ConditionKind::CardEdition => card::edition(p, cx),
        ConditionKind::CardIndex => card::index(p, cx),
        ConditionKind::PlayerMoney => state::player_money(p, cx),
        ConditionKind::RemainingHands => state::remaining_hands(p, cx),
        ConditionKind::RemainingDiscards => state::remaining_discards(p, cx),
        ConditionKind::FirstPlayedHand => Some(state::first_played_hand()),
        ConditionKind::FirstDiscardedHand => Some(state::first_discarded_hand()),
        ConditionKind::HandSize => state::hand_size(p, cx),
        ConditionKind::HandLevel => state::hand_level(p, cx),
        ConditionKind::DeckSize => state::deck_size(p, cx),
        ConditionKind::DeckCount => state::deck_count(p, cx),
        ConditionKind::InternalVariable => state::internal_variable(p, cx),
        ConditionKind::BlindType => state::blind_type(p),
        ConditionKind::BossBlindActive => Some(state::boss_blind_active()),
        ConditionKind::AnteLevel => state::ante_level(p, cx),
        ConditionKind::BlindRequirements => state::blind_requirements(p, cx),
        ConditionKind::SystemDate => state::system_date(p, cx),
        ConditionKind::JokerCount => jokers::joker_count(p, cx),
        ConditionKind::SpecificJoker => jokers::specific_joker(p),
        ConditionKind::JokerPosition => jokers::joker_position(p),
        ConditionKind::ConsumableCount => jokers::consumable_count(p, cx),
        ConditionKind::VoucherRedeemed => jokers::voucher_redeemed(p),
        ConditionKind::Unknown => None,
    };
    let Some(expr) = expr else {
        warn!(
            condition = %condition.id,
            kind = %condition.kind,
            trigger = %cx.trigger,
            "dropping unsupported condition"
        );
        return None;
    };
    trace!(condition = %condition.id, kind = %condition.kind, "compiled condition");
    Some(if condition.negate {
        format!("not ({expr})")
    } else {
        expr
    })
}

/// Compile a rule's condition groups into one guard expression.
///
/// `None` means the rule is unconditional: it fires whenever its trigger does.
#[must_use]
pub fn compile_guard(groups: &[ConditionGroup], cx: &ConditionCx<'_>) -> Option<String> {
    let compiled: Vec<GuardGroup> = groups
        .iter()
        .map(|group| GuardGroup {
            terms: group
                .conditions
                .iter()
                .filter_map(|c| {
                    compile_condition(c, cx).map(|expr| GuardTerm { expr, next: c.next })
                })
                .collect(),
            next: group.next,
        })
        .filter(|g| !g.terms.is_empty())
        .collect();
    fold_guard(&compiled)
}

// -- Shared helpers ---------------------------------------------------------

/// `<lhs> <op> <value>` using the `operator` and `value` parameters.
pub(crate) fn compare(lhs: &str, params: &Params, default: i64, cx: &ConditionCx<'_>) -> String {
    let op = params
        .str("operator")
        .and_then(CompareOp::from_id)
        .unwrap_or_default();
    let rhs = resolve_condition_value(
        params.get("value").unwrap_or(&Value::Int(default)),
        cx.registry,
    );
    format!("{lhs} {op} {rhs}")
}

/// Count the cards in `area` satisfying `predicate` (a Lua expression over
/// `playing_card`), as an immediately invoked function.
pub(crate) fn count_cards(area: &str, predicate: &str) -> String {
    format!(
        "(function() local count = 0 for _, playing_card in ipairs({area}) do if {predicate} then count = count + 1 end end return count end)()"
    )
}

/// Cards the hand-scoped conditions inspect under the current trigger.
///
/// `scope`: `"scoring"` (default), `"all"` for every played card, `"held"`
/// for the cards still in hand.
pub(crate) fn hand_area(params: &Params, trigger: Trigger) -> Option<&'static str> {
    match params.str_or("scope", "scoring") {
        "held" => Some("G.hand.cards"),
        "all" if trigger.has_played_hand() => Some("context.full_hand"),
        _ if trigger.has_played_hand() => Some("context.scoring_hand"),
        _ if trigger.has_discarded_hand() => Some("context.full_hand"),
        _ => None,
    }
}
