use jokerc::{
    compile_mod, Condition, ConditionGroup, ConditionKind, ConfigSlot, Effect, EffectKind,
    ExportConfig, Item, RandomGroup, Rule, Trigger, UserVariable, Value,
};

fn compile_one(item: Item) -> jokerc::EmittedItem {
    compile_mod(&[item], &ExportConfig::new().prefix("test"))
        .unwrap()
        .items
        .remove(0)
}

#[test]
fn flush_adds_mult() {
    let out = compile_one(
        Item::new("Flusher").rule(
            Rule::new("r1", Trigger::HandPlayed)
                .when(ConditionGroup::new(vec![Condition::new(
                    "c1",
                    ConditionKind::HandType,
                )
                .with("hand_type", "Flush")
                .with("scope", "scoring")]))
                .effect(Effect::new("e1", EffectKind::AddMult).with("value", 8_i64)),
        ),
    );
    assert_eq!(out.slots, [ConfigSlot::new("mult", 8_i64)]);
    assert!(out.source.contains("extra = {\n            mult = 8\n        }"));
    assert!(out.source.contains(
        "if context.cardarea == G.jokers and context.joker_main then\n            if context.scoring_name == \"Flush\" then\n                return {\n                    mult = card.ability.extra.mult\n                }\n            end\n        end"
    ));
}

#[test]
fn two_chip_effects_get_suffixed_slots() {
    let out = compile_one(
        Item::new("Double Chips").rule(
            Rule::new("r1", Trigger::HandPlayed)
                .effect(Effect::new("e1", EffectKind::AddChips).with("value", 10_i64))
                .effect(Effect::new("e2", EffectKind::AddChips).with("value", 20_i64)),
        ),
    );
    let names: Vec<_> = out.slots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["chips", "chips2"]);
    assert!(out
        .source
        .contains("return { vars = { card.ability.extra.chips, card.ability.extra.chips2 } }"));
    assert!(out.source.contains("chips = card.ability.extra.chips,\n"));
    assert!(out.source.contains("extra = {\n                    chips = card.ability.extra.chips2\n"));
}

#[test]
fn passive_joker_slots_are_reversible() {
    let out = compile_one(
        Item::new("Roomy").rule(
            Rule::new("r1", Trigger::Passive).effect(
                Effect::new("p1", EffectKind::EditJokerSlots)
                    .with("operation", "add")
                    .with("value", 2_i64),
            ),
        ),
    );
    assert_eq!(out.slots, [ConfigSlot::new("joker_slots", 2_i64)]);
    assert!(out.source.contains(
        "add_to_deck = function(self, card, from_debuff)\n        G.jokers.config.card_limit = G.jokers.config.card_limit + card.ability.extra.joker_slots\n    end"
    ));
    assert!(out.source.contains(
        "remove_from_deck = function(self, card, from_debuff)\n        G.jokers.config.card_limit = G.jokers.config.card_limit - card.ability.extra.joker_slots\n    end"
    ));
    assert!(!out.source.contains("calculate ="));
}

#[test]
fn ranged_dollars_use_seeded_random() {
    let out = compile_one(
        Item::new("Payday").rule(
            Rule::new("r1", Trigger::RoundEnd)
                .effect(Effect::new("e1", EffectKind::AddDollars).with("value", "RANGE:2|6")),
        ),
    );
    assert_eq!(
        out.slots,
        [
            ConfigSlot::new("dollars_min", 2_i64),
            ConfigSlot::new("dollars_max", 6_i64),
        ]
    );
    assert!(out.source.contains(
        "dollars = pseudorandom('dollars_e1', card.ability.extra.dollars_min, card.ability.extra.dollars_max)"
    ));
}

#[test]
fn chance_roll_wraps_group_effects() {
    let out = compile_one(
        Item::new("Lucky").rule(
            Rule::new("r1", Trigger::HandPlayed).random_group(
                RandomGroup::new("g1", 1, 4)
                    .effect(Effect::new("e1", EffectKind::AddMult).with("value", 20_i64)),
            ),
        ),
    );
    assert!(out.source.contains(
        "if SMODS.pseudorandom_probability(card, 'group_g1', 1, card.ability.extra.odds, 'j_test_lucky') then"
    ));
    assert!(out
        .source
        .contains("SMODS.calculate_effect({ mult = card.ability.extra.mult }, card)"));
    let names: Vec<_> = out.slots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["mult", "odds"]);
}

#[test]
fn counter_reads_before_increment() {
    let out = compile_one(
        Item::new("Tally")
            .variable(UserVariable::new("tally", 0_i64))
            .rule(
                Rule::new("r1", Trigger::HandPlayed)
                    .effect(
                        Effect::new("e1", EffectKind::ModifyInternalVariable)
                            .with("variable_name", "tally")
                            .with("operation", "add")
                            .with("value", 1_i64),
                    )
                    .effect(Effect::new("e2", EffectKind::AddMult).with("value", "tally")),
            ),
    );
    let names: Vec<_> = out.slots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["tally", "tally_change"]);
    let snapshot = out.source.find("local tally_value = card.ability.extra.tally").unwrap();
    let mutation = out
        .source
        .find("card.ability.extra.tally = card.ability.extra.tally + card.ability.extra.tally_change")
        .unwrap();
    assert!(snapshot < mutation);
    assert!(out.source.contains("mult = tally_value"));
    assert!(out.source.contains("and not context.blueprint then"));
}

#[test]
fn game_state_values_declare_their_offset() {
    let out = compile_one(
        Item::new("Banker").rule(
            Rule::new("r1", Trigger::HandPlayed).effect(
                Effect::new("e1", EffectKind::AddChips).with("value", "GAMEVAR:player_money|1|5"),
            ),
        ),
    );
    assert_eq!(out.slots, [ConfigSlot::new("playermoney", 5_i64)]);
    assert!(out
        .source
        .contains("chips = card.ability.extra.playermoney + ((G.GAME.dollars or 0))"));
    assert_eq!(out.slots[0].initial, Value::Int(5));
}

#[test]
fn capitalised_variable_is_read_and_written_in_one_slot() {
    let out = compile_one(
        Item::new("Stacker")
            .variable(UserVariable::new("Stacks", 0_i64))
            .rule(
                Rule::new("r1", Trigger::HandPlayed)
                    .when(ConditionGroup::new(vec![Condition::new(
                        "c1",
                        ConditionKind::InternalVariable,
                    )
                    .with("variable_name", "Stacks")
                    .with("operator", "greater_than")
                    .with("value", 2_i64)]))
                    .effect(
                        Effect::new("e1", EffectKind::ModifyInternalVariable)
                            .with("variable_name", "Stacks")
                            .with("operation", "add")
                            .with("value", 1_i64),
                    )
                    .effect(Effect::new("e2", EffectKind::AddMult).with("value", "Stacks")),
            ),
    );
    let names: Vec<_> = out.slots.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["stacks", "stacks_change"]);
    assert!(out.source.contains("if card.ability.extra.stacks > 2 then"));
    assert!(out.source.contains("local stacks_value = card.ability.extra.stacks"));
    assert!(out.source.contains(
        "card.ability.extra.stacks = card.ability.extra.stacks + card.ability.extra.stacks_change"
    ));
    assert!(out.source.contains("mult = stacks_value"));
}
