use jokerc::{
    compile_mod, Condition, ConditionGroup, ConditionKind, Effect, EffectKind, ExportConfig,
    ExportError, Item, ModCompiler, Rarity, Rule, Trigger,
};

fn source_of(item: Item) -> String {
    compile_mod(&[item], &ExportConfig::new().prefix("edge"))
        .unwrap()
        .items
        .remove(0)
        .source
}

#[test]
fn item_without_rules() {
    let source = source_of(Item::new("Blank"));
    assert!(source.starts_with("SMODS.Joker {\n    key = \"blank\","));
    assert!(source.contains("extra = {}"));
    assert!(source.contains("return { vars = {} }"));
    assert!(!source.contains("calculate ="));
    assert!(!source.contains("add_to_deck ="));
}

#[test]
fn unknown_condition_leaves_rule_unconditional() {
    let source = source_of(
        Item::new("Loose").rule(
            Rule::new("r1", Trigger::HandPlayed)
                .when(ConditionGroup::new(vec![Condition::new("c1", ConditionKind::Unknown)]))
                .effect(Effect::new("e1", EffectKind::AddChips)),
        ),
    );
    assert!(source.contains(
        "if context.cardarea == G.jokers and context.joker_main then\n            return {"
    ));
}

#[test]
fn unknown_effects_drop_silently() {
    let source = source_of(
        Item::new("Quiet").rule(
            Rule::new("r1", Trigger::HandPlayed)
                .effect(Effect::new("e1", EffectKind::Unknown))
                .effect(Effect::new("e2", EffectKind::AddMult).with("value", 3_i64)),
        ),
    );
    assert!(source.contains("return {\n                mult = card.ability.extra.mult\n            }"));
    assert!(!source.contains("extra = {\n                "));
}

#[test]
fn retrigger_outside_card_triggers_drops() {
    let source = source_of(
        Item::new("Echo").rule(
            Rule::new("r1", Trigger::BlindSelected).effect(Effect::new("e1", EffectKind::Retrigger)),
        ),
    );
    assert!(!source.contains("repetitions"));
    assert!(!source.contains("calculate ="));
}

#[test]
fn passive_rule_ignores_conditions() {
    let source = source_of(
        Item::new("Stubborn").rule(
            Rule::new("r1", Trigger::Passive)
                .when(ConditionGroup::new(vec![Condition::new("c1", ConditionKind::HandType)
                    .with("hand_type", "Pair")]))
                .effect(Effect::new("p1", EffectKind::EditDiscards).with("value", 1_i64)),
        ),
    );
    assert!(source.contains("G.GAME.round_resets.discards = G.GAME.round_resets.discards + card.ability.extra.discards"));
    assert!(source.contains("ease_discard(-card.ability.extra.discards)"));
    assert!(!source.contains("scoring_name"));
}

#[test]
fn undeclared_reference_still_compiles() {
    let source = source_of(
        Item::new("Ghost").rule(
            Rule::new("r1", Trigger::HandPlayed)
                .effect(Effect::new("e1", EffectKind::AddMult).with("value", "phantom")),
        ),
    );
    assert!(source.contains("mult = card.ability.extra.phantom"));
    assert!(source.contains("extra = {}"));
}

#[test]
fn description_wraps_and_breaks() {
    let source = source_of(
        Item::new("Wordy")
            .description("{C:mult}+4{} Mult for every Flush played[s]Resets at end of round"),
    );
    assert!(source.contains(
        "['text'] = {\n            '{C:mult}+4{} Mult for every Flush',\n            'played',\n            'Resets at end of round'\n        }"
    ));
}

#[test]
fn authored_blank_line_survives() {
    let source = source_of(Item::new("Spacer").description("{C:chips}+30{} Chips[s][s]Resets each ante"));
    assert!(source.contains(
        "['text'] = {\n            '{C:chips}+30{} Chips',\n            '',\n            'Resets each ante'\n        }"
    ));
}

#[test]
fn unlock_text_and_custom_rarity() {
    let mut item = Item::new("Secret").rarity(Rarity::Custom("edge_mythic".into())).cost(11);
    item.unlock_description = Some("Win a run".into());
    item.unlocked = false;
    let source = source_of(item);
    assert!(source.contains("['unlock'] = {\n            'Win a run'\n        }"));
    assert!(source.contains("rarity = \"edge_mythic\","));
    assert!(source.contains("cost = 11,"));
    assert!(source.contains("unlocked = false,"));
}

#[test]
fn authored_key_wins_over_name() {
    let compiled = compile_mod(
        &[Item::new("Lucky Cat").key("kitty")],
        &ExportConfig::new().prefix("edge"),
    )
    .unwrap();
    assert_eq!(compiled.items[0].key, "j_edge_kitty");
    assert!(compiled.items[0].source.contains("key = \"kitty\""));
}

#[test]
fn duplicate_hook_requests_collapse() {
    let item = Item::new("Splashy").rule(
        Rule::new("r1", Trigger::Passive)
            .effect(Effect::new("p1", EffectKind::SplashEffect))
            .effect(Effect::new("p2", EffectKind::SplashEffect)),
    );
    let compiled = ModCompiler::new(ExportConfig::new().prefix("edge"))
        .compile(&[item])
        .unwrap();
    assert_eq!(compiled.hooks.len(), 1);
    assert_eq!(
        compiled.hooks[0].matches("SMODS.find_card(\"j_edge_splashy\")").count(),
        1
    );
}

#[test]
fn distinct_hook_kinds_each_get_one_override() {
    let items = [
        Item::new("Wide").rule(
            Rule::new("r1", Trigger::Passive).effect(Effect::new("p1", EffectKind::ReduceFlushStraight)),
        ),
        Item::new("Jump").rule(
            Rule::new("r1", Trigger::Passive).effect(Effect::new("p1", EffectKind::Shortcut)),
        ),
        Item::new("Wider").rule(
            Rule::new("r1", Trigger::Passive).effect(Effect::new("p1", EffectKind::ReduceFlushStraight)),
        ),
    ];
    let compiled = compile_mod(&items, &ExportConfig::new()).unwrap();
    assert_eq!(compiled.hooks.len(), 2);
    let source = compiled.source();
    assert_eq!(source.matches("function SMODS.four_fingers(").count(), 1);
    assert_eq!(source.matches("function SMODS.shortcut(").count(), 1);
}

#[test]
fn errors_name_the_item() {
    let err = compile_mod(&[Item::new("***")], &ExportConfig::new()).unwrap_err();
    assert_eq!(err, ExportError::InvalidKey { item: "***".into() });
    assert_eq!(
        err.to_string(),
        "item '***' has no usable key; use letters or digits in its name or key"
    );
}

#[test]
fn offset_slot_shared_with_another_value_fails() {
    let item = Item::new("Hands").rule(
        Rule::new("r1", Trigger::HandPlayed)
            .effect(Effect::new("e1", EffectKind::AddMult).with("value", "GAMEVAR:hands_remaining|1|2"))
            .effect(Effect::new("e2", EffectKind::AddChips).with("value", "GAMEVAR:hands_remaining|1|7")),
    );
    let err = compile_mod(&[item], &ExportConfig::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "item 'Hands' reads offset 7 from slot 'handsremaining', which also holds another value"
    );

    let item = Item::new("Climber").rule(
        Rule::new("r1", Trigger::RoundEnd)
            .effect(Effect::new("e1", EffectKind::SetAnte).with("value", 1_i64))
            .effect(Effect::new("e2", EffectKind::SetDollars).with("value", "GAMEVAR:ante|1|10")),
    );
    assert_eq!(
        compile_mod(&[item], &ExportConfig::new()).unwrap_err(),
        ExportError::ConflictingOffsetSlot {
            item: "Climber".into(),
            slot: "ante".into(),
            offset: "10".into(),
        }
    );
}

#[test]
fn write_to_disk() {
    let compiled = compile_mod(&[Item::new("Saved")], &ExportConfig::new()).unwrap();
    let path = std::env::temp_dir().join(format!("jokerc_edge_{}.lua", std::process::id()));
    compiled.write_to(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(written, compiled.source());
}
