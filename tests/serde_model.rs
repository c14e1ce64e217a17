#![cfg(feature = "serde")]

use jokerc::{compile_mod, ConditionKind, EffectKind, ExportConfig, Item, Rarity, Trigger, Value};

const PROJECT: &str = r#"{
    "id": "joker_1",
    "name": "Flush Fan",
    "description": "{C:mult}+8{} Mult if played hand is a {C:attention}Flush",
    "rarity": "uncommon",
    "rules": [
        {
            "id": "rule_1",
            "trigger": "hand_played",
            "condition_groups": [
                {
                    "conditions": [
                        {
                            "id": "cond_1",
                            "type": "hand_type",
                            "params": { "hand_type": "Flush", "scope": "scoring" }
                        }
                    ]
                }
            ],
            "effects": [
                { "id": "eff_1", "type": "add_mult", "params": { "value": 8 } },
                { "id": "eff_2", "type": "summon_dragon" }
            ]
        }
    ]
}"#;

#[test]
fn editor_json_deserializes() {
    let item: Item = serde_json::from_str(PROJECT).unwrap();
    assert_eq!(item.rarity, Rarity::Uncommon);
    assert!(item.blueprint_compat);
    let rule = &item.rules[0];
    assert_eq!(rule.trigger, Trigger::HandPlayed);
    assert_eq!(rule.condition_groups[0].conditions[0].kind, ConditionKind::HandType);
    assert_eq!(rule.effects[0].params.get("value"), Some(&Value::Int(8)));
    assert_eq!(rule.effects[1].kind, EffectKind::Unknown);
}

#[test]
fn deserialized_item_compiles() {
    let item: Item = serde_json::from_str(PROJECT).unwrap();
    let compiled = compile_mod(&[item], &ExportConfig::new().prefix("fans")).unwrap();
    let source = compiled.source();
    assert!(source.contains("key = \"flush_fan\""));
    assert!(source.contains("cost = 6,"));
    assert!(source.contains("if context.scoring_name == \"Flush\" then"));
    assert!(!source.contains("summon_dragon"));
}

#[test]
fn model_round_trips_through_json() {
    let item: Item = serde_json::from_str(PROJECT).unwrap();
    let json = serde_json::to_string(&item).unwrap();
    let back: Item = serde_json::from_str(&json).unwrap();
    assert_eq!(back, item);
}

#[test]
fn zero_denominator_from_json_reads_as_one() {
    let json = r#"{
        "id": "joker_2",
        "name": "Payout",
        "description": "Sometimes pays",
        "rarity": "common",
        "rules": [
            {
                "id": "rule_1",
                "trigger": "hand_played",
                "random_groups": [
                    {
                        "id": "g1",
                        "numerator": 1,
                        "denominator": 0,
                        "effects": [
                            { "id": "eff_1", "type": "add_dollars", "params": { "value": 3 } }
                        ]
                    }
                ]
            }
        ]
    }"#;
    let item: Item = serde_json::from_str(json).unwrap();
    assert_eq!(item.rules[0].random_groups[0].denominator, 0);
    let compiled = compile_mod(&[item], &ExportConfig::new().prefix("fans")).unwrap();
    let emitted = &compiled.items[0];
    let odds = emitted.slots.iter().find(|s| s.name == "odds").unwrap();
    assert_eq!(odds.initial, Value::Int(1));
    assert!(emitted.source.contains("odds = 1"));
    assert!(!emitted.source.contains("odds = 0"));
    assert!(emitted.source.contains(
        "SMODS.pseudorandom_probability(card, 'group_g1', 1, card.ability.extra.odds, 'j_fans_payout')"
    ));
}
