use jokerc::{
    Condition, ConditionGroup, ConditionKind, Effect, EffectKind, ExportConfig, Item, ModCompiler,
    RandomGroup, Rarity, Rule, Trigger, UserVariable,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // A joker that scores on flushes and sometimes pays out
    let flusher = Item::new("Flush Fan")
        .description("{C:mult}+8{} Mult if played hand is a {C:attention}Flush{}[s]{C:green}1 in 4{} chance for {C:money}$3")
        .rule(
            Rule::new("scoring", Trigger::HandPlayed)
                .when(ConditionGroup::new(vec![
                    Condition::new("flush", ConditionKind::HandType).with("hand_type", "Flush"),
                ]))
                .effect(Effect::new("mult", EffectKind::AddMult).with("value", 8_i64))
                .random_group(
                    RandomGroup::new("payout", 1, 4)
                        .effect(Effect::new("cash", EffectKind::AddDollars).with("value", 3_i64)),
                ),
        );

    // A joker that grows every round and widens the hand while held
    let grower = Item::new("Greenhouse")
        .rarity(Rarity::Rare)
        .overlay()
        .description("Gains {X:mult,C:white}X0.25{} Mult at end of round[s]{C:attention}+1{} hand size")
        .variable(UserVariable::new("growth", 1.0))
        .rule(
            Rule::new("grow", Trigger::RoundEnd).effect(
                Effect::new("inc", EffectKind::ModifyInternalVariable)
                    .with("variable_name", "growth")
                    .with("operation", "add")
                    .with("value", 0.25),
            ),
        )
        .rule(
            Rule::new("score", Trigger::HandPlayed)
                .effect(Effect::new("xmult", EffectKind::ApplyXMult).with("value", "growth")),
        )
        .rule(
            Rule::new("wide", Trigger::Passive)
                .effect(Effect::new("hand", EffectKind::EditHandSize).with("value", 1_i64)),
        );

    let compiled = ModCompiler::new(ExportConfig::new().prefix("demo").atlas("DemoJokers"))
        .compile(&[flusher, grower])
        .expect("failed to compile mod");

    println!("{}", compiled.source());
    println!("-- {} atlas cells used", compiled.atlas_cells);
}
