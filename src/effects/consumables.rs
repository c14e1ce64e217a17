//! Consumables and tags.

use super::{colour, event, EffectCx, EffectOutput};
use crate::lua;
use crate::types::card::prefixed;
use crate::types::Effect;

/// Card set and status message for a consumable type.
fn consumable_set(raw: &str) -> Option<(&'static str, &'static str)> {
    match raw.to_ascii_lowercase().as_str() {
        "tarot" => Some(("Tarot", "k_plus_tarot")),
        "planet" => Some(("Planet", "k_plus_planet")),
        "spectral" => Some(("Spectral", "k_plus_spectral")),
        _ => None,
    }
}

fn set_colour(set: &str) -> &'static str {
    match set {
        "Planet" => colour::PLANET,
        "Spectral" => colour::SPECTRAL,
        _ => colour::TAROT,
    }
}

/// Adds a consumable if a slot is free. `consumable_type` picks the set
/// (`"random"` draws one of the three); `specific_card` names a card.
pub(super) fn create_consumable(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let created = cx.local("created_consumable");
    let chosen = consumable_set(effect.params.str_or("consumable_type", "random"));
    let (set_expr, message, tint, pick) = match chosen {
        Some((set, message)) => {
            let spec = match effect.params.str("specific_card") {
                Some(key) if key != "random" => format!(
                    "set = '{set}', key = {}",
                    lua::quote_single(&prefixed("c_", &key.to_ascii_lowercase()))
                ),
                _ => format!("set = '{set}'"),
            };
            (spec, format!("localize('{message}')"), set_colour(set), None)
        }
        None => {
            let set = cx.local("consumable_set");
            let seed = cx.seed("consumable_set", effect);
            (
                format!("set = {set}"),
                "\"+1 Consumable\"".to_owned(),
                colour::PURPLE,
                Some(format!(
                    "local {set} = pseudorandom_element({{ 'Tarot', 'Planet', 'Spectral' }}, pseudoseed({seed}))"
                )),
            )
        }
    };
    let spawn = [
        format!("SMODS.add_card({{ {set_expr} }})"),
        "G.GAME.consumeable_buffer = 0".to_owned(),
    ]
    .join("\n");
    let hoisted = format!(
        "local {created} = false\nif #G.consumeables.cards + G.GAME.consumeable_buffer < G.consumeables.config.card_limit then\n    {created} = true\n    G.GAME.consumeable_buffer = G.GAME.consumeable_buffer + 1\n{}\nend",
        lua::indent(&event(&spawn), 1)
    );
    let mut output = EffectOutput::message_only(format!("{created} and {message} or nil")).colour(tint);
    if let Some(pick) = pick {
        output = output.hoist(pick);
    }
    output.hoist(hoisted)
}

/// Hoisted code binding a local to one held consumable, optionally limited
/// to a set. Returns the local's name and the code.
fn pick_consumable(effect: &Effect, cx: &mut EffectCx<'_>, stem: &str) -> (String, String) {
    let pool = cx.local("consumable_pool");
    let target = cx.local(stem);
    let seed = cx.seed(stem, effect);
    let filter = match consumable_set(effect.params.str_or("consumable_type", "random")) {
        Some((set, _)) => format!(" and held.ability.set == '{set}'"),
        None => String::new(),
    };
    let code = format!(
        "local {pool} = {{}}\nfor _, held in ipairs(G.consumeables.cards) do\n    if not held.getting_sliced{filter} then\n        {pool}[#{pool} + 1] = held\n    end\nend\nlocal {target} = #{pool} > 0 and pseudorandom_element({pool}, pseudoseed({seed})) or nil"
    );
    (target, code)
}

pub(super) fn destroy_consumable(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let (target, pick) = pick_consumable(effect, cx, "destroyed_consumable");
    let destroy = format!(
        "if {target} then\n    {target}.getting_sliced = true\n{}\nend",
        lua::indent(
            &event(&format!("{target}:start_dissolve({{ G.C.RED }}, nil, 1.6)")),
            1
        )
    );
    EffectOutput::message_only(format!("{target} and \"Destroyed Consumable!\" or nil"))
        .colour(colour::RED)
        .hoist(pick)
        .hoist(destroy)
}

pub(super) fn copy_consumable(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let (target, pick) = pick_consumable(effect, cx, "copied_consumable");
    let mut copy = vec![format!("local copied_card = copy_card({target})")];
    if effect.params.flag("negative") {
        copy.push("copied_card:set_edition(\"e_negative\", true)".to_owned());
    }
    copy.extend([
        "copied_card:add_to_deck()".to_owned(),
        "G.consumeables:emplace(copied_card)".to_owned(),
        "G.GAME.consumeable_buffer = 0".to_owned(),
    ]);
    let negative = if effect.params.flag("negative") {
        " or true"
    } else {
        ""
    };
    let spawn = format!(
        "if {target} and (#G.consumeables.cards + G.GAME.consumeable_buffer < G.consumeables.config.card_limit{negative}) then\n    G.GAME.consumeable_buffer = G.GAME.consumeable_buffer + 1\n{}\nelse\n    {target} = nil\nend",
        lua::indent(&event(&copy.join("\n")), 1)
    );
    EffectOutput::message_only(format!("{target} and localize('k_duplicated_ex') or nil"))
        .colour(colour::PURPLE)
        .hoist(pick)
        .hoist(spawn)
}

/// Grants a tag: a named one (`tag_type`) or one drawn from the tag pool.
pub(super) fn create_tag(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let (tag, pick) = match effect.params.str_or("tag_type", "random") {
        "random" => {
            let pool = cx.local("tag_pool");
            let chosen = cx.local("random_tag");
            let seed = cx.seed("create_tag", effect);
            (
                chosen.clone(),
                Some(format!(
                    "local {pool} = {{}}\nfor tag_key in pairs(G.P_TAGS) do\n    {pool}[#{pool} + 1] = tag_key\nend\nlocal {chosen} = pseudorandom_element({pool}, pseudoseed({seed}))"
                )),
            )
        }
        key => (lua::quote(&prefixed("tag_", &key.to_ascii_lowercase())), None),
    };
    let grant = event(&format!(
        "add_tag(Tag({tag}))\nplay_sound('generic1', 0.9 + math.random() * 0.1, 0.8)\nplay_sound('holo1', 1.2 + math.random() * 0.1, 0.4)"
    ));
    let mut output = EffectOutput::closure(grant)
        .message("\"Tag!\"")
        .colour(colour::GREEN);
    if let Some(pick) = pick {
        output = output.hoist(pick);
    }
    output
}
