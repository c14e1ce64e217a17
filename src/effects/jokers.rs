//! Spawning, copying and destroying jokers.

use super::{colour, event, EffectCx, EffectOutput};
use crate::lua;
use crate::types::card::prefixed;
use crate::types::Effect;

fn rarity_field(raw: &str) -> Option<String> {
    match raw.to_ascii_lowercase().as_str() {
        "random" | "any" => None,
        "common" => Some("rarity = 'Common'".to_owned()),
        "uncommon" => Some("rarity = 'Uncommon'".to_owned()),
        "rare" => Some("rarity = 'Rare'".to_owned()),
        "legendary" => Some("legendary = true".to_owned()),
        other => Some(format!("rarity = {}", lua::quote_single(other))),
    }
}

/// `:set_edition(...)` call for the edition named by `effect.params[key]`.
pub(super) fn edition_call(var: &str, effect: &Effect, key: &str) -> Option<String> {
    match effect.params.str(key)? {
        "none" => None,
        "random" => Some(format!(
            "{var}:set_edition(poll_edition('edition_{}', nil, true, true), true)",
            lua::identifier(&effect.id)
        )),
        key => Some(format!(
            "{var}:set_edition({}, true)",
            lua::quote(&prefixed("e_", &key.to_ascii_lowercase()))
        )),
    }
}

/// Spawns a joker if there is room. The slot check runs in hoisted code so
/// the status message only shows when a joker was actually created.
pub(super) fn create_joker(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let created = cx.local("created_joker");
    let mut spec = vec!["set = 'Joker'".to_owned()];
    match effect.params.str_or("joker_key", "random") {
        "random" => spec.extend(rarity_field(effect.params.str_or("rarity", "random"))),
        key => spec.push(format!("key = {}", lua::quote_single(&prefixed("j_", key)))),
    }
    let mut spawn = vec![format!("local joker_card = SMODS.add_card({{ {} }})", spec.join(", "))];
    if let Some(call) = edition_call("joker_card", effect, "edition") {
        spawn.push(format!("if joker_card then\n    {call}\nend"));
    }
    spawn.push("G.GAME.joker_buffer = 0".to_owned());
    let hoisted = format!(
        "local {created} = false\nif #G.jokers.cards + G.GAME.joker_buffer < G.jokers.config.card_limit then\n    {created} = true\n    G.GAME.joker_buffer = G.GAME.joker_buffer + 1\n{}\nend",
        lua::indent(&event(&spawn.join("\n")), 1)
    );
    EffectOutput::message_only(format!("{created} and localize('k_plus_joker') or nil"))
        .colour(colour::BLUE)
        .hoist(hoisted)
}

/// Hoisted code binding a local to the joker to act on: `"random"` among the
/// others, `"left"`/`"right"` of this joker, or the first owned joker with a
/// key. Returns the local's name and the code.
fn pick_joker(
    effect: &Effect,
    cx: &mut EffectCx<'_>,
    stem: &str,
    allow_eternal: bool,
) -> (String, String) {
    let target = cx.local(stem);
    let eternal = if allow_eternal {
        ""
    } else {
        " and not other_joker.ability.eternal"
    };
    let code = match effect.params.str_or("selection_method", "random") {
        side @ ("left" | "right") => {
            let offset = if side == "left" { "- 1" } else { "+ 1" };
            format!(
                "local {target} = nil\nfor i, other_joker in ipairs(G.jokers.cards) do\n    if other_joker == card then\n        {target} = G.jokers.cards[i {offset}]\n    end\nend"
            )
        }
        "specific" => {
            let key = prefixed("j_", effect.params.str_or("joker_key", "j_joker"));
            format!("local {target} = SMODS.find_card({})[1]", lua::quote(&key))
        }
        _ => {
            let pool = cx.local("joker_pool");
            let seed = cx.seed(stem, effect);
            format!(
                "local {pool} = {{}}\nfor _, other_joker in ipairs(G.jokers.cards) do\n    if other_joker ~= card{eternal} and not other_joker.getting_sliced then\n        {pool}[#{pool} + 1] = other_joker\n    end\nend\nlocal {target} = #{pool} > 0 and pseudorandom_element({pool}, pseudoseed({seed})) or nil"
            )
        }
    };
    (target, code)
}

pub(super) fn destroy_joker(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let (target, pick) = pick_joker(effect, cx, "destroy_target", false);
    let destroy = format!(
        "if {target} and not {target}.ability.eternal then\n    {target}.getting_sliced = true\n{}\nend",
        lua::indent(
            &event(&format!("{target}:start_dissolve({{ G.C.RED }}, nil, 1.6)")),
            1
        )
    );
    EffectOutput::message_only(format!("{target} and \"Destroyed!\" or nil"))
        .colour(colour::RED)
        .hoist(pick)
        .hoist(destroy)
}

pub(super) fn copy_joker(effect: &Effect, cx: &mut EffectCx<'_>) -> EffectOutput {
    let (target, pick) = pick_joker(effect, cx, "copy_target", true);
    let mut copy = vec![
        format!(
            "local copied_joker = copy_card({target}, nil, nil, nil, {target}.edition and {target}.edition.negative)"
        ),
    ];
    copy.extend(edition_call("copied_joker", effect, "edition"));
    copy.extend([
        "copied_joker:add_to_deck()".to_owned(),
        "G.jokers:emplace(copied_joker)".to_owned(),
        "G.GAME.joker_buffer = 0".to_owned(),
    ]);
    let spawn = format!(
        "if {target} and #G.jokers.cards + G.GAME.joker_buffer < G.jokers.config.card_limit then\n    G.GAME.joker_buffer = G.GAME.joker_buffer + 1\n{}\nelse\n    {target} = nil\nend",
        lua::indent(&event(&copy.join("\n")), 1)
    );
    EffectOutput::message_only(format!("{target} and localize('k_duplicated_ex') or nil"))
        .colour(colour::BLUE)
        .hoist(pick)
        .hoist(spawn)
}

pub(super) fn destroy_self() -> EffectOutput {
    EffectOutput::closure(
        "card.getting_sliced = true\nG.E_MANAGER:add_event(Event({\n    func = function()\n        card:start_dissolve({ G.C.RED }, nil, 1.6)\n        return true\n    end\n}))",
    )
    .message("\"Destroyed!\"")
    .colour(colour::RED)
}
