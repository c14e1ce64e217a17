use std::collections::BTreeMap;

/// One readable piece of game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameVariable {
    /// Lua expression reading the current value.
    pub template: String,
    /// Display label. Also names the offset slot, see
    /// [`offset_slot_name`](super::offset_slot_name).
    pub label: String,
}

const BUILTIN: &[(&str, &str, &str)] = &[
    ("hands_remaining", "G.GAME.current_round.hands_left", "Hands Remaining"),
    ("discards_remaining", "G.GAME.current_round.discards_left", "Discards Remaining"),
    ("player_money", "(G.GAME.dollars or 0)", "Player Money"),
    ("ante", "G.GAME.round_resets.ante", "Ante"),
    ("round", "G.GAME.round", "Round"),
    ("joker_count", "#(G.jokers and G.jokers.cards or {})", "Joker Count"),
    ("consumable_count", "#(G.consumeables and G.consumeables.cards or {})", "Consumable Count"),
    ("deck_size", "#(G.playing_cards or {})", "Deck Size"),
    ("cards_in_deck", "#(G.deck and G.deck.cards or {})", "Cards In Deck"),
    ("hand_size", "G.hand.config.card_limit", "Hand Size"),
    ("cards_in_hand", "#(G.hand and G.hand.cards or {})", "Cards In Hand"),
    ("hands_played", "G.GAME.current_round.hands_played", "Hands Played"),
    ("total_hands_played", "G.GAME.hands_played", "Total Hands Played"),
    ("discards_used", "G.GAME.current_round.discards_used", "Discards Used"),
    ("blind_chips", "G.GAME.blind.chips", "Blind Requirement"),
    ("current_chips", "G.GAME.chips", "Current Chips"),
    ("joker_slots", "G.jokers.config.card_limit", "Joker Slots"),
    ("skips", "G.GAME.skips", "Blinds Skipped"),
    ("tarots_used", "(G.GAME.consumeable_usage_total and G.GAME.consumeable_usage_total.tarot or 0)", "Tarots Used"),
    ("planets_used", "(G.GAME.consumeable_usage_total and G.GAME.consumeable_usage_total.planet or 0)", "Planets Used"),
    ("scoring_hand_size", "#(context.scoring_hand or {})", "Scoring Hand Size"),
];

/// Static table of game-state ids the `GAMEVAR:` encoding may reference.
///
/// Defaults to the built-in table; callers can register extra entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameVariableRegistry {
    entries: BTreeMap<String, GameVariable>,
}

impl GameVariableRegistry {
    /// A registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// The built-in game-state table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .fold(Self::empty(), |reg, (id, template, label)| {
                reg.register(id, template, label)
            })
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn register(mut self, id: &str, template: &str, label: &str) -> Self {
        self.entries.insert(
            id.to_owned(),
            GameVariable {
                template: template.to_owned(),
                label: label.to_owned(),
            },
        );
        self
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&GameVariable> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for GameVariableRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
