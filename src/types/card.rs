//! Playing-card vocabulary shared by condition and effect generators.

/// A standard rank, stored as the runtime's numeric card id (2..=14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank(u8);

impl Rank {
    /// Parse any of the editor's spellings: `"A"`, `"Ace"`, `"14"`, `"T"`, `"10"`...
    #[must_use]
    pub fn parse(raw: &str) -> Option<Rank> {
        let raw = raw.trim();
        let id = match raw.to_ascii_lowercase().as_str() {
            "a" | "ace" | "14" | "1" => 14,
            "k" | "king" | "13" => 13,
            "q" | "queen" | "12" => 12,
            "j" | "jack" | "11" => 11,
            "t" | "ten" | "10" => 10,
            other => match other.parse::<u8>() {
                Ok(n @ 2..=9) => n,
                _ => return None,
            },
        };
        Some(Rank(id))
    }

    #[must_use]
    pub fn id(self) -> u8 {
        self.0
    }

    /// Rank key accepted by `SMODS.change_base`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self.0 {
            14 => "Ace",
            13 => "King",
            12 => "Queen",
            11 => "Jack",
            10 => "10",
            9 => "9",
            8 => "8",
            7 => "7",
            6 => "6",
            5 => "5",
            4 => "4",
            3 => "3",
            _ => "2",
        }
    }

    /// Rank letter used in `G.P_CARDS` keys such as `H_A` or `S_T`.
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self.0 {
            14 => "A",
            13 => "K",
            12 => "Q",
            11 => "J",
            10 => "T",
            9 => "9",
            8 => "8",
            7 => "7",
            6 => "6",
            5 => "5",
            4 => "4",
            3 => "3",
            _ => "2",
        }
    }

    pub const LETTERS: [&'static str; 13] =
        ["2", "3", "4", "5", "6", "7", "8", "9", "T", "J", "Q", "K", "A"];
}

/// One of the four standard suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    #[must_use]
    pub fn parse(raw: &str) -> Option<Suit> {
        Some(match raw.trim().to_ascii_lowercase().as_str() {
            "spades" | "spade" | "s" => Suit::Spades,
            "hearts" | "heart" | "h" => Suit::Hearts,
            "clubs" | "club" | "c" => Suit::Clubs,
            "diamonds" | "diamond" | "d" => Suit::Diamonds,
            _ => return None,
        })
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Clubs => "Clubs",
            Suit::Diamonds => "Diamonds",
        }
    }

    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            Suit::Spades => "S",
            Suit::Hearts => "H",
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
        }
    }
}

/// Normalize a key to carry the given set prefix (`j_`, `c_`, `tag_`...).
#[must_use]
pub fn prefixed(prefix: &str, key: &str) -> String {
    let key = key.trim();
    if key.starts_with(prefix) {
        key.to_owned()
    } else {
        format!("{prefix}{key}")
    }
}
