//! Parsing for the string value encodings the editor embeds in numeric
//! parameters.

mod error;
mod grammar;

pub use error::ParseError;

const GAME_VAR_PREFIX: &str = "GAMEVAR:";
const RANGE_PREFIX: &str = "RANGE:";

/// A decoded parameter encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Encoding {
    /// `GAMEVAR:<id>|<multiplier>|<offset>`: a live read of game state.
    GameVar {
        id: String,
        multiplier: f64,
        offset: f64,
    },
    /// `RANGE:<min>|<max>`: a seeded random integer in `[min, max]`.
    Range { min: f64, max: f64 },
}

/// Whether `raw` claims to be an encoding, whether or not it parses.
#[must_use]
pub fn is_encoded(raw: &str) -> bool {
    let raw = raw.trim_start();
    raw.starts_with(GAME_VAR_PREFIX) || raw.starts_with(RANGE_PREFIX)
}

/// Parse an encoded parameter string.
///
/// # Errors
///
/// Returns [`ParseError`] if the input carries neither prefix, or a
/// `GAMEVAR:` encoding names no state id.
pub fn parse_encoding(input: &str) -> Result<Encoding, ParseError> {
    use winnow::Parser;
    grammar::encoding
        .parse(input.trim())
        .map_err(|e| ParseError::from_winnow(&e))
}
