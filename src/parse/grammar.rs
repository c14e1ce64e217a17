use winnow::combinator::{alt, cut_err, opt, preceded};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{rest, take_till};

use super::Encoding;

// -- Fields -----------------------------------------------------------------

/// A numeric field. Anything unparseable yields `None` so the caller can
/// substitute its default.
fn number(input: &mut &str) -> ModalResult<Option<f64>> {
    take_till(0.., '|')
        .map(|s: &str| s.trim().parse::<f64>().ok().filter(|f| f.is_finite()))
        .parse_next(input)
}

fn piped_number(input: &mut &str) -> ModalResult<Option<f64>> {
    preceded('|', number).parse_next(input)
}

fn state_id<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., '|')
        .verify(|s: &str| !s.trim().is_empty())
        .map(str::trim)
        .parse_next(input)
}

// -- Encodings --------------------------------------------------------------

fn game_var(input: &mut &str) -> ModalResult<Encoding> {
    "GAMEVAR:".parse_next(input)?;
    let id = cut_err(state_id)
        .context(StrContext::Expected(StrContextValue::Description(
            "game variable id",
        )))
        .parse_next(input)?;
    let multiplier = opt(piped_number).parse_next(input)?.flatten();
    let offset = opt(piped_number).parse_next(input)?.flatten();
    // Later fields are ignored.
    rest.parse_next(input)?;
    Ok(Encoding::GameVar {
        id: id.to_owned(),
        multiplier: multiplier.unwrap_or(1.0),
        offset: offset.unwrap_or(0.0),
    })
}

fn range(input: &mut &str) -> ModalResult<Encoding> {
    "RANGE:".parse_next(input)?;
    let min = number.parse_next(input)?;
    let max = opt(piped_number).parse_next(input)?.flatten();
    rest.parse_next(input)?;
    Ok(Encoding::Range {
        min: min.unwrap_or(1.0),
        max: max.unwrap_or(5.0),
    })
}

pub fn encoding(input: &mut &str) -> ModalResult<Encoding> {
    alt((game_var, range))
        .context(StrContext::Expected(StrContextValue::Description(
            "GAMEVAR: or RANGE: encoding",
        )))
        .parse_next(input)
}
