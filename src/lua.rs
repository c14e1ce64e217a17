//! Text helpers for the emitted Lua dialect.
//!
//! Everything the compiler produces is plain source text; these helpers keep
//! quoting, number formatting and indentation consistent across stages.

/// Indentation unit used throughout the generated source.
pub const INDENT: &str = "    ";

/// Double-quoted Lua string literal.
#[must_use]
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    push_escaped(&mut out, s, '"');
    out.push('"');
    out
}

/// Single-quoted Lua string literal, used for localization text.
#[must_use]
pub fn quote_single(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    push_escaped(&mut out, s, '\'');
    out.push('\'');
    out
}

fn push_escaped(out: &mut String, s: &str, delimiter: char) {
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == delimiter => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
}

/// Lua number literal. Whole floats print without a fractional part.
#[must_use]
pub fn number(v: f64) -> String {
    if v.is_nan() {
        "(0/0)".to_owned()
    } else if v.is_infinite() {
        if v > 0.0 { "math.huge" } else { "-math.huge" }.to_owned()
    } else if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

/// Indent every non-empty line of `text` by `depth` levels.
#[must_use]
pub fn indent(text: &str, depth: usize) -> String {
    let pad = INDENT.repeat(depth);
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line table constructor: `{`, comma-separated entries, `}`.
///
/// Entries may themselves span several lines; they are indented one level.
#[must_use]
pub fn table(entries: &[String]) -> String {
    if entries.is_empty() {
        return "{}".to_owned();
    }
    let body = entries
        .iter()
        .map(|entry| indent(entry, 1))
        .collect::<Vec<_>>()
        .join(",\n");
    format!("{{\n{body}\n}}")
}

/// `function() <body> return true end`, the closure shape event callbacks expect.
#[must_use]
pub fn closure(body: &str) -> String {
    format!("function()\n{}\n{INDENT}return true\nend", indent(body, 1))
}

/// Reads a persistent slot on the owning card.
#[must_use]
pub fn slot(name: &str) -> String {
    format!("card.ability.extra.{name}")
}

/// Storage slot for an authored variable name.
///
/// Declarations, reads, conditions and mutations all name user variables
/// through this, so `"Stacks"` and `"stacks"` address one slot. Empty when
/// the name has no letters or digits.
#[must_use]
pub fn variable_slot(raw: &str) -> String {
    identifier(raw)
}

/// Lower-cased identifier suitable for a slot or local name.
#[must_use]
pub fn identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if (c == '_' || c == '-' || c.is_whitespace()) && !out.ends_with('_') {
            out.push('_');
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{trimmed}")
    } else {
        trimmed.to_owned()
    }
}
