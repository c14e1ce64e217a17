//! Return-statement assembler.
//!
//! The runtime shows one status message per table level, so effects after
//! the first each nest one level deeper under `extra`, in order. Random-group
//! blocks run from the outermost table's `func`.

use crate::effects::{Body, Bundle, EffectOutput};
use crate::lua;

#[derive(Debug, Default)]
struct Level {
    entries: Vec<String>,
    func: Vec<String>,
}

impl Level {
    fn of(output: &EffectOutput) -> Self {
        let mut level = Level::default();
        match &output.body {
            Body::Fields(fields) => level.entries.extend(fields.iter().cloned()),
            Body::Closure(code) => level.func.push(code.clone()),
            Body::MessageOnly => {}
        }
        if let Some(message) = &output.message {
            level.entries.push(format!("message = {message}"));
            level.entries.push(format!("colour = {}", output.colour));
        }
        level
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.func.is_empty()
    }

    fn render(mut self, inner: Option<String>) -> String {
        if !self.func.is_empty() {
            self.entries
                .push(format!("func = {}", lua::closure(&self.func.join("\n"))));
        }
        if let Some(inner) = inner {
            self.entries.push(format!("extra = {inner}"));
        }
        lua::table(&self.entries)
    }
}

/// The right-nested return table for `outputs`, with `random_blocks` run from
/// the outermost `func`. `None` when there is nothing to return.
#[must_use]
pub fn return_table(outputs: &[EffectOutput], random_blocks: &[String]) -> Option<String> {
    let mut levels: Vec<Level> = outputs.iter().map(Level::of).filter(|l| !l.is_empty()).collect();
    if levels.is_empty() {
        if random_blocks.is_empty() {
            return None;
        }
        levels.push(Level::default());
    }
    levels[0].func.extend(random_blocks.iter().cloned());
    let mut inner: Option<String> = None;
    while let Some(level) = levels.pop() {
        inner = Some(level.render(inner));
    }
    inner
}

/// Full body for one rule firing: hoisted code, then either `return {...}`
/// or, when only random groups survive, the random blocks themselves.
#[must_use]
pub fn assemble(bundle: &Bundle, random_blocks: &[String]) -> Option<String> {
    let mut body = bundle.hoisted();
    let has_returns = bundle.outputs.iter().any(|o| !Level::of(o).is_empty());
    if has_returns {
        body.push(format!("return {}", return_table(&bundle.outputs, random_blocks)?));
    } else if random_blocks.is_empty() {
        if body.is_empty() {
            return None;
        }
    } else {
        body.extend(random_blocks.iter().cloned());
    }
    Some(body.join("\n"))
}
