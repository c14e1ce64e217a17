//! Description wrapping.
//!
//! Descriptions carry inline formatting tags such as `{C:mult}` that take no
//! room on the card. `[s]` and newlines force a break.

/// Visible width of `word`, ignoring `{...}` tags.
fn visible_width(word: &str) -> usize {
    let mut width = 0;
    let mut in_tag = false;
    for c in word.chars() {
        match c {
            '{' => in_tag = true,
            '}' if in_tag => in_tag = false,
            _ if !in_tag => width += 1,
            _ => {}
        }
    }
    width
}

/// Greedy word wrap of one paragraph.
fn wrap_paragraph(paragraph: &str, width: usize, lines: &mut Vec<String>) {
    let mut line = String::new();
    let mut line_width = 0;
    for word in paragraph.split_whitespace() {
        let w = visible_width(word);
        if !line.is_empty() && line_width + 1 + w > width {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if !line.is_empty() {
            line.push(' ');
            line_width += 1;
        }
        line.push_str(word);
        line_width += w;
    }
    if !line.is_empty() {
        lines.push(line);
    }
}

/// Split a description into card lines no wider than `width` visible
/// characters, except where a single word is longer.
///
/// A blank paragraph between two others becomes an empty line; blank
/// paragraphs at either end are dropped.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let text = text.replace("[s]", "\n");
    let paragraphs: Vec<&str> = text.split('\n').collect();
    let is_blank = |p: &&str| p.trim().is_empty();
    let (Some(first), Some(last)) = (
        paragraphs.iter().position(|p| !is_blank(p)),
        paragraphs.iter().rposition(|p| !is_blank(p)),
    ) else {
        return Vec::new();
    };
    let mut lines = Vec::new();
    for paragraph in &paragraphs[first..=last] {
        if is_blank(paragraph) {
            lines.push(String::new());
        } else {
            wrap_paragraph(paragraph, width, &mut lines);
        }
    }
    lines
}
