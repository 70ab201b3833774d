use crate::foundation::config::{LINE_GAP_PX, WRAP_SAFETY_MARGIN_PX};

/// Greedy word-wrap of `text` into lines no wider than `max_width_px - WRAP_SAFETY_MARGIN_PX`.
///
/// Words are split on whitespace and rejoined with single spaces. A word that is wider than the
/// limit on its own still gets its own line; words are never broken. Empty or whitespace-only
/// input yields no lines.
pub fn wrap_text(
    text: &str,
    max_width_px: f32,
    mut measure: impl FnMut(&str) -> f32,
) -> Vec<String> {
    let limit = max_width_px - WRAP_SAFETY_MARGIN_PX;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure(&candidate) <= limit {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Vertical advance between consecutive lines of `size_px` text.
pub fn line_advance(size_px: f32) -> f32 {
    size_px + LINE_GAP_PX
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
