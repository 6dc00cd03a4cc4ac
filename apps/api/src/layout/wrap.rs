//! Greedy word wrap against the static font metrics.
//!
//! Explicit newlines start a new paragraph. A word wider than the line on its own is
//! broken on character boundaries, so no returned line exceeds `max_width_mm`
//! (except a single glyph wider than the line, which cannot be split further).

use crate::layout::font_metrics::{FontMetricTable, MM_PER_PT};

/// Splits `text` into lines no wider than `max_width_mm` at `size_pt`.
///
/// Whitespace runs collapse to one space. An empty or blank input yields no lines.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, metrics, size_pt, max_width_mm, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
    lines: &mut Vec<String>,
) {
    let space_w = metrics.width_mm(" ", size_pt);
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.width_mm(word, size_pt);

        if current.is_empty() {
            if word_w > max_width_mm {
                current_width =
                    push_broken_word(word, metrics, size_pt, max_width_mm, lines, &mut current);
            } else {
                current.push_str(word);
                current_width = word_w;
            }
            continue;
        }

        if current_width + space_w + word_w <= max_width_mm {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        } else {
            // Current line is full: flush it and start the next one with this word.
            lines.push(std::mem::take(&mut current));
            if word_w > max_width_mm {
                current_width =
                    push_broken_word(word, metrics, size_pt, max_width_mm, lines, &mut current);
            } else {
                current.push_str(word);
                current_width = word_w;
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
}

/// Emits full-width chunks of an overlong word into `lines`; the remainder is left in
/// `current`. Returns the remainder's width.
fn push_broken_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
    lines: &mut Vec<String>,
    current: &mut String,
) -> f32 {
    let mut chunk_width = 0.0_f32;
    for c in word.chars() {
        let c_w = metrics.char_width(c) * size_pt * MM_PER_PT;
        if !current.is_empty() && chunk_width + c_w > max_width_mm {
            lines.push(std::mem::take(current));
            chunk_width = 0.0;
        }
        current.push(c);
        chunk_width += c_w;
    }
    chunk_width
}
