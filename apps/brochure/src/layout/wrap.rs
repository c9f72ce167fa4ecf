//! Greedy word wrap against measured widths.
//!
//! Words are accumulated onto a candidate line; before a word is added the
//! candidate `line + " " + word` is measured through the metrics provider. If it
//! would exceed the usable width and the line already holds a word, the line is
//! closed and the word starts the next one. Words are never split: a word wider
//! than the usable width sits alone on its own line.

use crate::layout::error::LayoutError;
use crate::layout::font_metrics::{checked_width, FontMetrics, FontWeight};
use crate::layout::model::Line;

/// Wraps `text` at `font_size` into lines no wider than `usable_width`.
///
/// Whitespace runs collapse to single spaces. Empty or whitespace-only input
/// yields no lines.
pub fn wrap(
    text: &str,
    font_size: f32,
    usable_width: f32,
    metrics: &dyn FontMetrics,
) -> Result<Vec<Line>, LayoutError> {
    wrap_styled(text, font_size, FontWeight::Regular, usable_width, metrics)
}

/// [`wrap`] for a specific stroke weight, so bold runs are measured with bold
/// metrics.
pub fn wrap_styled(
    text: &str,
    font_size: f32,
    weight: FontWeight,
    usable_width: f32,
    metrics: &dyn FontMetrics,
) -> Result<Vec<Line>, LayoutError> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{current} {word}");
        let width = checked_width(metrics, &candidate, font_size, weight)?;

        if width > usable_width {
            lines.push(make_line(std::mem::take(&mut current), font_size, weight));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        // Measured even when alone so a failing provider is never masked by
        // single-word input.
        checked_width(metrics, &current, font_size, weight)?;
        lines.push(make_line(current, font_size, weight));
    }

    Ok(lines)
}

fn make_line(text: String, font_size: f32, weight: FontWeight) -> Line {
    Line {
        text,
        font_size,
        weight,
        indent: 0.0,
    }
}
