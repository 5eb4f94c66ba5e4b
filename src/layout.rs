//! Layout helpers: visible widths, canvas sizing, and line padding.
//!
//! Both renderers size their canvas from the content before drawing it.
//! Widths are display columns (`unicode-width`), not bytes or chars.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Columns a tab advances in the static renderer.
pub const CODE_TAB_WIDTH: usize = 4;

/// Extra columns reserved around the line-number digits in the gutter.
const GUTTER_PADDING: usize = 4;

/// Concatenates the text of every span in `line`.
pub fn plain_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|s| s.content.as_ref()).collect()
}

/// Display width of `line` with trailing whitespace ignored.
///
/// Trailing padding a program prints does not count towards the canvas.
pub fn visible_width(line: &Line<'_>) -> usize {
    plain_text(line).trim_end().width()
}

/// Total display width of `line`, trailing whitespace included.
pub fn raw_width(line: &Line<'_>) -> usize {
    line.spans.iter().map(|s| s.content.width()).sum()
}

/// Returns `line` padded with unstyled spaces to exactly `width` columns.
///
/// Visible text is never cut. Trailing whitespace that would overflow the
/// canvas is dropped so every line ends at the same column.
pub fn pad_line(line: &Line<'_>, width: usize) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .map(|s| Span::styled(s.content.to_string(), s.style))
        .collect();

    let mut used = raw_width(line);
    while used > width {
        let Some(last) = spans.last_mut() else { break };
        let content = last.content.to_mut();
        match content.chars().last() {
            Some(c) if c.is_whitespace() => {
                content.pop();
                used -= c.width().unwrap_or(0);
            }
            Some(_) => break,
            None => {
                spans.pop();
            }
        }
    }
    spans.retain(|s| !s.content.is_empty());

    if used < width {
        spans.push(Span::raw(" ".repeat(width - used)));
    }
    Line::from(spans)
}

/// Number of decimal digits needed to print `n`.
pub fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}

/// Gutter allowance for a listing of `line_count` lines.
pub fn gutter_width(line_count: usize) -> usize {
    digit_count(line_count) + GUTTER_PADDING
}

/// Replaces tabs with spaces up to the next multiple of `tab_width`.
pub fn expand_tabs(source: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(source.len());
    for (i, line) in source.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut column = 0;
        for ch in line.chars() {
            if ch == '\t' {
                let fill = tab_width - column % tab_width;
                out.extend(std::iter::repeat_n(' ', fill));
                column += fill;
            } else {
                out.push(ch);
                column += ch.width().unwrap_or(0);
            }
        }
    }
    out
}

/// Canvas width for a source listing: the longest line plus the gutter.
pub fn code_canvas_width(source: &str) -> usize {
    let longest = source.lines().map(UnicodeWidthStr::width).max().unwrap_or(0);
    longest + gutter_width(source.lines().count())
}

/// Builds the right-aligned, dimmed line-number span for line `number`.
///
/// The span is exactly `gutter_width(line_count)` columns wide.
pub fn line_number_span(number: usize, line_count: usize) -> Span<'static> {
    let digits = digit_count(line_count);
    Span::styled(
        format!("{number:>width$}  ", width = digits + GUTTER_PADDING - 2),
        Style::default().add_modifier(Modifier::DIM),
    )
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
