//! Static renderer: a script's literal text as a highlighted, numbered listing.
//!
//! Pipeline: read → expand tabs → highlight → prefix line numbers → SVG.
//! Everything after the read is a pure function of the source text.

use std::fs;
use std::path::{Path, PathBuf};

use ratatui::text::{Line, Span};
use tracing::debug;

use crate::error::{RenderError, Result};
use crate::highlight::{DEFAULT_THEME, Highlighter, SCRIPT_LANGUAGE};
use crate::layout;
use crate::svg::{self, Rgb, SvgTheme};

/// Window title of the listing image.
pub const USAGE_TITLE: &str = "Usage.sh";

/// What `render_usage` produced.
#[derive(Debug)]
pub struct UsageSummary {
    pub path: PathBuf,
    pub lines: usize,
    pub columns: usize,
    pub theme: &'static str,
}

/// Highlighted, line-numbered source ready for export.
pub struct Listing {
    pub lines: Vec<Line<'static>>,
    /// Longest source line plus the line-number gutter.
    pub columns: usize,
}

/// Highlights `source` and prefixes every line with its number.
pub fn listing(highlighter: &Highlighter, source: &str) -> Listing {
    let source = layout::expand_tabs(source, layout::CODE_TAB_WIDTH);
    let columns = layout::code_canvas_width(&source);
    let line_count = source.lines().count();

    let lines = highlighter
        .highlight_code(&source, SCRIPT_LANGUAGE, DEFAULT_THEME)
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let mut spans: Vec<Span<'static>> = Vec::with_capacity(line.spans.len() + 1);
            spans.push(layout::line_number_span(i + 1, line_count));
            spans.extend(line.spans);
            Line::from(spans)
        })
        .collect();

    Listing { lines, columns }
}

/// SVG colors for listings: the syntect theme's canvas, or the terminal look
/// if the theme is unavailable.
fn listing_theme(highlighter: &Highlighter) -> SvgTheme {
    highlighter
        .canvas_colors(DEFAULT_THEME)
        .map(|c| SvgTheme::with_canvas(Rgb::from(c.background), Rgb::from(c.foreground)))
        .unwrap_or(SvgTheme::TERMINAL)
}

/// Serializes a listing as a complete SVG document.
pub fn listing_svg(highlighter: &Highlighter, listing: &Listing) -> String {
    svg::export_svg(
        &listing.lines,
        listing.columns,
        USAGE_TITLE,
        &listing_theme(highlighter),
    )
}

/// Reads `script`, renders it, and writes the SVG to `out`.
///
/// The source is read before anything is written, so a missing script
/// leaves `out` untouched.
pub fn render_usage(script: &Path, out: &Path) -> Result<UsageSummary> {
    let source = fs::read_to_string(script).map_err(|source| RenderError::SourceReadFailure {
        path: script.to_path_buf(),
        source,
    })?;
    debug!(script = %script.display(), bytes = source.len(), "read usage script");

    let highlighter = Highlighter::new();
    let listing = listing(&highlighter, &source);
    svg::write_svg(out, &listing_svg(&highlighter, &listing))?;

    Ok(UsageSummary {
        path: out.to_path_buf(),
        lines: listing.lines.len(),
        columns: listing.columns,
        theme: DEFAULT_THEME,
    })
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
