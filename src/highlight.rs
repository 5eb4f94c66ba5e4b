//! Syntax highlighting bridge: wraps syntect behind a single `Highlighter` type.
//!
//! This is a **leaf module**: it never imports from other scriptshot
//! modules. Callers get `Vec<Line<'static>>` plus the theme's canvas
//! colors, so `syntect` types never leak into layout or SVG export.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{Scope, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Grammar used for usage scripts.
pub const SCRIPT_LANGUAGE: &str = "bash";

/// Built-in syntect theme used for every listing.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Foreground and background of a theme's editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasColors {
    pub foreground: (u8, u8, u8),
    pub background: (u8, u8, u8),
}

/// Wraps syntect's syntax and theme sets, loaded once per run.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a new `Highlighter` with default syntax and theme sets.
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Looks up `theme_name`, falling back to [`DEFAULT_THEME`].
    fn theme(&self, theme_name: &str) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(theme_name)
            .or_else(|| self.theme_set.themes.get(DEFAULT_THEME))
    }

    /// Canvas colors of `theme_name`, or `None` if no theme is available.
    pub fn canvas_colors(&self, theme_name: &str) -> Option<CanvasColors> {
        let settings = &self.theme(theme_name)?.settings;
        let fg = settings
            .foreground
            .unwrap_or(syntect::highlighting::Color::WHITE);
        let bg = settings
            .background
            .unwrap_or(syntect::highlighting::Color::BLACK);
        Some(CanvasColors {
            foreground: (fg.r, fg.g, fg.b),
            background: (bg.r, bg.g, bg.b),
        })
    }

    /// Highlights source text, returning one `Line<'static>` per source line.
    ///
    /// - `language` is matched via `find_syntax_by_token` (e.g. "bash", "sh").
    ///   Falls back to plain text if the language is unknown or empty.
    /// - Spans carry foreground color and font style only; the background
    ///   belongs to the canvas.
    /// - Trailing `\n` / `\r\n` are stripped from each span.
    pub fn highlight_code(
        &self,
        code: &str,
        language: &str,
        theme_name: &str,
    ) -> Vec<Line<'static>> {
        // Oniguruma can exhaust memory on huge inputs; render those unstyled.
        const MAX_HIGHLIGHT_BYTES: usize = 512 * 1024;
        if code.len() > MAX_HIGHLIGHT_BYTES {
            return plain_lines(code);
        }

        let syntax = if language.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(language)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let Some(theme) = self.theme(theme_name) else {
            // syntect built without default themes.
            return plain_lines(code);
        };

        let comment_color = resolve_comment_color(theme);
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut result = Vec::new();

        for line in LinesWithEndings::from(code) {
            let Ok(ranges) = highlighter.highlight_line(line, &self.syntax_set) else {
                result.push(Line::from(Span::raw(
                    line.trim_end_matches(['\r', '\n']).to_string(),
                )));
                continue;
            };

            let spans: Vec<Span<'static>> = ranges
                .iter()
                .map(|(style, text)| {
                    let trimmed = text.trim_end_matches(['\r', '\n']);
                    let is_comment = comment_color.is_some_and(|cc| style.foreground == cc);
                    syntect_style_to_span(trimmed, *style, is_comment)
                })
                .filter(|span| !span.content.is_empty())
                .collect();

            result.push(Line::from(spans));
        }

        result
    }
}

fn plain_lines(code: &str) -> Vec<Line<'static>> {
    code.lines()
        .map(|l| Line::from(Span::raw(l.to_string())))
        .collect()
}

/// Resolves the foreground color that the given theme assigns to the `comment` scope.
///
/// Returns `None` if the scope can't be parsed or the theme doesn't assign
/// a distinct color to comments (i.e. it matches the default foreground).
fn resolve_comment_color(theme: &Theme) -> Option<syntect::highlighting::Color> {
    let comment_scope = match Scope::new("comment") {
        Ok(s) => s,
        Err(_) => {
            debug_assert!(false, "failed to parse hardcoded 'comment' scope");
            return None;
        }
    };
    let highlighter = syntect::highlighting::Highlighter::new(theme);
    let style = highlighter.style_for_stack(&[comment_scope]);
    let default_fg = theme
        .settings
        .foreground
        .unwrap_or(syntect::highlighting::Color::BLACK);
    if style.foreground == default_fg {
        None
    } else {
        Some(style.foreground)
    }
}

/// Converts a syntect highlighted segment into a ratatui `Span`.
///
/// Maps syntect RGB colors → `Color::Rgb` and `FontStyle` flags →
/// `Modifier` flags. Comments are forced italic.
fn syntect_style_to_span(text: &str, style: SyntectStyle, is_comment: bool) -> Span<'static> {
    let fg = Color::Rgb(style.foreground.r, style.foreground.g, style.foreground.b);

    let mut modifier = Modifier::empty();
    if style.font_style.contains(FontStyle::BOLD) {
        modifier |= Modifier::BOLD;
    }
    if style.font_style.contains(FontStyle::ITALIC) || is_comment {
        modifier |= Modifier::ITALIC;
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        modifier |= Modifier::UNDERLINED;
    }

    Span::styled(text.to_string(), Style::default().fg(fg).add_modifier(modifier))
}

#[cfg(test)]
#[path = "highlight_tests.rs"]
mod tests;
