//! SVG export: draws styled lines inside a terminal-window frame.
//!
//! Output is plain string building through `fmt::Display`, so the same
//! lines and theme always produce byte-identical documents.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::error::{RenderError, Result};

const FONT_FAMILY: &str = "'Fira Code', 'DejaVu Sans Mono', Menlo, monospace";
const FONT_SIZE: f64 = 18.0;
const CHAR_WIDTH: f64 = FONT_SIZE * 0.61;
const LINE_HEIGHT: f64 = FONT_SIZE * 1.22;

/// Inset of the window frame from the document edge.
const MARGIN: f64 = 1.0;
/// Horizontal space between the frame and the text grid.
const PADDING_X: f64 = 20.0;
/// Height of the title bar above the text grid.
const TITLE_BAR: f64 = 50.0;
const PADDING_BOTTOM: f64 = 20.0;
/// Keeps the title bar readable for very narrow or empty content.
const MIN_CONTENT_WIDTH: f64 = 160.0;

/// An sRGB color, printed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self(r, g, b)
    }
}

/// Window colors plus the 16-color ANSI palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgTheme {
    pub background: Rgb,
    pub foreground: Rgb,
    /// Standard colors 0–7 followed by bright colors 8–15.
    pub ansi: [Rgb; 16],
}

const ANSI_PALETTE: [Rgb; 16] = [
    Rgb(75, 78, 85),
    Rgb(204, 85, 90),
    Rgb(152, 168, 75),
    Rgb(208, 179, 68),
    Rgb(96, 138, 177),
    Rgb(152, 114, 159),
    Rgb(104, 160, 179),
    Rgb(197, 200, 198),
    Rgb(154, 155, 153),
    Rgb(255, 38, 39),
    Rgb(0, 130, 61),
    Rgb(208, 179, 68),
    Rgb(32, 111, 252),
    Rgb(203, 115, 207),
    Rgb(104, 160, 179),
    Rgb(255, 255, 255),
];

impl SvgTheme {
    /// Dark terminal look used for captured sessions.
    pub const TERMINAL: SvgTheme = SvgTheme {
        background: Rgb(41, 41, 41),
        foreground: Rgb(197, 200, 198),
        ansi: ANSI_PALETTE,
    };

    /// Terminal palette on a custom canvas, e.g. a syntect theme's colors.
    pub fn with_canvas(background: Rgb, foreground: Rgb) -> Self {
        Self {
            background,
            foreground,
            ansi: ANSI_PALETTE,
        }
    }

    /// Resolves a ratatui color; `Reset` means "use the default".
    pub fn resolve(&self, color: Color) -> Option<Rgb> {
        let index = match color {
            Color::Reset => return None,
            Color::Rgb(r, g, b) => return Some(Rgb(r, g, b)),
            Color::Indexed(i) => return Some(self.indexed(i)),
            Color::Black => 0,
            Color::Red => 1,
            Color::Green => 2,
            Color::Yellow => 3,
            Color::Blue => 4,
            Color::Magenta => 5,
            Color::Cyan => 6,
            Color::Gray => 7,
            Color::DarkGray => 8,
            Color::LightRed => 9,
            Color::LightGreen => 10,
            Color::LightYellow => 11,
            Color::LightBlue => 12,
            Color::LightMagenta => 13,
            Color::LightCyan => 14,
            Color::White => 15,
        };
        Some(self.ansi[index])
    }

    /// xterm 256-color table.
    fn indexed(&self, i: u8) -> Rgb {
        match i {
            0..=15 => self.ansi[usize::from(i)],
            16..=231 => {
                let i = i - 16;
                let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
                Rgb(level(i / 36), level((i / 6) % 6), level(i % 6))
            }
            232..=255 => {
                let gray = 8 + (i - 232) * 10;
                Rgb(gray, gray, gray)
            }
        }
    }

    /// Final fill and optional background for a span style.
    fn paint(&self, style: Style) -> (Rgb, Option<Rgb>) {
        let fg = style.fg.and_then(|c| self.resolve(c));
        let bg = style.bg.and_then(|c| self.resolve(c));
        if style.add_modifier.contains(Modifier::REVERSED) {
            (
                bg.unwrap_or(self.background),
                Some(fg.unwrap_or(self.foreground)),
            )
        } else {
            (fg.unwrap_or(self.foreground), bg)
        }
    }
}

/// A document ready to serialize: lines on a fixed-width grid.
pub struct TerminalSvg<'a> {
    lines: &'a [Line<'a>],
    columns: usize,
    title: &'a str,
    theme: &'a SvgTheme,
}

impl<'a> TerminalSvg<'a> {
    pub fn new(lines: &'a [Line<'a>], columns: usize, title: &'a str, theme: &'a SvgTheme) -> Self {
        Self {
            lines,
            columns,
            title,
            theme,
        }
    }

    fn write_line(&self, f: &mut fmt::Formatter<'_>, row: usize, line: &Line<'_>) -> fmt::Result {
        let top = row as f64 * LINE_HEIGHT;
        let baseline = top + FONT_SIZE;

        let mut cells: Vec<(usize, usize, &Span<'_>)> = Vec::with_capacity(line.spans.len());
        let mut column = 0;
        for span in &line.spans {
            let width = span.content.width();
            cells.push((column, width, span));
            column += width;
        }

        for &(column, width, span) in &cells {
            if let (_, Some(bg)) = self.theme.paint(span.style) {
                writeln!(
                    f,
                    r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{bg}"/>"#,
                    Px(column as f64 * CHAR_WIDTH),
                    Px(top),
                    Px(width as f64 * CHAR_WIDTH),
                    Px(LINE_HEIGHT),
                )?;
            }
        }

        let visible: Vec<_> = cells
            .iter()
            .filter(|(_, _, span)| is_drawn(span))
            .collect();
        if visible.is_empty() {
            return Ok(());
        }

        write!(
            f,
            r#"<text class="terminal-text" y="{}" xml:space="preserve">"#,
            Px(baseline)
        )?;
        for &&(column, _, span) in &visible {
            let (fill, _) = self.theme.paint(span.style);
            write!(
                f,
                r#"<tspan x="{}" fill="{fill}"{}>{}</tspan>"#,
                Px(column as f64 * CHAR_WIDTH),
                TextAttrs(span.style.add_modifier),
                Escaped(&span.content),
            )?;
        }
        writeln!(f, "</text>")
    }
}

impl fmt::Display for TerminalSvg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content_width = (self.columns as f64 * CHAR_WIDTH).max(MIN_CONTENT_WIDTH);
        let content_height = self.lines.len() as f64 * LINE_HEIGHT;
        let frame_width = content_width + 2.0 * PADDING_X;
        let frame_height = content_height + TITLE_BAR + PADDING_BOTTOM;
        let width = frame_width + 2.0 * MARGIN;
        let height = frame_height + 2.0 * MARGIN;
        let theme = self.theme;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = Px(width),
            h = Px(height),
        )?;
        writeln!(f, "<style>")?;
        writeln!(
            f,
            ".terminal-text {{ font-family: {FONT_FAMILY}; font-size: {FONT_SIZE}px; white-space: pre; }}"
        )?;
        writeln!(
            f,
            ".terminal-title {{ font-family: arial, sans-serif; font-size: {FONT_SIZE}px; }}"
        )?;
        writeln!(f, "</style>")?;
        writeln!(
            f,
            r#"<rect x="{m}" y="{m}" width="{}" height="{}" rx="8" fill="{}" stroke="rgba(255,255,255,0.35)" stroke-width="1"/>"#,
            Px(frame_width),
            Px(frame_height),
            theme.background,
            m = Px(MARGIN),
        )?;
        writeln!(f, r#"<g transform="translate(26,22)">"#)?;
        writeln!(f, r##"<circle cx="0" cy="0" r="7" fill="#ff5f57"/>"##)?;
        writeln!(f, r##"<circle cx="22" cy="0" r="7" fill="#febc2e"/>"##)?;
        writeln!(f, r##"<circle cx="44" cy="0" r="7" fill="#28c840"/>"##)?;
        writeln!(f, "</g>")?;
        writeln!(
            f,
            r#"<text class="terminal-title" x="{}" y="27" text-anchor="middle" fill="{}" opacity="0.8">{}</text>"#,
            Px(width / 2.0),
            theme.foreground,
            Escaped(self.title),
        )?;
        writeln!(
            f,
            r#"<g transform="translate({},{})">"#,
            Px(MARGIN + PADDING_X),
            Px(MARGIN + TITLE_BAR),
        )?;
        for (row, line) in self.lines.iter().enumerate() {
            self.write_line(f, row, line)?;
        }
        writeln!(f, "</g>")?;
        writeln!(f, "</svg>")
    }
}

/// Serializes `lines` as a terminal-window SVG `columns` cells wide.
pub fn export_svg(lines: &[Line<'_>], columns: usize, title: &str, theme: &SvgTheme) -> String {
    TerminalSvg::new(lines, columns, title, theme).to_string()
}

/// Writes `svg` to `path`, replacing any existing file.
pub fn write_svg(path: &Path, svg: &str) -> Result<()> {
    fs::write(path, svg).map_err(|source| RenderError::FileWriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = svg.len(), "wrote svg");
    Ok(())
}

/// Whether a span leaves marks in the text layer. Blank runs still matter
/// when they carry an underline or strike-through.
fn is_drawn(span: &Span<'_>) -> bool {
    let modifiers = span.style.add_modifier;
    if modifiers.contains(Modifier::HIDDEN) {
        return false;
    }
    !span.content.trim().is_empty()
        || modifiers.intersects(Modifier::UNDERLINED | Modifier::CROSSED_OUT)
}

/// Pixel value with fixed precision.
struct Px(f64);

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Presentation attributes for text modifiers.
struct TextAttrs(Modifier);

impl fmt::Display for TextAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        if m.contains(Modifier::BOLD) {
            f.write_str(r#" font-weight="bold""#)?;
        }
        if m.contains(Modifier::ITALIC) {
            f.write_str(r#" font-style="italic""#)?;
        }
        if m.contains(Modifier::DIM) {
            f.write_str(r#" opacity="0.6""#)?;
        }
        match (
            m.contains(Modifier::UNDERLINED),
            m.contains(Modifier::CROSSED_OUT),
        ) {
            (true, true) => f.write_str(r#" text-decoration="underline line-through""#),
            (true, false) => f.write_str(r#" text-decoration="underline""#),
            (false, true) => f.write_str(r#" text-decoration="line-through""#),
            (false, false) => Ok(()),
        }
    }
}

/// XML-escaped text.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "svg_tests.rs"]
mod tests;
