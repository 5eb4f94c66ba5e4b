//! ANSI decoder: turns raw captured bytes into styled `Line<'static>`s.
//!
//! A two-state machine: plain text, or inside an escape sequence. SGR
//! sequences (`ESC [ … m`) move the pen; every other CSI, OSC, or two-byte
//! escape is consumed and dropped. The pen survives across lines, the same
//! way a terminal keeps its attributes until they are reset.
//!
//! This is a **leaf module**: it only knows about bytes and ratatui styles.

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

const ESC: char = '\x1b';
const BEL: char = '\x07';

/// Columns between tab stops.
const TAB_STOP: usize = 8;

/// Sequences longer than this are treated as garbage and abandoned.
const MAX_SEQUENCE_LEN: usize = 4096;

/// Colors for SGR 30–37 / 40–47.
const STANDARD_COLORS: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Gray,
];

/// Colors for SGR 90–97 / 100–107.
const BRIGHT_COLORS: [Color; 8] = [
    Color::DarkGray,
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
];

enum DecoderState {
    /// Ordinary printable text.
    Text,
    /// After ESC; `AnsiDecoder::sequence` collects the bytes that follow.
    Escape,
}

/// Current graphic rendition. `None` colors mean "terminal default".
#[derive(Clone, Copy, PartialEq)]
struct Pen {
    fg: Option<Color>,
    bg: Option<Color>,
    modifiers: Modifier,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            fg: None,
            bg: None,
            modifiers: Modifier::empty(),
        }
    }
}

impl Pen {
    fn style(self) -> Style {
        let mut style = Style::default().add_modifier(self.modifiers);
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        style
    }
}

/// Incremental decoder for a stream of terminal output lines.
///
/// Feed it one raw line at a time with [`AnsiDecoder::decode_line`]. Invalid
/// UTF-8 is dropped silently; malformed escape sequences are abandoned
/// rather than reported.
pub struct AnsiDecoder {
    state: DecoderState,
    sequence: String,
    pen: Pen,
    spans: Vec<Span<'static>>,
    run: String,
    column: usize,
}

impl Default for AnsiDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiDecoder {
    /// Creates a decoder with the default pen.
    pub fn new() -> Self {
        Self {
            state: DecoderState::Text,
            sequence: String::new(),
            pen: Pen::default(),
            spans: Vec::new(),
            run: String::new(),
            column: 0,
        }
    }

    /// Decodes one raw line, with or without its `\n` / `\r\n` terminator.
    pub fn decode_line(&mut self, raw: &[u8]) -> Line<'static> {
        for chunk in trim_line_terminator(raw).utf8_chunks() {
            for ch in chunk.valid().chars() {
                self.feed(ch);
            }
            // chunk.invalid() is dropped on purpose.
        }
        self.finish_line()
    }

    fn feed(&mut self, ch: char) {
        match self.state {
            DecoderState::Text => self.feed_text(ch),
            DecoderState::Escape => self.feed_escape(ch),
        }
    }

    fn feed_text(&mut self, ch: char) {
        match ch {
            ESC => {
                self.sequence.clear();
                self.state = DecoderState::Escape;
            }
            '\t' => {
                let fill = TAB_STOP - self.column % TAB_STOP;
                self.run.extend(std::iter::repeat_n(' ', fill));
                self.column += fill;
            }
            // A bare CR returns to column 0; whatever follows overwrites the line.
            '\r' => {
                self.run.clear();
                self.spans.clear();
                self.column = 0;
            }
            c if c.is_control() => {}
            c => {
                self.run.push(c);
                self.column += c.width().unwrap_or(0);
            }
        }
    }

    fn feed_escape(&mut self, ch: char) {
        let Some(introducer) = self.sequence.chars().next() else {
            match ch {
                '[' | ']' => self.sequence.push(ch),
                ESC => {}
                // Two-byte escape (ESC 7, ESC =, …): nothing to keep.
                _ => self.state = DecoderState::Text,
            }
            return;
        };

        if introducer == '[' {
            match ch {
                '\x40'..='\x7e' => {
                    let sequence = std::mem::take(&mut self.sequence);
                    if ch == 'm' {
                        self.apply_sgr(&sequence[1..]);
                    }
                    self.state = DecoderState::Text;
                }
                '\x20'..='\x3f' => self.sequence.push(ch),
                ESC => self.sequence.clear(),
                _ => self.state = DecoderState::Text,
            }
        } else if ch == BEL || (ch == '\\' && self.sequence.ends_with(ESC)) {
            // OSC terminated by BEL or ST.
            self.state = DecoderState::Text;
        } else {
            self.sequence.push(ch);
        }

        if self.sequence.len() > MAX_SEQUENCE_LEN {
            self.sequence.clear();
            self.state = DecoderState::Text;
        }
    }

    /// Applies the parameters of one `ESC [ … m` sequence to the pen.
    fn apply_sgr(&mut self, params: &str) {
        // Private-mode or intermediate bytes mean this is not a plain SGR.
        if !params.bytes().all(|b| b.is_ascii_digit() || b == b';' || b == b':') {
            return;
        }

        let groups: Vec<&str> = params.split(';').collect();
        let mut pen = self.pen;
        let mut i = 0;
        while i < groups.len() {
            let group = groups[i];
            i += 1;

            if group.contains(':') {
                let sub: Vec<u32> = group.split(':').map(sgr_number).collect();
                apply_subparams(&mut pen, &sub);
                continue;
            }

            let code = sgr_number(group);
            match code {
                38 | 48 | 58 => {
                    let args: Vec<u32> =
                        groups[i..].iter().take(4).map(|g| sgr_number(g)).collect();
                    let (color, consumed) = extended_color(&args);
                    i += consumed;
                    match (code, color) {
                        (38, Some(color)) => pen.fg = Some(color),
                        (48, Some(color)) => pen.bg = Some(color),
                        // 58 is underline color, which is never drawn.
                        _ => {}
                    }
                }
                _ => apply_code(&mut pen, code),
            }
        }

        if pen != self.pen {
            self.flush_run();
            self.pen = pen;
        }
    }

    /// Moves pending text into `spans`, merging with the previous span when
    /// the style is unchanged.
    fn flush_run(&mut self) {
        if self.run.is_empty() {
            return;
        }
        let style = self.pen.style();
        let text = std::mem::take(&mut self.run);
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.content.to_mut().push_str(&text),
            _ => self.spans.push(Span::styled(text, style)),
        }
    }

    fn finish_line(&mut self) -> Line<'static> {
        self.flush_run();
        // An escape left open at end of line is malformed; drop it.
        self.state = DecoderState::Text;
        self.sequence.clear();
        self.column = 0;
        Line::from(std::mem::take(&mut self.spans))
    }
}

/// Applies a single SGR code that takes no arguments.
fn apply_code(pen: &mut Pen, code: u32) {
    match code {
        0 => *pen = Pen::default(),
        1 => pen.modifiers.insert(Modifier::BOLD),
        2 => pen.modifiers.insert(Modifier::DIM),
        3 => pen.modifiers.insert(Modifier::ITALIC),
        4 => pen.modifiers.insert(Modifier::UNDERLINED),
        5 => pen.modifiers.insert(Modifier::SLOW_BLINK),
        6 => pen.modifiers.insert(Modifier::RAPID_BLINK),
        7 => pen.modifiers.insert(Modifier::REVERSED),
        8 => pen.modifiers.insert(Modifier::HIDDEN),
        9 => pen.modifiers.insert(Modifier::CROSSED_OUT),
        21 | 22 => pen.modifiers.remove(Modifier::BOLD | Modifier::DIM),
        23 => pen.modifiers.remove(Modifier::ITALIC),
        24 => pen.modifiers.remove(Modifier::UNDERLINED),
        25 => pen
            .modifiers
            .remove(Modifier::SLOW_BLINK | Modifier::RAPID_BLINK),
        27 => pen.modifiers.remove(Modifier::REVERSED),
        28 => pen.modifiers.remove(Modifier::HIDDEN),
        29 => pen.modifiers.remove(Modifier::CROSSED_OUT),
        30..=37 => pen.fg = Some(STANDARD_COLORS[(code - 30) as usize]),
        39 => pen.fg = None,
        40..=47 => pen.bg = Some(STANDARD_COLORS[(code - 40) as usize]),
        49 => pen.bg = None,
        90..=97 => pen.fg = Some(BRIGHT_COLORS[(code - 90) as usize]),
        100..=107 => pen.bg = Some(BRIGHT_COLORS[(code - 100) as usize]),
        _ => {}
    }
}

/// Applies one colon-separated group such as `38:2::255:0:0` or `4:3`.
///
/// The group is self-contained, so nothing after it is ever consumed.
fn apply_subparams(pen: &mut Pen, sub: &[u32]) {
    match sub {
        [code @ (38 | 48), rest @ ..] => {
            let color = match rest {
                // ITU form with a color-space id before the channels.
                [2, _, r, g, b, ..] => extended_color(&[2, *r, *g, *b]).0,
                _ => extended_color(rest).0,
            };
            if let Some(color) = color {
                if *code == 38 {
                    pen.fg = Some(color);
                } else {
                    pen.bg = Some(color);
                }
            }
        }
        [4, 0, ..] => pen.modifiers.remove(Modifier::UNDERLINED),
        // Curly, dotted and other underline styles all render as underline.
        [4, _, ..] => pen.modifiers.insert(Modifier::UNDERLINED),
        _ => {}
    }
}

/// Parses the arguments after `38` / `48` / `58`.
///
/// Returns the color, if valid, and how many arguments belong to it. The
/// count covers malformed or out-of-range values too, so they are never
/// reinterpreted as SGR codes of their own.
fn extended_color(args: &[u32]) -> (Option<Color>, usize) {
    let channel = |k: usize| args.get(k).and_then(|&n| u8::try_from(n).ok());
    match args.first() {
        Some(5) => (channel(1).map(Color::Indexed), args.len().min(2)),
        Some(2) => {
            let color = match (channel(1), channel(2), channel(3)) {
                (Some(r), Some(g), Some(b)) => Some(Color::Rgb(r, g, b)),
                _ => None,
            };
            (color, args.len().min(4))
        }
        Some(_) => (None, 1),
        None => (None, 0),
    }
}

/// An SGR parameter; empty means 0, unparseable means "out of range".
fn sgr_number(param: &str) -> u32 {
    if param.is_empty() {
        0
    } else {
        param.parse().unwrap_or(u32::MAX)
    }
}

/// Strips any trailing `\n` and `\r` bytes.
fn trim_line_terminator(raw: &[u8]) -> &[u8] {
    let end = raw
        .iter()
        .rposition(|&b| b != b'\n' && b != b'\r')
        .map_or(0, |pos| pos + 1);
    &raw[..end]
}

#[cfg(test)]
#[path = "ansi_tests.rs"]
mod tests;
