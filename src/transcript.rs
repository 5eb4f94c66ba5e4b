//! Transcript: the decoded lines of one captured session.

use ratatui::text::Line;

use crate::layout;

/// Ordered styled lines plus the running canvas width.
///
/// `canvas_width` only grows as lines are pushed; once capture ends it is
/// the widest visible line in the transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    lines: Vec<Line<'static>>,
    canvas_width: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a decoded line and widens the canvas if needed.
    pub fn push(&mut self, line: Line<'static>) {
        self.canvas_width = self.canvas_width.max(layout::visible_width(&line));
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn canvas_width(&self) -> usize {
        self.canvas_width
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Every line padded to the canvas width, ready for export.
    pub fn padded_lines(&self) -> Vec<Line<'static>> {
        self.lines
            .iter()
            .map(|line| layout::pad_line(line, self.canvas_width))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    fn plain(text: &str) -> Line<'static> {
        Line::from(Span::raw(text.to_string()))
    }

    fn transcript_of(texts: &[&str]) -> Transcript {
        let mut transcript = Transcript::new();
        for text in texts {
            transcript.push(plain(text));
        }
        transcript
    }

    #[test]
    fn test_transcript_canvas_width_is_widest_line() {
        let transcript = transcript_of(&["12345", "123456789012", "123"]);
        assert_eq!(transcript.canvas_width(), 12);
        for line in transcript.padded_lines() {
            assert_eq!(layout::raw_width(&line), 12);
        }
    }

    #[test]
    fn test_transcript_width_monotonic_while_pushing() {
        let mut transcript = Transcript::new();
        let mut last = 0;
        for text in ["ab", "abcdef", "a", "", "abcd"] {
            transcript.push(plain(text));
            assert!(transcript.canvas_width() >= last);
            last = transcript.canvas_width();
        }
        assert_eq!(last, 6);
    }

    #[test]
    fn test_transcript_empty_has_zero_width() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.canvas_width(), 0);
        assert!(transcript.padded_lines().is_empty());
    }

    #[test]
    fn test_transcript_trailing_padding_does_not_widen_canvas() {
        let transcript = transcript_of(&["abc          ", "abcd"]);
        assert_eq!(transcript.canvas_width(), 4);
        let padded = transcript.padded_lines();
        assert_eq!(layout::plain_text(&padded[0]), "abc ");
    }

    #[test]
    fn test_transcript_preserves_order() {
        let transcript = transcript_of(&["first", "second"]);
        assert_eq!(transcript.len(), 2);
        assert_eq!(layout::plain_text(&transcript.lines()[1]), "second");
    }
}
