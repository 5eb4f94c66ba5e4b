    use super::*;
    use ratatui::style::Color;

    fn plain(text: &str) -> Line<'static> {
        Line::from(Span::raw(text.to_string()))
    }

    #[test]
    fn test_layout_visible_width_ignores_trailing_whitespace() {
        assert_eq!(visible_width(&plain("abc   ")), 3);
        assert_eq!(visible_width(&plain("   ")), 0);
        assert_eq!(visible_width(&plain("  indented")), 10);
    }

    #[test]
    fn test_layout_visible_width_spans_multiple_styles() {
        let line = Line::from(vec![
            Span::styled("ab", Style::default().fg(Color::Red)),
            Span::raw("cd "),
        ]);
        assert_eq!(visible_width(&line), 4);
    }

    #[test]
    fn test_layout_visible_width_counts_columns_not_bytes() {
        // Wide CJK characters take two columns each.
        assert_eq!(visible_width(&plain("日本")), 4);
        assert_eq!(visible_width(&plain("héllo")), 5);
    }

    #[test]
    fn test_layout_pad_line_to_width() {
        let padded = pad_line(&plain("hello"), 12);
        assert_eq!(raw_width(&padded), 12);
        assert_eq!(plain_text(&padded), "hello       ");
    }

    #[test]
    fn test_layout_pad_line_exact_width_unchanged() {
        let padded = pad_line(&plain("exact"), 5);
        assert_eq!(padded.spans.len(), 1);
        assert_eq!(plain_text(&padded), "exact");
    }

    #[test]
    fn test_layout_pad_line_keeps_styles() {
        let red = Style::default().fg(Color::Red);
        let line = Line::from(vec![Span::styled("err", red)]);
        let padded = pad_line(&line, 6);
        assert_eq!(padded.spans[0].style, red);
        assert_eq!(padded.spans[1].style, Style::default());
    }

    #[test]
    fn test_layout_pad_line_never_truncates_visible_text() {
        let padded = pad_line(&plain("longer than width"), 4);
        assert_eq!(plain_text(&padded), "longer than width");
    }

    #[test]
    fn test_layout_pad_line_drops_overflowing_trailing_spaces() {
        let line = Line::from(vec![Span::raw("ab"), Span::raw("    ")]);
        let padded = pad_line(&line, 3);
        assert_eq!(plain_text(&padded), "ab ");
        assert_eq!(raw_width(&padded), 3);
    }

    #[test]
    fn test_layout_pad_empty_line() {
        let padded = pad_line(&Line::default(), 3);
        assert_eq!(plain_text(&padded), "   ");
        let zero = pad_line(&Line::default(), 0);
        assert!(zero.spans.is_empty());
    }

    #[test]
    fn test_layout_digit_count() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(1234), 4);
    }

    #[test]
    fn test_layout_code_canvas_width_includes_gutter() {
        let source = "echo hi\nls -la /tmp\n";
        // 11 columns of code + 1 digit + 4 padding.
        assert_eq!(code_canvas_width(source), 16);
    }

    #[test]
    fn test_layout_code_canvas_width_two_digit_gutter() {
        let source = "x\n".repeat(12);
        assert_eq!(code_canvas_width(&source), 1 + 2 + 4);
    }

    #[test]
    fn test_layout_code_canvas_width_empty_source() {
        assert_eq!(code_canvas_width(""), 5);
    }

    #[test]
    fn test_layout_line_number_span_fills_gutter() {
        let span = line_number_span(7, 120);
        assert_eq!(span.content.width(), gutter_width(120));
        assert_eq!(span.content, "    7  ");
        assert!(span.style.add_modifier.contains(Modifier::DIM));
    }

    #[test]
    fn test_layout_expand_tabs() {
        assert_eq!(expand_tabs("\techo", 4), "    echo");
        assert_eq!(expand_tabs("ab\tc\n\td", 4), "ab  c\n    d");
        assert_eq!(expand_tabs("no tabs", 4), "no tabs");
    }
