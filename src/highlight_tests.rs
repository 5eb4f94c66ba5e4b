    use super::*;

    fn highlighter() -> &'static Highlighter {
        use std::sync::LazyLock;
        static H: LazyLock<Highlighter> = LazyLock::new(Highlighter::new);
        &H
    }

    #[test]
    fn test_highlight_bash_script_has_color() {
        let code = "#!/usr/bin/env bash\nset -euo pipefail\necho \"hello $USER\"\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, DEFAULT_THEME);
        assert_eq!(lines.len(), 3);
        let distinct: std::collections::BTreeSet<String> = lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter_map(|span| span.style.fg.map(|c| format!("{c:?}")))
            .collect();
        assert!(distinct.len() > 1, "bash should use several colors");
    }

    #[test]
    fn test_highlight_unknown_language_no_crash() {
        let code = "some random text\nmore text\n";
        let lines = highlighter().highlight_code(code, "nosuchlanguage", DEFAULT_THEME);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_highlight_empty_code() {
        let lines = highlighter().highlight_code("", SCRIPT_LANGUAGE, DEFAULT_THEME);
        assert!(lines.is_empty(), "empty code should produce no lines");
    }

    #[test]
    fn test_highlight_invalid_theme_falls_back() {
        let code = "ls -la\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, "nonexistent-theme");
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_highlight_spans_carry_no_background() {
        let code = "for f in *.txt; do cat \"$f\"; done\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, DEFAULT_THEME);
        for span in lines.iter().flat_map(|l| l.spans.iter()) {
            assert_eq!(span.style.bg, None);
        }
    }

    #[test]
    fn test_highlight_crlf_line_endings_no_cr_in_spans() {
        let code = "echo one\r\necho two\r\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, DEFAULT_THEME);
        assert_eq!(lines.len(), 2);
        for span in lines.iter().flat_map(|l| l.spans.iter()) {
            assert!(!span.content.contains('\r'), "{:?}", span.content);
            assert!(!span.content.contains('\n'), "{:?}", span.content);
        }
    }

    #[test]
    fn test_highlight_preserves_text() {
        let code = "cargo run -- --help  # show flags\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, DEFAULT_THEME);
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "cargo run -- --help  # show flags");
    }

    #[test]
    fn test_highlight_comment_gets_italic() {
        let code = "# this is a comment\n";
        let lines = highlighter().highlight_code(code, SCRIPT_LANGUAGE, DEFAULT_THEME);
        assert_eq!(lines.len(), 1);
        let has_italic = lines[0]
            .spans
            .iter()
            .any(|span| span.style.add_modifier.contains(Modifier::ITALIC));
        assert!(has_italic, "comment spans should have ITALIC modifier");
    }

    #[test]
    fn test_canvas_colors_base16_ocean() {
        let colors = highlighter()
            .canvas_colors(DEFAULT_THEME)
            .expect("base16-ocean.dark must be a built-in syntect theme");
        // base16-ocean.dark: background #2b303b, foreground #c0c5ce.
        assert_eq!(colors.background, (0x2b, 0x30, 0x3b));
        assert_eq!(colors.foreground, (0xc0, 0xc5, 0xce));
    }

    #[test]
    fn test_resolve_comment_color_base16_ocean() {
        let themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .get(DEFAULT_THEME)
            .expect("base16-ocean.dark must be a built-in syntect theme");
        let c = resolve_comment_color(theme).expect("theme should color comments");
        // base16-ocean.dark comment color is #65737e.
        assert_eq!((c.r, c.g, c.b), (101, 115, 126));
    }
