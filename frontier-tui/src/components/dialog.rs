use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use super::{centered_fixed_rect, dialog_width};

/// A centered popup: computes its size from the wrapped content, clears the
/// background and renders a bordered paragraph. Rows reserved with
/// [`Dialog::reserve`] sit below the text for widgets drawn by the caller.
pub struct Dialog<'a> {
    lines: Vec<Line<'a>>,
    border_color: Color,
    title: Option<&'a str>,
    padding: Padding,
    alignment: Alignment,
    reserved: u16,
}

impl<'a> Dialog<'a> {
    #[must_use]
    pub fn new(lines: Vec<Line<'a>>) -> Self {
        Self {
            lines,
            border_color: Color::White,
            title: None,
            padding: Padding::ZERO,
            alignment: Alignment::Left,
            reserved: 0,
        }
    }

    #[must_use]
    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn reserve(mut self, rows: u16) -> Self {
        self.reserved = rows;
        self
    }

    fn h_chrome(&self) -> u16 {
        2 + self.padding.left + self.padding.right
    }

    fn v_chrome(&self) -> u16 {
        2 + self.padding.top + self.padding.bottom
    }

    /// Compute `(width, height)` for this dialog given the terminal width.
    pub fn size(&self, terminal_width: u16) -> (u16, u16) {
        let width = dialog_width(terminal_width);
        let text_width = width.saturating_sub(self.h_chrome()).max(1);

        let content_height: u16 = self
            .lines
            .iter()
            .map(|line| word_wrapped_line_count(line, text_width))
            .sum();

        (width, content_height + self.reserved + self.v_chrome())
    }

    /// Render centered on `area`. Returns the reserved rows' area, if any.
    pub fn render(&self, f: &mut Frame, area: Rect) -> Option<Rect> {
        let (width, height) = self.size(area.width);
        let centered = centered_fixed_rect(width, height, area);

        f.render_widget(Clear, centered);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color))
            .padding(self.padding);
        if let Some(title) = self.title {
            block = block.title(Line::styled(
                format!(" {title} "),
                Style::default()
                    .fg(self.border_color)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        let inner = block.inner(centered);

        let paragraph = Paragraph::new(self.lines.clone())
            .block(block)
            .wrap(Wrap { trim: false })
            .alignment(self.alignment);
        f.render_widget(paragraph, centered);

        (self.reserved > 0 && inner.height >= self.reserved).then(|| Rect {
            y: inner.y + inner.height - self.reserved,
            height: self.reserved,
            ..inner
        })
    }
}

/// Estimate visual line count when a `Line` is word-wrapped to `max_width`
/// display columns.
pub fn word_wrapped_line_count(line: &Line, max_width: u16) -> u16 {
    let max_w = usize::from(max_width);
    if max_w == 0 {
        return 1;
    }

    let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
    if text.is_empty() {
        return 1;
    }

    let mut lines: u16 = 1;
    let mut col: usize = 0;

    for (i, word) in text.split(' ').enumerate() {
        let w = word.width();
        let needed = if i == 0 || col == 0 { w } else { w + 1 };

        if col + needed <= max_w {
            col += needed;
        } else if w <= max_w {
            lines += 1;
            col = w;
        } else {
            if col > 0 {
                lines += 1;
            }
            col = w;
            while col > max_w {
                lines += 1;
                col -= max_w;
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend, text::Span};

    #[test]
    fn test_word_wrap_single_line_no_wrap() {
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 20), 1);
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 11), 1);
    }

    #[test]
    fn test_word_wrap_breaks_at_word_boundary() {
        assert_eq!(word_wrapped_line_count(&Line::raw("hello world"), 10), 2);
        assert_eq!(
            word_wrapped_line_count(&Line::raw("one two three four"), 5),
            4
        );
    }

    #[test]
    fn test_word_wrap_oversized_word() {
        assert_eq!(word_wrapped_line_count(&Line::raw("abcdefghij"), 4), 3);
        assert_eq!(word_wrapped_line_count(&Line::raw("hi abcdefghij"), 6), 3);
    }

    #[test]
    fn test_word_wrap_counts_display_width() {
        // Each CJK character takes two columns.
        assert_eq!(word_wrapped_line_count(&Line::raw("日本語"), 4), 2);
        // A combining mark takes none.
        assert_eq!(word_wrapped_line_count(&Line::raw("e\u{0301}e\u{0301}"), 2), 1);
    }

    #[test]
    fn test_word_wrap_degenerate_inputs() {
        assert_eq!(word_wrapped_line_count(&Line::raw(""), 20), 1);
        assert_eq!(word_wrapped_line_count(&Line::raw("hello"), 0), 1);
    }

    #[test]
    fn test_word_wrap_multi_span_line() {
        let line = Line::from(vec![
            Span::raw("hello "),
            Span::styled("world", Style::default().fg(Color::Red)),
        ]);
        assert_eq!(word_wrapped_line_count(&line, 20), 1);
        assert_eq!(word_wrapped_line_count(&line, 8), 2);
    }

    #[test]
    fn test_dialog_size() {
        let dialog = Dialog::new(vec![Line::raw("hello")]);
        assert_eq!(dialog.size(100), (80, 3));

        let padded = Dialog::new(vec![Line::raw("a"), Line::raw(""), Line::raw("b")])
            .padding(Padding::uniform(1));
        assert_eq!(padded.size(100).1, 7);

        let with_input = Dialog::new(vec![Line::raw("hello")]).reserve(3);
        assert_eq!(with_input.size(100).1, 6);
    }

    #[test]
    fn test_dialog_builder_methods() {
        let dialog = Dialog::new(vec![Line::raw("test")])
            .border_color(Color::Red)
            .title("Warning")
            .alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        assert_eq!(dialog.border_color, Color::Red);
        assert_eq!(dialog.title, Some("Warning"));
        assert_eq!(dialog.alignment, Alignment::Center);
        assert_eq!(dialog.h_chrome(), 4);
        assert_eq!(dialog.v_chrome(), 2);
    }

    #[test]
    fn test_dialog_renders_title_and_reserved_area() {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut reserved = None;
        terminal
            .draw(|f| {
                reserved = Dialog::new(vec![Line::raw("Continue?")])
                    .title("Warning")
                    .reserve(3)
                    .render(f, f.area());
            })
            .unwrap();
        let reserved = reserved.unwrap();
        assert_eq!(reserved.height, 3);

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(" Warning "));
        assert!(text.contains("Continue?"));
    }
}
