use frontier_core::state::TextInput;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub struct TextFieldStyle<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
    pub border_color: Color,
    pub text_color: Color,
    pub muted_color: Color,
    /// Whether the field owns the terminal cursor
    pub focused: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct VisibleSlice {
    start: usize,
    end: usize,
    cursor_col: u16,
}

/// The part of `text` that fits in `max_width` columns while keeping the
/// cursor in view.
fn visible_slice(text: &str, cursor_pos: usize, max_width: u16) -> VisibleSlice {
    if max_width == 0 || text.is_empty() {
        return VisibleSlice {
            start: 0,
            end: 0,
            cursor_col: 0,
        };
    }

    let graphemes: Vec<(usize, &str)> = text.grapheme_indices(true).collect();
    let mut boundaries: Vec<usize> = graphemes.iter().map(|(i, _)| *i).collect();
    boundaries.push(text.len());

    let cursor = cursor_pos.min(text.len());
    let boundary_idx = match boundaries.binary_search(&cursor) {
        Ok(idx) => idx,
        Err(idx) => idx.saturating_sub(1),
    };

    let mut prefix_widths = Vec::with_capacity(boundaries.len());
    let mut width = 0;
    prefix_widths.push(0);
    for (_, grapheme) in &graphemes {
        width += grapheme.width();
        prefix_widths.push(width);
    }

    let cursor_col = prefix_widths[boundary_idx];
    let max_width = usize::from(max_width);
    let max_cursor_col = max_width.saturating_sub(1);
    let scroll_col = cursor_col.saturating_sub(max_cursor_col);

    let start_index = prefix_widths
        .iter()
        .take_while(|col| **col <= scroll_col)
        .count()
        .saturating_sub(1)
        .min(graphemes.len().saturating_sub(1));

    let mut end_index = start_index;
    let mut visible_width = 0;
    while let Some((_, grapheme)) = graphemes.get(end_index) {
        let g_width = grapheme.width();
        if visible_width + g_width > max_width {
            break;
        }
        visible_width += g_width;
        end_index += 1;
    }

    let cursor_col = cursor_col
        .saturating_sub(prefix_widths[start_index])
        .min(max_cursor_col);

    VisibleSlice {
        start: boundaries[start_index],
        end: boundaries[end_index],
        cursor_col: u16::try_from(cursor_col).unwrap_or(u16::MAX),
    }
}

/// Render a bordered single-line input, placing the terminal cursor when
/// focused.
pub fn draw(f: &mut Frame, area: Rect, style: &TextFieldStyle<'_>, input: &TextInput) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", style.title))
        .border_style(Style::default().fg(style.border_color));
    let inner = block.inner(area);

    if input.text.is_empty() {
        let content = Line::from(Span::styled(
            style.placeholder,
            Style::default().fg(style.muted_color),
        ));
        f.render_widget(Paragraph::new(content).block(block), area);
        if style.focused && inner.width > 0 && inner.height > 0 {
            f.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let slice = visible_slice(&input.text, input.cursor, inner.width);
    let content = Line::from(Span::styled(
        &input.text[slice.start..slice.end],
        Style::default().fg(style.text_color),
    ));
    f.render_widget(Paragraph::new(content).block(block), area);

    if style.focused && inner.width > 0 && inner.height > 0 {
        let cursor_x = inner.x.saturating_add(slice.cursor_col);
        f.set_cursor_position((cursor_x, inner.y));
    }
}

#[cfg(test)]
mod tests {
    use super::visible_slice;

    #[test]
    fn test_visible_slice_no_scroll() {
        let result = visible_slice("/home/steve", 2, 20);
        assert_eq!((result.start, result.end), (0, 11));
        assert_eq!(result.cursor_col, 2);
    }

    #[test]
    fn test_visible_slice_scrolls_to_cursor() {
        let text = "/home/steve/.minecraft";
        let result = visible_slice(text, text.len(), 5);
        assert_eq!(&text[result.start..result.end], "raft");
        assert_eq!(result.cursor_col, 4);
    }

    #[test]
    fn test_visible_slice_handles_wide_graphemes() {
        let text = "A👩‍💻B";
        let result = visible_slice(text, "A👩‍💻".len(), 3);
        assert_eq!(&text[result.start..result.end], "👩‍💻B");
        assert_eq!(result.cursor_col, 2);
    }

    #[test]
    fn test_visible_slice_empty() {
        let result = visible_slice("", 0, 10);
        assert_eq!((result.start, result.end, result.cursor_col), (0, 0, 0));
    }
}
