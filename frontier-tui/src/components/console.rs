use super::dialog::word_wrapped_line_count;
use crate::theme::Theme;
use frontier_core::state::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Word-wrapped console ending `state.console_scroll` lines before the
/// newest one. Lines holding embedded newlines take one row per part.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.console_scroll > 0 {
        format!(" console (+{} newer, pgdn) ", state.console_scroll)
    } else {
        " console ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    let rows = usize::from(inner.height);

    // Collect from the bottom of the view upwards until the rows are full
    let mut visible: Vec<Line> = Vec::new();
    let mut used = 0;
    'lines: for line in state.console.lines().rev().skip(state.console_scroll) {
        let style = Style::default().fg(theme.tone(line.tone));
        for part in line.text.lines().rev() {
            if used >= rows {
                break 'lines;
            }
            let rendered = Line::from(Span::styled(part.to_string(), style));
            used += usize::from(word_wrapped_line_count(&rendered, inner.width));
            visible.push(rendered);
        }
    }
    visible.reverse();

    // The oldest line may wrap past the top; hide its leading rows
    let overflow = u16::try_from(used.saturating_sub(rows)).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(visible)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((overflow, 0));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_core::sink::{ConsoleLine, Tone};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &AppState, width: u16, height: u16) -> Vec<String> {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), state, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect()
    }

    fn state_with(lines: &[&str]) -> AppState {
        let mut state = AppState::default();
        for text in lines {
            state.push_console(ConsoleLine::new(*text, Tone::Plain));
        }
        state
    }

    #[test]
    fn test_long_lines_wrap_instead_of_clipping() {
        let state = state_with(&[
            "Git command error: fatal: unable to access remote repository please check",
        ]);
        let text = render(&state, 30, 8).join("\n");
        assert!(text.contains("Git command error:"));
        assert!(text.contains("check"));
    }

    #[test]
    fn test_tail_shown_by_default() {
        let lines: Vec<String> = (0..20).map(|i| format!("line {i:02}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let state = state_with(&refs);
        let text = render(&state, 30, 6).join("\n");
        assert!(text.contains("line 19"));
        assert!(!text.contains("line 10"));
    }

    #[test]
    fn test_scrolled_view_reaches_older_lines() {
        let lines: Vec<String> = (0..20).map(|i| format!("line {i:02}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut state = state_with(&refs);
        state.scroll_console(true);
        state.scroll_console(true);

        let rows = render(&state, 30, 6);
        let text = rows.join("\n");
        assert!(text.contains("line 09"));
        assert!(!text.contains("line 19"));
        assert!(rows[0].contains("+10 newer"));
    }
}
