use super::{
    dialog::Dialog,
    text_field::{self, TextFieldStyle},
};
use crate::theme::Theme;
use frontier_core::{
    PromptRequest,
    state::{AppState, Mode},
};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Padding,
};

fn message_lines<'a>(message: &'a str, theme: &Theme) -> Vec<Line<'a>> {
    message
        .lines()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.plain))))
        .collect()
}

fn draw_request(f: &mut Frame, area: Rect, request: &PromptRequest, state: &AppState, theme: &Theme) {
    let mut lines = message_lines(request.message(), theme);
    lines.push(Line::default());

    if request.wants_path() {
        let dialog = Dialog::new(lines)
            .title(request.title())
            .border_color(theme.notice)
            .padding(Padding::horizontal(1))
            .reserve(3);
        if let Some(field_area) = dialog.render(f, area) {
            let style = TextFieldStyle {
                title: "path",
                placeholder: "leave empty to cancel",
                border_color: theme.notice,
                text_color: theme.plain,
                muted_color: theme.muted,
                focused: true,
            };
            text_field::draw(f, field_area, &style, &state.prompt_input);
        }
    } else {
        lines.push(Line::from(Span::styled(
            "y yes   n no",
            Style::default().fg(theme.hint),
        )));
        Dialog::new(lines)
            .title(request.title())
            .border_color(theme.caution)
            .padding(Padding::horizontal(1))
            .render(f, area);
    }
}

/// The active prompt or notice, drawn over everything else.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    if let Some(notice) = &state.notice
        && matches!(state.mode, Mode::Notice { .. })
    {
        let mut lines = message_lines(&notice.message, theme);
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "press any key",
            Style::default().fg(theme.hint),
        )));
        Dialog::new(lines)
            .title(&notice.title)
            .border_color(theme.notice)
            .padding(Padding::horizontal(1))
            .render(f, area);
        return;
    }
    if let Some(request) = &state.prompt {
        draw_request(f, area, request, state, theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::mpsc;

    fn render(state: &AppState) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw(f, f.area(), state, &Theme::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(usize::from(buffer.area.width))
            .map(|row| row.iter().map(ratatui::buffer::Cell::symbol).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_confirm_prompt_shows_title_and_choices() {
        let (tx, _rx) = mpsc::channel();
        let mut state = AppState::new("/tmp/mc", "main");
        state.open_prompt(PromptRequest::Confirm {
            title: "Warning".to_string(),
            message: "Discard local changes?".to_string(),
            reply: tx,
        });
        let text = render(&state);
        assert!(text.contains(" Warning "));
        assert!(text.contains("Discard local changes?"));
        assert!(text.contains("y yes"));
    }

    #[test]
    fn test_path_prompt_shows_input() {
        let (tx, _rx) = mpsc::channel();
        let mut state = AppState::new("/tmp/mc", "main");
        state.open_prompt(PromptRequest::Path {
            title: "Select Minecraft Launcher".to_string(),
            message: "Where is the launcher?".to_string(),
            reply: tx,
        });
        state.prompt_input.set("/opt/launcher");
        let text = render(&state);
        assert!(text.contains("Select Minecraft Launcher"));
        assert!(text.contains("/opt/launcher"));
    }

    #[test]
    fn test_notice_when_no_prompt() {
        let mut state = AppState::new("/tmp/mc", "main");
        state.show_notice("Console Busy", "A task is already running.");
        let text = render(&state);
        assert!(text.contains("Console Busy"));
        assert!(text.contains("press any key"));
    }

    #[test]
    fn test_nothing_drawn_without_prompt_or_notice() {
        let state = AppState::new("/tmp/mc", "main");
        assert!(render(&state).trim().is_empty());
    }
}
