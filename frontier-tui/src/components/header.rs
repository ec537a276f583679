use crate::theme::Theme;
use frontier_core::state::{AppState, InstallationState};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub const TITLE: &str = "Frontier Modpack Installer";

/// Title on the left; installation state (and the running task) on the right.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme, spinner: &str) {
    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);

    let title = Line::from(Span::styled(
        format!(" {TITLE}"),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title), left);

    let state_color = match state.install_state {
        InstallationState::Connected => theme.connected,
        InstallationState::NoInstall => theme.notice,
        InstallationState::NonManagedInstall => theme.caution,
        InstallationState::Unconnected => theme.muted,
    };
    let mut spans = Vec::new();
    if let Some(task) = &state.running_task {
        spans.push(Span::styled(
            format!("{spinner} {task}  "),
            Style::default().fg(theme.notice),
        ));
    }
    spans.push(Span::styled(
        format!("● {} ", state.install_state),
        Style::default()
            .fg(state_color)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        right,
    );
}
