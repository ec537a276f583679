use crate::theme::Theme;
use frontier_core::state::AppState;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let (ratio, label) = match &state.progress {
        Some(event) => (event.ratio().unwrap_or(0.0), event.to_string()),
        None => (0.0, "idle".to_string()),
    };
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" progress ")
                .border_style(Style::default().fg(theme.border)),
        )
        .gauge_style(Style::default().fg(theme.progress))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}
