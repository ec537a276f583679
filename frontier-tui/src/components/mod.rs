use ratatui::layout::{Constraint, Layout, Rect};

pub mod console;
pub mod controls;
pub mod dialog;
pub mod error_bar;
pub mod header;
pub mod path_field;
pub mod progress;
pub mod prompt;
pub mod text_field;

/// Center a rect of a fixed size within another rect, clamped to fit.
pub fn centered_fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical[1])[1]
}

/// Dialog width for a terminal: 80% of it, capped so long lines still wrap
/// on wide screens.
pub fn dialog_width(terminal_width: u16) -> u16 {
    (terminal_width.saturating_mul(4) / 5).clamp(1, 90)
}
