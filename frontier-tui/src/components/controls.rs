use crate::theme::Theme;
use frontier_core::{
    adapter::Freshness,
    git::short_id,
    state::{Actions, AppState},
};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const BUTTONS: [(&str, &str, Actions); 4] = [
    ("i", "Install", Actions::INSTALL),
    ("u", "Update", Actions::UPDATE),
    ("s", "Status", Actions::STATUS),
    ("o", "Open folder", Actions::OPEN_DIR),
];

fn button<'a>(key: &'a str, label: &'a str, enabled: bool, theme: &Theme) -> Vec<Span<'a>> {
    let (key_style, label_style) = if enabled {
        (
            Style::default()
                .fg(theme.hint)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.plain),
        )
    } else {
        (
            Style::default().fg(theme.muted),
            Style::default().fg(theme.muted),
        )
    };
    vec![
        Span::styled(format!("[{key}] "), key_style),
        Span::styled(label, label_style),
        Span::raw("   "),
    ]
}

fn branch_line<'a>(state: &'a AppState, theme: &Theme) -> Line<'a> {
    let enabled = state.actions().contains(Actions::UPDATE);
    let value_style = if enabled {
        Style::default()
            .fg(theme.notice)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.muted)
    };
    Line::from(vec![
        Span::styled("branch ", Style::default().fg(theme.muted)),
        Span::styled("[ ", Style::default().fg(theme.hint)),
        Span::styled(state.selected_branch(), value_style),
        Span::styled(" ]", Style::default().fg(theme.hint)),
        Span::styled(
            format!("  {}/{}", state.selected_branch + 1, state.branches.len()),
            Style::default().fg(theme.muted),
        ),
    ])
}

fn status_line<'a>(state: &'a AppState, theme: &Theme) -> Line<'a> {
    let Some(report) = &state.last_status else {
        return Line::from(Span::styled(
            "no status yet",
            Style::default().fg(theme.muted),
        ));
    };
    let mut spans = vec![Span::styled(
        format!(
            "{} @ {} ({})",
            report.branch,
            short_id(&report.commit_id),
            report.commit_date
        ),
        Style::default().fg(theme.status),
    )];
    if report.dirty {
        spans.push(Span::styled(
            "  modified",
            Style::default().fg(theme.caution),
        ));
    }
    match &report.freshness {
        Freshness::UpToDate => {
            spans.push(Span::styled("  up to date", Style::default().fg(theme.success)));
        }
        Freshness::NewerAvailable { remote_id } => spans.push(Span::styled(
            format!("  {} available", short_id(remote_id)),
            Style::default().fg(theme.notice),
        )),
    }
    Line::from(spans)
}

fn icon_lines<'a>(state: &AppState, theme: &Theme) -> Vec<Line<'a>> {
    let caption = match &state.icon {
        Some(icon) => Span::styled(
            format!("icon {}x{} ({} KB)", icon.width, icon.height, icon.bytes.div_ceil(1024)),
            Style::default().fg(theme.plain),
        ),
        None => Span::styled("icon unavailable", Style::default().fg(theme.muted)),
    };
    let launch_enabled = state.actions().contains(Actions::LAUNCH);
    vec![
        Line::from(caption),
        Line::default(),
        Line::from(button("l", "Launch", launch_enabled, theme)),
    ]
}

/// Icon and launch on the left; branch selector, buttons and the latest
/// status on the right.
pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [left, right] =
        Layout::horizontal([Constraint::Length(28), Constraint::Fill(1)]).areas(area);

    let icon_block = Block::default()
        .borders(Borders::ALL)
        .title(" Frontier ")
        .border_style(Style::default().fg(theme.border));
    f.render_widget(
        Paragraph::new(icon_lines(state, theme)).block(icon_block),
        left,
    );

    let actions = state.actions();
    let buttons: Vec<Span> = BUTTONS
        .iter()
        .flat_map(|&(key, label, needs)| button(key, label, actions.contains(needs), theme))
        .collect();

    let lines = vec![
        branch_line(state, theme),
        Line::from(buttons),
        status_line(state, theme),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" controls ")
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(lines).block(block), right);
}

pub fn draw_hint(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let wants_path = state
        .prompt
        .as_ref()
        .is_some_and(frontier_core::PromptRequest::wants_path);
    let hint = Paragraph::new(Span::styled(
        format!(" {}", state.mode.hint(wants_path)),
        Style::default().fg(theme.hint),
    ));
    f.render_widget(hint, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_core::{
        adapter::StatusReport,
        icon::IconInfo,
        state::InstallationState,
    };
    use ratatui::{Terminal, backend::TestBackend};

    fn render(state: &AppState) -> String {
        let backend = TestBackend::new(100, 6);
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
    fn test_renders_branch_and_buttons() {
        let state = AppState::new("/tmp/mc", "main");
        let text = render(&state);
        assert!(text.contains("[ main ]"));
        assert!(text.contains("[i] Install"));
        assert!(text.contains("[l] Launch"));
        assert!(text.contains("no status yet"));
        assert!(text.contains("icon unavailable"));
    }

    #[test]
    fn test_renders_status_and_icon() {
        let mut state = AppState::new("/tmp/mc", "main");
        state.set_state(InstallationState::Connected);
        state.last_status = Some(StatusReport {
            branch: "main".to_string(),
            commit_id: "abc1234def".to_string(),
            commit_date: "10-16-2026 09:30".to_string(),
            dirty: true,
            changes: Vec::new(),
            freshness: Freshness::NewerAvailable {
                remote_id: "fff0000aaa".to_string(),
            },
        });
        state.icon = Some(IconInfo {
            width: 200,
            height: 120,
            bytes: 2048,
        });
        let text = render(&state);
        assert!(text.contains("main @ abc1234 (10-16-2026 09:30)"));
        assert!(text.contains("modified"));
        assert!(text.contains("fff0000 available"));
        assert!(text.contains("icon 200x120 (2 KB)"));
    }
}
