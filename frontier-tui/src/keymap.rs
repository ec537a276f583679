use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use frontier_core::PromptRequest;
use frontier_core::action::Action;
use frontier_core::state::{AppState, Mode};

/// Resolve a key event into an Action based on current mode
pub fn resolve_action(key: KeyEvent, state: &AppState) -> Option<Action> {
    // Global quit
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Action::Quit);
    }

    match &state.mode {
        Mode::Normal => resolve_normal_key(key.code),
        Mode::EditPath => resolve_input_key(key.code).or(match key.code {
            KeyCode::Enter => Some(Action::ConfirmPath),
            KeyCode::Esc => Some(Action::StopEditing),
            _ => None,
        }),
        Mode::Prompt { .. } => {
            if state.prompt.as_ref().is_some_and(PromptRequest::wants_path) {
                resolve_input_key(key.code).or(match key.code {
                    KeyCode::Enter => Some(Action::Accept),
                    KeyCode::Esc => Some(Action::Decline),
                    _ => None,
                })
            } else {
                resolve_confirm_key(key.code)
            }
        }
        Mode::Notice { .. } => Some(Action::DismissNotice),
    }
}

fn resolve_normal_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('e') => Some(Action::EditPath),
        KeyCode::Enter => Some(Action::ConfirmPath),
        KeyCode::Char('i') => Some(Action::Install),
        KeyCode::Char('u') => Some(Action::Update),
        KeyCode::Char('s') => Some(Action::Status),
        KeyCode::Char('o') => Some(Action::OpenDir),
        KeyCode::Char('l') => Some(Action::Launch),
        KeyCode::Char('[') | KeyCode::Left => Some(Action::PrevBranch),
        KeyCode::Char(']') | KeyCode::Right => Some(Action::NextBranch),
        KeyCode::PageUp => Some(Action::ScrollConsoleUp),
        KeyCode::PageDown => Some(Action::ScrollConsoleDown),
        _ => None,
    }
}

fn resolve_input_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Tab => Some(Action::CompletePath),
        KeyCode::Backspace => Some(Action::InputPop),
        KeyCode::Delete => Some(Action::InputDelete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorStart),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) => Some(Action::InputPush(c)),
        _ => None,
    }
}

fn resolve_confirm_key(key: KeyCode) -> Option<Action> {
    match key {
        KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(Action::Accept),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::Decline),
        _ => None,
    }
}
