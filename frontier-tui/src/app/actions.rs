use crate::components::path_field;
use frontier_core::{
    action::Action,
    state::{Actions, AppState, Mode},
};
use std::path::PathBuf;

use super::spawn::{
    spawn_confirm, spawn_install, spawn_launch, spawn_open_dir, spawn_status, spawn_update,
};
use super::{EventSender, Services};

/// Whether the current state allows `needed`; sets the error bar if not.
fn allowed(state: &mut AppState, needed: Actions, what: &str) -> bool {
    if state.actions().contains(needed) {
        return true;
    }
    state.error = Some(format!("{what} is not available while {}", state.install_state));
    false
}

fn require_path(state: &mut AppState) -> Option<PathBuf> {
    let path = state.target_path();
    if path.is_none() {
        state.error = Some("Enter the path to your .minecraft folder first".to_string());
    }
    path
}

pub(super) fn handle_edit_path(state: &mut AppState) {
    if allowed(state, Actions::EDIT_PATH, "Editing the path") {
        state.mode = Mode::EditPath;
    }
}

pub(super) fn handle_confirm_path(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::EDIT_PATH, "Confirming the path") {
        return;
    }
    let Some(path) = require_path(state) else {
        return;
    };
    state.mode = Mode::Normal;
    spawn_confirm(state, services, sender, path);
}

pub(super) fn handle_complete_path(state: &mut AppState) {
    // The game directory field only lists directories; the launcher prompt
    // needs files too.
    let dirs_only = state.mode == Mode::EditPath;
    if let Some(input) = state.active_input_mut() {
        path_field::apply_completion(input, dirs_only);
    }
}

pub(super) fn handle_input(action: &Action, state: &mut AppState) {
    let Some(input) = state.active_input_mut() else {
        return;
    };
    match action {
        Action::InputPush(c) => input.insert_char(*c),
        Action::InputPop => {
            input.backspace();
        }
        Action::InputDelete => {
            input.delete_forward();
        }
        Action::CursorLeft => input.cursor_left(),
        Action::CursorRight => input.cursor_right(),
        Action::CursorStart => input.cursor_start(),
        Action::CursorEnd => input.cursor_end(),
        _ => {}
    }
}

pub(super) fn handle_install(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::INSTALL, "Install") {
        return;
    }
    if let Some(path) = require_path(state) {
        state.mode = Mode::Normal;
        spawn_install(state, services, sender, path);
    }
}

pub(super) fn handle_update(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::UPDATE, "Update") {
        return;
    }
    if let Some(path) = require_path(state) {
        let branch = state.selected_branch().to_string();
        spawn_update(state, services, sender, path, branch);
    }
}

pub(super) fn handle_status(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::STATUS, "Status") {
        return;
    }
    if let Some(path) = require_path(state) {
        spawn_status(state, services, sender, path);
    }
}

pub(super) fn handle_open_dir(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::OPEN_DIR, "Opening the folder") {
        return;
    }
    if let Some(path) = require_path(state) {
        spawn_open_dir(state, services, sender, path);
    }
}

pub(super) fn handle_launch(state: &mut AppState, services: &Services, sender: &EventSender) {
    if !allowed(state, Actions::LAUNCH, "Launch") {
        return;
    }
    if let Some(path) = require_path(state) {
        spawn_launch(state, services, sender, path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontier_core::state::InstallationState;

    #[test]
    fn test_allowed_reports_state() {
        let mut state = AppState::new("/tmp/mc", "main");
        assert!(!allowed(&mut state, Actions::LAUNCH, "Launch"));
        assert_eq!(
            state.error.as_deref(),
            Some(format!("Launch is not available while {}", InstallationState::Unconnected).as_str())
        );

        state.error = None;
        assert!(allowed(&mut state, Actions::OPEN_DIR, "Opening the folder"));
        assert!(state.error.is_none());
    }

    #[test]
    fn test_input_goes_to_prompt_when_path_prompt_open() {
        let (tx, _rx) = std::sync::mpsc::channel();
        let mut state = AppState::new("/tmp/mc", "main");
        state.open_prompt(frontier_core::PromptRequest::Path {
            title: "Select".to_string(),
            message: "Where?".to_string(),
            reply: tx,
        });
        handle_input(&Action::InputPush('/'), &mut state);
        handle_input(&Action::InputPush('x'), &mut state);
        handle_input(&Action::CursorStart, &mut state);
        handle_input(&Action::InputDelete, &mut state);
        assert_eq!(state.prompt_input.text, "x");
        assert_eq!(state.path_input.text, "/tmp/mc");
    }
}
