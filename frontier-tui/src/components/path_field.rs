use crate::theme::Theme;
use frontier_core::{
    platform::expand_tilde,
    state::{Actions, AppState, Mode, TextInput},
};
use ratatui::{Frame, layout::Rect};
use std::{fs, path::MAIN_SEPARATOR};

use super::text_field::{self, TextFieldStyle};

fn is_separator(c: char) -> bool {
    c == '/' || c == MAIN_SEPARATOR
}

/// Split input into (`parent_dir`, prefix).
/// e.g. `~/.mine` → `("~/", ".mine")`, `games` → `("./", "games")`
pub fn split_input(input: &str) -> (String, String) {
    if let Some(last_slash) = input.rfind(is_separator) {
        let (parent, prefix) = input.split_at(last_slash + 1);
        (parent.to_string(), prefix.to_string())
    } else {
        ("./".to_string(), input.to_string())
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.ends_with(is_separator) {
        format!("{parent}{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Filesystem completions for `input`, prefix-matched case-insensitively.
/// Hidden entries only appear once the prefix starts with `.`.
pub fn complete(input: &str, dirs_only: bool) -> Vec<String> {
    if input.is_empty() {
        return Vec::new();
    }

    let (parent_dir, prefix) = split_input(input);
    let Some(expanded_parent) = expand_tilde(&parent_dir) else {
        return Vec::new();
    };
    let Ok(entries) = fs::read_dir(&expanded_parent) else {
        return Vec::new();
    };

    let prefix_lower = prefix.to_lowercase();
    let mut completions: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| !dirs_only || entry.path().is_dir())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') && !prefix.starts_with('.') {
                return None;
            }
            name.to_lowercase()
                .starts_with(&prefix_lower)
                .then(|| join_path(&parent_dir, &name))
        })
        .collect();

    completions.sort();
    completions
}

/// Find the longest common prefix of all completions.
pub fn common_prefix(completions: &[String]) -> String {
    let Some((first, rest)) = completions.split_first() else {
        return String::new();
    };
    let mut prefix_chars = first.chars().count();
    for other in rest {
        let shared = first
            .chars()
            .zip(other.chars())
            .take_while(|(a, b)| a == b)
            .count();
        prefix_chars = prefix_chars.min(shared);
    }
    first.chars().take(prefix_chars).collect()
}

/// Extend `input` as far as the completions agree. A single directory match
/// gets a trailing slash so the next Tab descends into it.
pub fn apply_completion(input: &mut TextInput, dirs_only: bool) -> bool {
    let completions = complete(&input.text, dirs_only);
    if completions.is_empty() {
        return false;
    }
    let mut next = common_prefix(&completions);
    if completions.len() == 1
        && !next.ends_with(is_separator)
        && expand_tilde(&next).is_some_and(|path| path.is_dir())
    {
        next.push('/');
    }
    if next.chars().count() < input.text.chars().count() || next == input.text {
        return false;
    }
    input.set(next);
    true
}

pub fn draw(f: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let editing = state.mode == Mode::EditPath;
    let editable = state.actions().contains(Actions::EDIT_PATH);
    let border_color = if editing {
        theme.notice
    } else if editable {
        theme.border
    } else {
        theme.muted
    };
    let title = if editing {
        ".minecraft path (editing)"
    } else {
        ".minecraft path"
    };
    let style = TextFieldStyle {
        title,
        placeholder: "type the path to your .minecraft folder",
        border_color,
        text_color: if editable { theme.plain } else { theme.muted },
        muted_color: theme.muted,
        focused: editing,
    };
    text_field::draw(f, area, &style, &state.path_input);
}
