use crate::{
    adapter::{BranchList, StatusReport},
    constants::{CONSOLE_CAPACITY, MAIN_BRANCH_NAME},
    event::PromptRequest,
    icon::IconInfo,
    platform::expand_tilde,
    sink::{ConsoleLine, ProgressEvent, Tone},
};
use log::info;
use std::{collections::VecDeque, fmt, path::PathBuf};

/// Console lines moved per scroll keypress.
pub const CONSOLE_SCROLL_STEP: usize = 5;
use unicode_segmentation::UnicodeSegmentation;

/// Where the selected game directory stands relative to the modpack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallationState {
    /// No path confirmed yet
    #[default]
    Unconnected,
    /// The confirmed path is missing or empty
    NoInstall,
    /// The path has files but isn't tracking the modpack; the user is being
    /// asked whether to adopt it
    NonManagedInstall,
    /// The path is a work tree of the modpack remote
    Connected,
}

impl InstallationState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unconnected => "Unconnected",
            Self::NoInstall => "NoInstall",
            Self::NonManagedInstall => "NonManagedInstall",
            Self::Connected => "Connected",
        }
    }

    pub fn actions(self) -> Actions {
        match self {
            Self::Unconnected => Actions::EDIT_PATH | Actions::OPEN_DIR,
            Self::NoInstall | Self::NonManagedInstall => {
                Actions::EDIT_PATH | Actions::INSTALL | Actions::OPEN_DIR
            }
            Self::Connected => {
                Actions::UPDATE | Actions::STATUS | Actions::LAUNCH | Actions::OPEN_DIR
            }
        }
    }
}

impl fmt::Display for InstallationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

bitflags::bitflags! {
    /// Controls the user may operate in a given state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Actions: u8 {
        const EDIT_PATH = 1;
        const INSTALL = 1 << 1;
        const UPDATE = 1 << 2;
        const STATUS = 1 << 3;
        const LAUNCH = 1 << 4;
        const OPEN_DIR = 1 << 5;
    }
}

/// What happened when a non-managed directory was offered for adoption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    Declined,
    Installed,
    Failed,
}

/// Pure state transition for a freshly probed path. `adoption` is only
/// consulted for a directory that exists but isn't managed.
pub fn transition(exists: bool, managed: bool, adoption: Adoption) -> InstallationState {
    match (exists, managed, adoption) {
        (false, _, _) => InstallationState::NoInstall,
        (true, true, _) | (true, false, Adoption::Installed) => InstallationState::Connected,
        (true, false, Adoption::Declined | Adoption::Failed) => InstallationState::Unconnected,
    }
}

/// Single-line editable text with a grapheme-aware cursor. `cursor` is a
/// byte offset that always sits on a grapheme boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn boundaries(&self) -> Vec<usize> {
        let mut boundaries: Vec<usize> = self.text.grapheme_indices(true).map(|(i, _)| i).collect();
        boundaries.push(self.text.len());
        boundaries
    }

    /// Snap the cursor onto a boundary and return that boundary's index.
    fn clamp_cursor(&mut self, boundaries: &[usize]) -> usize {
        let cursor = self.cursor.min(self.text.len());
        let idx = match boundaries.binary_search(&cursor) {
            Ok(idx) => idx,
            Err(idx) => idx.saturating_sub(1),
        };
        self.cursor = boundaries.get(idx).copied().unwrap_or(0);
        idx
    }

    pub fn cursor_left(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx > 0 {
            self.cursor = boundaries[idx - 1];
        }
    }

    pub fn cursor_right(&mut self) {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx + 1 < boundaries.len() {
            self.cursor = boundaries[idx + 1];
        }
    }

    pub fn cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn insert_char(&mut self, c: char) {
        let boundaries = self.boundaries();
        self.clamp_cursor(&boundaries);
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Remove the grapheme cluster before the cursor
    pub fn backspace(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx == 0 {
            return false;
        }
        let prev = boundaries[idx - 1];
        self.text.drain(prev..self.cursor);
        self.cursor = prev;
        true
    }

    /// Remove the grapheme cluster under the cursor
    pub fn delete_forward(&mut self) -> bool {
        let boundaries = self.boundaries();
        let idx = self.clamp_cursor(&boundaries);
        if idx + 1 >= boundaries.len() {
            return false;
        }
        let end = boundaries[idx + 1];
        self.text.drain(self.cursor..end);
        true
    }
}

/// Bounded scrollback of console lines; the oldest drop off first.
#[derive(Debug, Clone)]
pub struct Console {
    lines: VecDeque<ConsoleLine>,
    capacity: usize,
}

impl Default for Console {
    fn default() -> Self {
        Self::with_capacity(CONSOLE_CAPACITY)
    }
}

impl Console {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, line: ConsoleLine) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    fn replace_last(&mut self, line: ConsoleLine) {
        match self.lines.back_mut() {
            Some(last) => *last = line,
            None => self.lines.push_back(line),
        }
    }

    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &ConsoleLine> + ExactSizeIterator {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// An informational popup that only needs dismissing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Keyboard drives the installer controls
    Normal,
    /// Keyboard edits the game directory field
    EditPath,
    /// A background task is waiting on `AppState::prompt`
    Prompt { previous: Box<Mode> },
    Notice { previous: Box<Mode> },
}

impl Mode {
    /// Controls hint shown in the footer.
    pub fn hint(&self, prompt_wants_path: bool) -> &'static str {
        match self {
            Mode::Normal => {
                "e edit path  i install  u update  s status  [ ] branch  o open folder  l launch  pgup/pgdn scroll  q quit"
            }
            Mode::EditPath => "enter confirm  tab complete  esc done",
            Mode::Prompt { .. } if prompt_wants_path => "enter accept  tab complete  esc cancel",
            Mode::Prompt { .. } => "y yes  n no",
            Mode::Notice { .. } => "any key to dismiss",
        }
    }
}

/// Everything the installer window shows. Owned by the UI thread and only
/// mutated from the event loop.
pub struct AppState {
    pub install_state: InstallationState,
    pub path_input: TextInput,
    pub prompt_input: TextInput,
    pub branches: BranchList,
    pub selected_branch: usize,
    pub console: Console,
    /// Newest console lines hidden below the view; 0 follows the tail
    pub console_scroll: usize,
    pub progress: Option<ProgressEvent>,
    progress_stage: Option<String>,
    pub mode: Mode,
    pub prompt: Option<PromptRequest>,
    pub notice: Option<Notice>,
    pub error: Option<String>,
    /// Label of the background task currently holding the slot
    pub running_task: Option<String>,
    pub last_status: Option<StatusReport>,
    pub icon: Option<IconInfo>,
}

impl AppState {
    pub fn new(game_dir: &str, default_branch: &str) -> Self {
        Self {
            install_state: InstallationState::Unconnected,
            path_input: TextInput::new(game_dir),
            prompt_input: TextInput::default(),
            branches: BranchList::fallback(default_branch),
            selected_branch: 0,
            console: Console::default(),
            console_scroll: 0,
            progress: None,
            progress_stage: None,
            mode: Mode::EditPath,
            prompt: None,
            notice: None,
            error: None,
            running_task: None,
            last_status: None,
            icon: None,
        }
    }

    pub fn actions(&self) -> Actions {
        self.install_state.actions()
    }

    /// Move to `next`, logging the transition. Leaves path editing when the
    /// new state locks the path.
    pub fn set_state(&mut self, next: InstallationState) {
        let previous = self.install_state;
        info!("transitioning from {previous} -> {next}");
        self.push_console(ConsoleLine::new(
            format!("transitioning from {previous} -> {next}"),
            Tone::Notice,
        ));
        self.install_state = next;
        if !next.actions().contains(Actions::EDIT_PATH) {
            self.mode = Self::settle(std::mem::replace(&mut self.mode, Mode::Normal), next);
        }
        if next != InstallationState::Connected {
            self.last_status = None;
        }
    }

    /// Replace `EditPath` with `Normal` anywhere in a mode stack when
    /// `state` doesn't allow editing.
    fn settle(mode: Mode, state: InstallationState) -> Mode {
        let editable = state.actions().contains(Actions::EDIT_PATH);
        match mode {
            Mode::EditPath if !editable => Mode::Normal,
            Mode::Prompt { previous } => Mode::Prompt {
                previous: Box::new(Self::settle(*previous, state)),
            },
            Mode::Notice { previous } => Mode::Notice {
                previous: Box::new(Self::settle(*previous, state)),
            },
            other => other,
        }
    }

    /// Path the user typed, with `~` expanded.
    pub fn target_path(&self) -> Option<PathBuf> {
        let text = self.path_input.text.trim();
        if text.is_empty() {
            return None;
        }
        expand_tilde(text)
    }

    pub fn selected_branch(&self) -> &str {
        self.branches.get(self.selected_branch)
    }

    pub fn set_branches(&mut self, branches: BranchList) {
        self.branches = branches;
        self.selected_branch = 0;
    }

    /// Step through branches, wrapping at either end.
    pub fn cycle_branch(&mut self, forward: bool) {
        let len = self.branches.len().max(1);
        self.selected_branch = if forward {
            (self.selected_branch + 1) % len
        } else {
            (self.selected_branch + len - 1) % len
        };
    }

    pub fn push_console(&mut self, line: ConsoleLine) {
        self.progress_stage = None;
        self.console_scroll = 0;
        self.console.push(line);
    }

    /// Record progress and mirror it in the console, rewriting the previous
    /// line while the same stage keeps reporting.
    pub fn apply_progress(&mut self, event: ProgressEvent) {
        self.console_scroll = 0;
        let line = ConsoleLine::new(event.to_string(), Tone::Progress);
        if self.progress_stage.as_deref() == Some(event.message.as_str()) {
            self.console.replace_last(line);
        } else {
            self.console.push(line);
            self.progress_stage = Some(event.message.clone());
        }
        self.progress = Some(event);
    }

    /// Move the console view by a few lines, never past the oldest line.
    pub fn scroll_console(&mut self, older: bool) {
        self.console_scroll = if older {
            (self.console_scroll + CONSOLE_SCROLL_STEP).min(self.console.len().saturating_sub(1))
        } else {
            self.console_scroll.saturating_sub(CONSOLE_SCROLL_STEP)
        };
    }

    pub fn open_prompt(&mut self, request: PromptRequest) {
        let previous = std::mem::replace(&mut self.mode, Mode::Normal);
        self.prompt_input.clear();
        self.prompt = Some(request);
        self.mode = Mode::Prompt {
            previous: Box::new(previous),
        };
    }

    /// Reply to the pending prompt and restore the previous mode. A path
    /// prompt accepted with empty text counts as backing out.
    pub fn answer_prompt(&mut self, accept: bool) {
        let Some(request) = self.prompt.take() else {
            return;
        };
        match request {
            PromptRequest::Confirm { reply, .. } => {
                let _ = reply.send(accept);
            }
            PromptRequest::Path { reply, .. } => {
                let answer = accept
                    .then(|| self.prompt_input.text.trim().to_string())
                    .filter(|text| !text.is_empty())
                    .and_then(|text| expand_tilde(&text));
                let _ = reply.send(answer);
            }
        }
        self.prompt_input.clear();
        if let Mode::Prompt { previous } = std::mem::replace(&mut self.mode, Mode::Normal) {
            self.mode = Self::settle(*previous, self.install_state);
        }
    }

    pub fn show_notice(&mut self, title: &str, message: &str) {
        let previous = std::mem::replace(&mut self.mode, Mode::Normal);
        let previous = match previous {
            // Replace rather than stack notices
            Mode::Notice { previous } => previous,
            other => Box::new(other),
        };
        self.notice = Some(Notice {
            title: title.to_string(),
            message: message.to_string(),
        });
        self.mode = Mode::Notice { previous };
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        if let Mode::Notice { previous } = std::mem::replace(&mut self.mode, Mode::Normal) {
            self.mode = Self::settle(*previous, self.install_state);
        }
    }

    /// The text field keystrokes go to in the current mode, if any.
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match &self.mode {
            Mode::EditPath => Some(&mut self.path_input),
            Mode::Prompt { .. } if self.prompt.as_ref().is_some_and(PromptRequest::wants_path) => {
                Some(&mut self.prompt_input)
            }
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("", MAIN_BRANCH_NAME)
    }
}
