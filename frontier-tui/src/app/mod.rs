mod actions;
mod spawn;

use crate::{components, keymap, theme::Theme};
use actions::{
    handle_complete_path, handle_confirm_path, handle_edit_path, handle_input, handle_install,
    handle_launch, handle_open_dir, handle_status, handle_update,
};
use crossterm::event::{self, Event, KeyEventKind};
use frontier_core::{
    action::Action,
    adapter::RepositoryAdapter,
    event::{AppEvent, PromptRequest},
    platform::HostOs,
    sink::{ConsoleLine, ProgressEvent, Tone, UiSink},
    state::{AppState, Mode},
    task::TaskSerializer,
};
use log::info;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use std::{
    path::PathBuf,
    sync::{Arc, mpsc},
    time::{Duration, Instant},
};

/// What to do after the TUI exits
#[derive(Debug, PartialEq, Eq)]
pub enum ExitReason {
    /// The game launcher at this path was started
    Launched(PathBuf),
    Quit,
}

/// Everything a background task needs, shared with every worker thread.
#[derive(Clone)]
pub struct Services {
    pub adapter: Arc<RepositoryAdapter>,
    pub tasks: TaskSerializer,
    pub os: HostOs,
    pub launcher_default: PathBuf,
    pub icon_url: String,
}

/// Handle for dispatching background work
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }
}

/// Workers talk to the UI through the event channel. Prompts block the
/// worker until the UI thread replies; a reply channel closed without an
/// answer (the app quit) reads as a refusal.
impl UiSink for EventSender {
    fn console(&self, line: ConsoleLine) {
        info!("{}", line.text);
        self.send(AppEvent::Console(line));
    }

    fn progress(&self, event: ProgressEvent) {
        self.send(AppEvent::Progress(event));
    }

    fn confirm(&self, title: &str, message: &str) -> bool {
        let (reply, answer) = mpsc::channel();
        self.send(AppEvent::Prompt(PromptRequest::Confirm {
            title: title.to_string(),
            message: message.to_string(),
            reply,
        }));
        answer.recv().unwrap_or(false)
    }

    fn ask_path(&self, title: &str, message: &str) -> Option<PathBuf> {
        let (reply, answer) = mpsc::channel();
        self.send(AppEvent::Prompt(PromptRequest::Path {
            title: title.to_string(),
            message: message.to_string(),
            reply,
        }));
        answer.recv().ok().flatten()
    }
}

const TASK_RUNNING_TITLE: &str = "Task Running";
const TASK_RUNNING_MESSAGE: &str =
    "A task is still running and cannot be interrupted. Quit again once it has finished.";

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const BOOT_LINES: [(&str, Tone); 3] = [
    ("Frontier - Forge Minecraft Server 2025", Tone::Status),
    (
        "Welcome to the Frontier Client Modpack Installer/Updater",
        Tone::Plain,
    ),
    (
        "Confirm your .minecraft path above to get started",
        Tone::Notice,
    ),
];

fn boot(state: &mut AppState) {
    for (text, tone) in BOOT_LINES {
        state.push_console(ConsoleLine::new(text, tone));
    }
}

pub fn run(
    terminal: &mut DefaultTerminal,
    state: &mut AppState,
    services: &Services,
    theme: &Theme,
) -> anyhow::Result<ExitReason> {
    let (tx, rx) = mpsc::channel::<AppEvent>();
    let event_sender = EventSender { tx };
    let spinner_start = Instant::now();

    boot(state);
    spawn::spawn_icon_fetch(services, &event_sender);

    loop {
        terminal.draw(|f| draw(f, state, theme, &spinner_start))?;

        // Check background channel (non-blocking)
        if let Ok(app_event) = rx.try_recv() {
            if let Some(exit) = process_app_event(app_event, state) {
                return Ok(exit);
            }
            continue;
        }

        // Poll terminal events with a timeout so we can update spinner + check channel
        if event::poll(Duration::from_millis(80))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            // Clear error on any keypress
            state.error = None;

            if let Some(action) = keymap::resolve_action(key, state)
                && let Some(exit) = process_action(action, state, services, &event_sender)
            {
                return Ok(exit);
            }
        }
    }
}

fn draw(f: &mut Frame, state: &AppState, theme: &Theme, spinner_start: &Instant) {
    let elapsed = usize::try_from(spinner_start.elapsed().as_millis()).unwrap_or(0);
    let spinner = SPINNER_FRAMES[(elapsed / 80) % SPINNER_FRAMES.len()];

    let error_rows = u16::from(state.error.is_some());
    let [header, path, console, progress, controls, hint, error] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(5),
        Constraint::Length(1),
        Constraint::Length(error_rows),
    ])
    .areas(f.area());

    components::header::draw(f, header, state, theme, spinner);
    components::path_field::draw(f, path, state, theme);
    components::console::draw(f, console, state, theme);
    components::progress::draw(f, progress, state, theme);
    components::controls::draw(f, controls, state, theme);
    components::controls::draw_hint(f, hint, state, theme);
    components::error_bar::draw(f, error, state, theme);

    // Dialogs go on top of everything else
    components::prompt::draw(f, f.area(), state, theme);
}

/// Handle events from background tasks
fn process_app_event(event: AppEvent, state: &mut AppState) -> Option<ExitReason> {
    match event {
        AppEvent::Console(line) => state.push_console(line),
        AppEvent::Progress(progress) => state.apply_progress(progress),
        AppEvent::Prompt(request) => state.open_prompt(request),
        AppEvent::StateChanged(next) => state.set_state(next),
        AppEvent::BranchesLoaded(branches) => state.set_branches(branches),
        AppEvent::StatusReported(report) => state.last_status = Some(report),
        AppEvent::IconLoaded(icon) => state.icon = Some(icon),
        AppEvent::TaskFinished => state.running_task = None,
        AppEvent::Launched(launcher) => return Some(ExitReason::Launched(launcher)),
    }
    None
}

#[allow(clippy::needless_pass_by_value)]
fn process_action(
    action: Action,
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
) -> Option<ExitReason> {
    match action {
        Action::Quit => {
            if state.prompt.is_some() {
                // The worker is blocked on the prompt; declining lets it wind down
                state.answer_prompt(false);
                return Some(ExitReason::Quit);
            }
            if services.tasks.is_busy() {
                // git must not lose its stderr reader mid-operation
                state.show_notice(TASK_RUNNING_TITLE, TASK_RUNNING_MESSAGE);
                return None;
            }
            return Some(ExitReason::Quit);
        }

        Action::EditPath => handle_edit_path(state),
        Action::StopEditing => {
            if state.mode == Mode::EditPath {
                state.mode = Mode::Normal;
            }
        }
        Action::ConfirmPath => handle_confirm_path(state, services, sender),
        Action::CompletePath => handle_complete_path(state),

        Action::InputPush(_)
        | Action::InputPop
        | Action::InputDelete
        | Action::CursorLeft
        | Action::CursorRight
        | Action::CursorStart
        | Action::CursorEnd => handle_input(&action, state),

        Action::Install => handle_install(state, services, sender),
        Action::Update => handle_update(state, services, sender),
        Action::Status => handle_status(state, services, sender),
        Action::OpenDir => handle_open_dir(state, services, sender),
        Action::Launch => handle_launch(state, services, sender),
        Action::ScrollConsoleUp => state.scroll_console(true),
        Action::ScrollConsoleDown => state.scroll_console(false),
        Action::NextBranch => state.cycle_branch(true),
        Action::PrevBranch => state.cycle_branch(false),

        Action::Accept => state.answer_prompt(true),
        Action::Decline => state.answer_prompt(false),
        Action::DismissNotice => state.dismiss_notice(),
    }

    None
}
