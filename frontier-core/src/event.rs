use crate::{
    adapter::{BranchList, StatusReport},
    icon::IconInfo,
    sink::{ConsoleLine, ProgressEvent},
    state::InstallationState,
};
use std::{path::PathBuf, sync::mpsc::Sender};

/// A question a background task is blocked on. The worker waits on the
/// other end of `reply`; dropping the request without answering counts as
/// declining.
#[derive(Debug)]
pub enum PromptRequest {
    Confirm {
        title: String,
        message: String,
        reply: Sender<bool>,
    },
    Path {
        title: String,
        message: String,
        reply: Sender<Option<PathBuf>>,
    },
}

impl PromptRequest {
    pub fn title(&self) -> &str {
        match self {
            Self::Confirm { title, .. } | Self::Path { title, .. } => title,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Confirm { message, .. } | Self::Path { message, .. } => message,
        }
    }

    pub fn wants_path(&self) -> bool {
        matches!(self, Self::Path { .. })
    }
}

/// Events that arrive asynchronously from background tasks.
/// These get merged into the main event loop alongside keyboard input.
#[derive(Debug)]
pub enum AppEvent {
    Console(ConsoleLine),
    Progress(ProgressEvent),
    Prompt(PromptRequest),
    StateChanged(InstallationState),
    BranchesLoaded(BranchList),
    StatusReported(StatusReport),
    IconLoaded(IconInfo),
    /// The running task finished and released its slot
    TaskFinished,
    /// The game launcher was started; the installer should exit
    Launched(PathBuf),
}
