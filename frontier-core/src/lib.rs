pub mod action;
pub mod adapter;
pub mod config;
pub mod constants;
pub mod event;
pub mod git;
pub mod icon;
pub mod launcher;
pub mod platform;
pub mod sink;
pub mod state;
pub mod task;
pub mod workflow;

// Re-export commonly used types at crate root
pub use action::Action;
pub use adapter::{BranchList, RepoHandle, RepositoryAdapter, StatusReport};
pub use config::Config;
pub use event::{AppEvent, PromptRequest};
pub use git::GitProvider;
pub use platform::HostOs;
pub use sink::{ConsoleLine, ProgressEvent, Tone, UiSink};
pub use state::{Actions, AppState, InstallationState, Mode};
pub use task::{Busy, TaskSerializer, TaskToken};
