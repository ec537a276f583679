pub mod cli;
pub mod mock;
pub mod progress;
pub mod provider;
pub mod repo;

pub use cli::CliGitProvider;
pub use provider::GitProvider;
pub use repo::{ChangeKind, CommitInfo, FileChange, short_id};
