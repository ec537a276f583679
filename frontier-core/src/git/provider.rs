use super::repo::{CommitInfo, FileChange};
use crate::sink::ProgressEvent;
use anyhow::Result;
use std::path::Path;

/// Primitive git operations the repository adapter composes. Every network
/// operation reports progress through the supplied callback.
pub trait GitProvider: Send + Sync {
    /// True only when `path` is the top level of a work tree, not a
    /// subdirectory of one.
    fn is_work_tree(&self, path: &Path) -> bool;
    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>>;
    fn init(&self, path: &Path) -> Result<()>;
    fn add_remote(&self, path: &Path, remote: &str, url: &str) -> Result<()>;
    fn fetch(&self, path: &Path, remote: &str, progress: &dyn Fn(ProgressEvent)) -> Result<()>;
    fn clone_repo(&self, url: &str, path: &Path, progress: &dyn Fn(ProgressEvent)) -> Result<()>;
    fn checkout(&self, path: &Path, branch: &str, force: bool) -> Result<()>;
    fn reset_hard(&self, path: &Path) -> Result<()>;
    fn pull(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
        progress: &dyn Fn(ProgressEvent),
    ) -> Result<()>;
    /// Tracked modifications only; untracked files never count.
    fn is_dirty(&self, path: &Path) -> Result<bool>;
    fn changed_files(&self, path: &Path) -> Result<Vec<FileChange>>;
    fn current_branch(&self, path: &Path) -> Result<String>;
    fn head_commit(&self, path: &Path) -> Result<CommitInfo>;
    fn resolve_ref(&self, path: &Path, reference: &str) -> Result<String>;
    fn remote_branches(&self, path: &Path, remote: &str) -> Result<Vec<String>>;
}
