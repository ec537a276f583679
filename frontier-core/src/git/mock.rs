use super::{
    provider::GitProvider,
    repo::{CommitInfo, FileChange},
};
use crate::sink::ProgressEvent;
use anyhow::{Result, anyhow};
use std::{
    collections::{HashMap, VecDeque},
    path::{Path, PathBuf},
    sync::Mutex,
};

/// Scripted provider for adapter and workflow tests. Operation results are
/// taken once; an unscripted operation succeeds.
#[derive(Default)]
pub struct MockGitProvider {
    pub work_trees: Mutex<Vec<PathBuf>>,
    pub remote_url: Option<String>,
    pub current_branch: String,
    pub head: Option<CommitInfo>,
    pub remote_tips: HashMap<String, String>,
    pub remote_branches: Vec<String>,
    pub changes: Vec<FileChange>,
    pub dirty: bool,
    /// Emitted through the callback of every network operation.
    pub progress_events: Vec<ProgressEvent>,
    pub init_result: Mutex<Option<Result<()>>>,
    pub add_remote_result: Mutex<Option<Result<()>>>,
    pub fetch_result: Mutex<Option<Result<()>>>,
    pub clone_result: Mutex<Option<Result<()>>>,
    pub reset_result: Mutex<Option<Result<()>>>,
    pub pull_result: Mutex<Option<Result<()>>>,
    pub checkout_results: Mutex<VecDeque<Result<()>>>,
    /// Work tree registered once `clone_repo` or any checkout succeeds.
    pub becomes_work_tree: bool,
    pub calls: Mutex<Vec<String>>,
}

impl MockGitProvider {
    pub fn connected(path: &Path, url: &str) -> Self {
        Self {
            work_trees: Mutex::new(vec![path.to_path_buf()]),
            remote_url: Some(url.to_string()),
            current_branch: "main".to_string(),
            head: Some(CommitInfo {
                id: "abc1234000000000000000000000000000000000".to_string(),
                date: "10-16-2026 09:30".to_string(),
            }),
            remote_branches: vec!["main".to_string()],
            ..Default::default()
        }
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn emit(&self, progress: &dyn Fn(ProgressEvent)) {
        for event in &self.progress_events {
            progress(event.clone());
        }
    }

    fn take(slot: &Mutex<Option<Result<()>>>) -> Result<()> {
        slot.lock().unwrap().take().unwrap_or(Ok(()))
    }

    fn register(&self, path: &Path) {
        if self.becomes_work_tree {
            self.work_trees.lock().unwrap().push(path.to_path_buf());
        }
    }
}

impl GitProvider for MockGitProvider {
    fn is_work_tree(&self, path: &Path) -> bool {
        self.work_trees.lock().unwrap().iter().any(|p| p == path)
    }

    fn remote_url(&self, _path: &Path, _remote: &str) -> Result<Option<String>> {
        Ok(self.remote_url.clone())
    }

    fn init(&self, _path: &Path) -> Result<()> {
        self.record("init");
        Self::take(&self.init_result)
    }

    fn add_remote(&self, _path: &Path, remote: &str, url: &str) -> Result<()> {
        self.record(format!("add_remote {remote} {url}"));
        Self::take(&self.add_remote_result)
    }

    fn fetch(&self, _path: &Path, remote: &str, progress: &dyn Fn(ProgressEvent)) -> Result<()> {
        self.record(format!("fetch {remote}"));
        self.emit(progress);
        Self::take(&self.fetch_result)
    }

    fn clone_repo(&self, url: &str, path: &Path, progress: &dyn Fn(ProgressEvent)) -> Result<()> {
        self.record(format!("clone {url}"));
        self.emit(progress);
        let result = Self::take(&self.clone_result);
        if result.is_ok() {
            self.register(path);
        }
        result
    }

    fn checkout(&self, path: &Path, branch: &str, force: bool) -> Result<()> {
        self.record(if force {
            format!("checkout --force {branch}")
        } else {
            format!("checkout {branch}")
        });
        let result = self
            .checkout_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()));
        if result.is_ok() {
            self.register(path);
        }
        result
    }

    fn reset_hard(&self, _path: &Path) -> Result<()> {
        self.record("reset --hard");
        Self::take(&self.reset_result)
    }

    fn pull(
        &self,
        _path: &Path,
        remote: &str,
        branch: &str,
        progress: &dyn Fn(ProgressEvent),
    ) -> Result<()> {
        self.record(format!("pull {remote} {branch}"));
        self.emit(progress);
        Self::take(&self.pull_result)
    }

    fn is_dirty(&self, _path: &Path) -> Result<bool> {
        Ok(self.dirty)
    }

    fn changed_files(&self, _path: &Path) -> Result<Vec<FileChange>> {
        Ok(self.changes.clone())
    }

    fn current_branch(&self, _path: &Path) -> Result<String> {
        Ok(self.current_branch.clone())
    }

    fn head_commit(&self, _path: &Path) -> Result<CommitInfo> {
        self.head.clone().ok_or_else(|| anyhow!("no commits yet"))
    }

    fn resolve_ref(&self, _path: &Path, reference: &str) -> Result<String> {
        self.remote_tips
            .get(reference)
            .cloned()
            .ok_or_else(|| anyhow!("unknown ref {reference}"))
    }

    fn remote_branches(&self, _path: &Path, _remote: &str) -> Result<Vec<String>> {
        Ok(self.remote_branches.clone())
    }
}
