//! Repository adapter: the only code that talks to the git provider on
//! behalf of the installer. Failures are written to the console with their
//! severity before being returned, so callers only need the outcome.

use crate::{
    constants::{MAIN_BRANCH_NAME, REMOTE_NAME, REPO_URL, REPO_URL_SSH},
    git::{FileChange, GitProvider, short_id},
    sink::{ConsoleLine, Tone, UiSink},
};
use anyhow::Result;
use log::{info, warn};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

pub const OVERWRITE_TITLE: &str = "WARNING: Overwrite files";
pub const DIRTY_UPDATE_TITLE: &str = "Warning";

/// Where the modpack lives and which branch installs track by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSpec {
    pub url: String,
    pub ssh_url: String,
    pub default_branch: String,
}

impl Default for RemoteSpec {
    fn default() -> Self {
        Self {
            url: REPO_URL.to_string(),
            ssh_url: REPO_URL_SSH.to_string(),
            default_branch: MAIN_BRANCH_NAME.to_string(),
        }
    }
}

impl RemoteSpec {
    pub fn accepts(&self, url: &str) -> bool {
        url == self.url || url == self.ssh_url
    }
}

/// Proof that a directory was verified as a work tree of the modpack
/// remote. Only [`RepositoryAdapter::check`] creates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoHandle {
    path: PathBuf,
    remote_url: String,
}

impl RepoHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remote_url(&self) -> &str {
        &self.remote_url
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("{0} is not a Git repository.")]
    NotARepo(PathBuf),
    #[error("Remote URL does not match the expected repository.")]
    RemoteMismatch { found: Option<String> },
    #[error("Error checking repository: {0}")]
    Git(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    /// The user refused to overwrite files that blocked checkout.
    Declined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    UpToDate,
    NewerAvailable { remote_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub branch: String,
    pub commit_id: String,
    pub commit_date: String,
    pub dirty: bool,
    pub changes: Vec<FileChange>,
    pub freshness: Freshness,
}

/// Remote branch names, never empty. The first entry is the default
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchList {
    names: Vec<String>,
}

impl BranchList {
    /// The default branch, when present, moves to the front. An empty list
    /// falls back to the default branch alone.
    pub fn new(mut names: Vec<String>, default_branch: &str) -> Self {
        if names.is_empty() {
            return Self::fallback(default_branch);
        }
        if let Some(index) = names.iter().position(|name| name == default_branch) {
            let default = names.remove(index);
            names.insert(0, default);
        }
        Self { names }
    }

    pub fn fallback(default_branch: &str) -> Self {
        Self {
            names: vec![default_branch.to_string()],
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, index: usize) -> &str {
        self.names
            .get(index)
            .or_else(|| self.names.first())
            .map_or("", String::as_str)
    }
}

pub struct RepositoryAdapter {
    git: Arc<dyn GitProvider>,
    remote: RemoteSpec,
}

impl RepositoryAdapter {
    pub fn new(git: Arc<dyn GitProvider>, remote: RemoteSpec) -> Self {
        Self { git, remote }
    }

    pub fn remote(&self) -> &RemoteSpec {
        &self.remote
    }

    /// Verify `path` is the top of a work tree whose `origin` is the
    /// modpack remote.
    pub fn check(&self, path: &Path, ui: &dyn UiSink) -> Result<RepoHandle, CheckError> {
        let result = self.check_inner(path);
        match &result {
            Ok(handle) => info!("{} tracks {}", path.display(), handle.remote_url),
            Err(err @ CheckError::NotARepo(_)) => ui.log(Tone::Notice, &err.to_string()),
            Err(err) => ui.log(Tone::Error, &err.to_string()),
        }
        result
    }

    fn check_inner(&self, path: &Path) -> Result<RepoHandle, CheckError> {
        if !self.git.is_work_tree(path) {
            return Err(CheckError::NotARepo(path.to_path_buf()));
        }
        let found = self
            .git
            .remote_url(path, REMOTE_NAME)
            .map_err(|e| CheckError::Git(format!("{e:#}")))?;
        match found {
            Some(url) if self.remote.accepts(&url) => Ok(RepoHandle {
                path: path.to_path_buf(),
                remote_url: url,
            }),
            found => {
                warn!("{} has remote {found:?}", path.display());
                Err(CheckError::RemoteMismatch { found })
            }
        }
    }

    /// Turn an existing directory into a work tree of the modpack: init,
    /// add the remote, fetch, check out the default branch. Files that
    /// block checkout are only overwritten after the user agrees.
    pub fn install_fresh(&self, path: &Path, ui: &dyn UiSink) -> Result<InstallOutcome> {
        let result = self.install_fresh_inner(path, ui);
        if let Err(e) = &result {
            warn!("install at {} failed: {e:#}", path.display());
            ui.log(Tone::Error, &format!("Install failed: {e:#}"));
        }
        result
    }

    fn install_fresh_inner(&self, path: &Path, ui: &dyn UiSink) -> Result<InstallOutcome> {
        ui.log(Tone::Notice, &format!("init'ing git repo at {}", path.display()));
        self.git.init(path)?;
        ui.log(Tone::Notice, &format!("adding remote url {}", self.remote.url));
        self.git.add_remote(path, REMOTE_NAME, &self.remote.url)?;
        ui.log(Tone::Notice, "fetching remote on network...");
        self.git.fetch(path, REMOTE_NAME, &|event| ui.progress(event))?;
        ui.log(Tone::Plain, "done. installing..");

        let branch = &self.remote.default_branch;
        if let Err(e) = self.git.checkout(path, branch, false) {
            let message = format!(
                "Installing will overwrite files in your minecraft folder that the modpack also ships.\n\
                 Files that only exist locally are left alone.\n\nContinue?\n\nFrom git: {e:#}"
            );
            if !ui.confirm(OVERWRITE_TITLE, &message) {
                ui.log(Tone::Caution, "install cancelled, no files were overwritten");
                ui.log(
                    Tone::Caution,
                    &format!(
                        "{} now holds an empty repository; delete it before installing again",
                        path.join(".git").display()
                    ),
                );
                return Ok(InstallOutcome::Declined);
            }
            ui.log(Tone::Caution, "forcing overwrites...");
            self.git.checkout(path, branch, true)?;
        }
        Ok(InstallOutcome::Installed)
    }

    /// Clone the modpack into a path that is missing or empty.
    pub fn clone_fresh(&self, path: &Path, ui: &dyn UiSink) -> Result<()> {
        ui.log(Tone::Notice, &format!("Cloning repository into {}...", path.display()));
        match self
            .git
            .clone_repo(&self.remote.url, path, &|event| ui.progress(event))
        {
            Ok(()) => {
                ui.log(Tone::Success, "Clone successful!");
                Ok(())
            }
            Err(e) => {
                warn!("clone into {} failed: {e:#}", path.display());
                ui.log(Tone::Error, &format!("Clone failed: {e:#}"));
                Err(e)
            }
        }
    }

    /// Report branch, head, local modifications, and whether the remote tip
    /// of the current branch differs from HEAD.
    pub fn status(&self, path: &Path, verbose: bool, ui: &dyn UiSink) -> Result<StatusReport> {
        let result = self.status_inner(path, verbose, ui);
        if let Err(e) = &result {
            warn!("status of {} failed: {e:#}", path.display());
            ui.log(Tone::Error, &format!("Git command error: {e:#}"));
        }
        result
    }

    fn status_inner(&self, path: &Path, verbose: bool, ui: &dyn UiSink) -> Result<StatusReport> {
        let branch = self.git.current_branch(path)?;
        let commit = self.git.head_commit(path)?;
        let changes = self.git.changed_files(path)?;
        let dirty = !changes.is_empty() || self.git.is_dirty(path)?;

        ui.log(Tone::Status, &format!(">> status: on branch '{branch}'"));
        ui.log(
            Tone::Status,
            &format!(
                ">> commit: {} ({}) <{}>",
                commit.short_id(),
                if dirty { "dirty" } else { "clean" },
                commit.date
            ),
        );
        if verbose {
            for change in &changes {
                ui.console(ConsoleLine::new(
                    format!(">> [{}] {}", change.kind.code(), change.path),
                    change.kind.tone(),
                ));
            }
        }

        ui.log(Tone::Notice, "Checking for new remote versions...");
        self.git.fetch(path, REMOTE_NAME, &|_| {})?;
        let remote_id = self
            .git
            .resolve_ref(path, &format!("refs/remotes/{REMOTE_NAME}/{branch}"))?;

        let freshness = if remote_id == commit.id {
            ui.log(
                Tone::Success,
                &format!("You are up-to-date with version '{branch}'"),
            );
            Freshness::UpToDate
        } else {
            ui.log(
                Tone::Caution,
                &format!(
                    "!! A newer version {} is available on the remote branch '{branch}'",
                    short_id(&remote_id)
                ),
            );
            Freshness::NewerAvailable { remote_id }
        };

        Ok(StatusReport {
            branch,
            commit_id: commit.id,
            commit_date: commit.date,
            dirty,
            changes,
            freshness,
        })
    }

    /// Bring `branch` up to date with the remote. Tracked modifications are
    /// discarded only after the user confirms; untracked files survive.
    pub fn update(&self, path: &Path, branch: &str, ui: &dyn UiSink) -> Result<UpdateOutcome> {
        let result = self.update_inner(path, branch, ui);
        if let Err(e) = &result {
            warn!("update of {} to {branch} failed: {e:#}", path.display());
            ui.log(Tone::Error, &format!("Update failed: {e:#}"));
        }
        result
    }

    fn update_inner(&self, path: &Path, branch: &str, ui: &dyn UiSink) -> Result<UpdateOutcome> {
        if self.git.is_dirty(path)? {
            let message = "You have modified files that the modpack tracks.\n\
                           Updating will discard those changes. Files you added yourself are kept.\n\n\
                           Continue with the update?";
            if !ui.confirm(DIRTY_UPDATE_TITLE, message) {
                ui.log(
                    Tone::Caution,
                    "Update cancelled: user cancelled to check modifications",
                );
                return Ok(UpdateOutcome::Cancelled);
            }
            ui.log(Tone::Caution, "discarding local modifications...");
            self.git.reset_hard(path)?;
        }

        ui.log(Tone::Notice, "fetching remote on network...");
        self.git.fetch(path, REMOTE_NAME, &|event| ui.progress(event))?;
        self.git.checkout(path, branch, false)?;
        self.git
            .pull(path, REMOTE_NAME, branch, &|event| ui.progress(event))?;
        ui.log(Tone::Success, &format!("Update on {branch} successful"));
        Ok(UpdateOutcome::Updated)
    }

    /// Fetch and list the remote's branches, falling back to the default
    /// branch when anything goes wrong.
    pub fn list_branches(&self, path: &Path, ui: &dyn UiSink) -> BranchList {
        let fetched = self
            .git
            .fetch(path, REMOTE_NAME, &|_| {})
            .and_then(|()| self.git.remote_branches(path, REMOTE_NAME));
        match fetched {
            Ok(names) => BranchList::new(names, &self.remote.default_branch),
            Err(e) => {
                warn!("listing branches of {} failed: {e:#}", path.display());
                ui.log(Tone::Error, &format!("Error fetching branches: {e:#}"));
                BranchList::fallback(&self.remote.default_branch)
            }
        }
    }
}
