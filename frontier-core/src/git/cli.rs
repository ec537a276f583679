use super::{
    progress::ProgressSplitter,
    provider::GitProvider,
    repo::{CommitInfo, FileChange, parse_name_status, parse_remote_refs},
};
use crate::{constants::COMMIT_DATE_FORMAT, sink::ProgressEvent};
use anyhow::{Context, Result, bail};
use log::debug;
use std::{
    io::{BufReader, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

pub struct CliGitProvider;

fn git() -> Command {
    let mut cmd = Command::new("git");
    // Never block a worker on a credential prompt nobody can see.
    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

fn git_in(path: &Path) -> Command {
    let mut cmd = git();
    cmd.current_dir(path);
    cmd
}

fn run(cmd: &mut Command, what: &str) -> Result<String> {
    debug!("git {what}");
    let output = cmd
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("failed to run git {what}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("git {what} failed: {}", stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn run_with_progress(
    cmd: &mut Command,
    what: &str,
    on_progress: &dyn Fn(ProgressEvent),
) -> Result<()> {
    debug!("git {what} (streaming progress)");
    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to run git {what}"))?;

    let mut splitter = ProgressSplitter::default();
    if let Some(stderr) = child.stderr.take() {
        for byte in BufReader::new(stderr).bytes() {
            splitter.push(byte?, on_progress);
        }
        splitter.flush(on_progress);
    }

    let status = child.wait()?;
    if !status.success() {
        bail!("git {what} failed: {}", splitter.messages.join("\n"));
    }
    Ok(())
}

impl GitProvider for CliGitProvider {
    fn is_work_tree(&self, path: &Path) -> bool {
        let Ok(output) = git_in(path)
            .args(["rev-parse", "--show-toplevel"])
            .stderr(Stdio::null())
            .output()
        else {
            return false;
        };
        if !output.status.success() {
            return false;
        }
        let top = PathBuf::from(String::from_utf8_lossy(&output.stdout).trim());
        match (dunce::canonicalize(&top), dunce::canonicalize(path)) {
            (Ok(top), Ok(path)) => top == path,
            _ => false,
        }
    }

    fn remote_url(&self, path: &Path, remote: &str) -> Result<Option<String>> {
        let remotes = run(git_in(path).arg("remote"), "remote")?;
        if !remotes.lines().any(|name| name.trim() == remote) {
            return Ok(None);
        }
        let url = run(
            git_in(path).args(["remote", "get-url", remote]),
            "remote get-url",
        )?;
        Ok(Some(url.trim().to_string()))
    }

    fn init(&self, path: &Path) -> Result<()> {
        run(git().arg("init").arg(path), "init").map(drop)
    }

    fn add_remote(&self, path: &Path, remote: &str, url: &str) -> Result<()> {
        run(
            git_in(path).args(["remote", "add", remote, url]),
            "remote add",
        )
        .map(drop)
    }

    fn fetch(&self, path: &Path, remote: &str, progress: &dyn Fn(ProgressEvent)) -> Result<()> {
        run_with_progress(
            git_in(path).args(["fetch", "--progress", remote]),
            "fetch",
            progress,
        )
    }

    fn clone_repo(&self, url: &str, path: &Path, progress: &dyn Fn(ProgressEvent)) -> Result<()> {
        run_with_progress(
            git().args(["clone", "--progress", url]).arg(path),
            "clone",
            progress,
        )
    }

    fn checkout(&self, path: &Path, branch: &str, force: bool) -> Result<()> {
        let mut cmd = git_in(path);
        cmd.arg("checkout");
        if force {
            cmd.arg("--force");
        }
        cmd.arg(branch);
        run(&mut cmd, "checkout").map(drop)
    }

    fn reset_hard(&self, path: &Path) -> Result<()> {
        run(git_in(path).args(["reset", "--hard"]), "reset --hard").map(drop)
    }

    fn pull(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
        progress: &dyn Fn(ProgressEvent),
    ) -> Result<()> {
        run_with_progress(
            git_in(path).args(["pull", "--progress", remote, branch]),
            "pull",
            progress,
        )
    }

    fn is_dirty(&self, path: &Path) -> Result<bool> {
        let output = run(
            git_in(path).args(["status", "--porcelain", "--untracked-files=no"]),
            "status",
        )?;
        Ok(!output.trim().is_empty())
    }

    fn changed_files(&self, path: &Path) -> Result<Vec<FileChange>> {
        let output = run(git_in(path).args(["diff", "--name-status"]), "diff")?;
        Ok(parse_name_status(&output))
    }

    fn current_branch(&self, path: &Path) -> Result<String> {
        let output = run(
            git_in(path).args(["symbolic-ref", "--short", "HEAD"]),
            "symbolic-ref",
        )?;
        Ok(output.trim().to_string())
    }

    fn head_commit(&self, path: &Path) -> Result<CommitInfo> {
        let date_arg = format!("--date=format:{COMMIT_DATE_FORMAT}");
        let output = run(
            git_in(path).args(["log", "-1", "--format=%H%n%cd", &date_arg]),
            "log",
        )?;
        let mut lines = output.lines();
        let (Some(id), Some(date)) = (lines.next(), lines.next()) else {
            bail!("unexpected git log output: {output}");
        };
        Ok(CommitInfo {
            id: id.trim().to_string(),
            date: date.trim().to_string(),
        })
    }

    fn resolve_ref(&self, path: &Path, reference: &str) -> Result<String> {
        let output = run(
            git_in(path).args(["rev-parse", "--verify", reference]),
            "rev-parse",
        )?;
        Ok(output.trim().to_string())
    }

    fn remote_branches(&self, path: &Path, remote: &str) -> Result<Vec<String>> {
        let pattern = format!("refs/remotes/{remote}/");
        let output = run(
            git_in(path).args(["for-each-ref", "--format=%(refname)", &pattern]),
            "for-each-ref",
        )?;
        Ok(parse_remote_refs(&output, remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::ChangeKind;
    use std::fs;
    use tempfile::tempdir;

    fn git_ok(dir: &Path, args: &[&str]) {
        let output = Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    fn configure_identity(dir: &Path) {
        git_ok(dir, &["config", "user.email", "test@test.com"]);
        git_ok(dir, &["config", "user.name", "Test"]);
    }

    /// A source repository with one commit on `main`.
    fn init_origin(dir: &Path) {
        git_ok(dir, &["init"]);
        configure_identity(dir);
        fs::write(dir.join("README.md"), "# modpack").unwrap();
        fs::create_dir_all(dir.join("mods")).unwrap();
        fs::write(dir.join("mods/core.jar"), "v1").unwrap();
        git_ok(dir, &["add", "."]);
        git_ok(dir, &["commit", "-m", "init"]);
        git_ok(dir, &["branch", "-M", "main"]);
    }

    fn head_of(dir: &Path) -> String {
        let output = Command::new("git")
            .args(["rev-parse", "HEAD"])
            .current_dir(dir)
            .output()
            .unwrap();
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    fn url_of(dir: &Path) -> String {
        dir.to_string_lossy().into_owned()
    }

    #[test]
    fn test_is_work_tree_only_at_top_level() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_origin(&origin);

        let provider = CliGitProvider;
        assert!(provider.is_work_tree(&origin));
        assert!(!provider.is_work_tree(&origin.join("mods")));
        assert!(!provider.is_work_tree(tmp.path()));
        assert!(!provider.is_work_tree(&tmp.path().join("missing")));
    }

    #[test]
    fn test_remote_url_none_until_added() {
        let tmp = tempdir().unwrap();
        let provider = CliGitProvider;
        provider.init(tmp.path()).unwrap();
        assert_eq!(provider.remote_url(tmp.path(), "origin").unwrap(), None);

        provider
            .add_remote(tmp.path(), "origin", "https://example.com/pack.git")
            .unwrap();
        assert_eq!(
            provider.remote_url(tmp.path(), "origin").unwrap().as_deref(),
            Some("https://example.com/pack.git")
        );
    }

    #[test]
    fn test_clone_lists_remote_branches_and_head() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_origin(&origin);
        git_ok(&origin, &["branch", "beta"]);
        git_ok(tmp.path(), &["clone", "--bare", "origin", "remote.git"]);

        let install = tmp.path().join("install");
        let provider = CliGitProvider;
        provider
            .clone_repo(&url_of(&tmp.path().join("remote.git")), &install, &|_| {})
            .unwrap();

        assert!(provider.is_work_tree(&install));
        assert_eq!(provider.current_branch(&install).unwrap(), "main");
        let mut branches = provider.remote_branches(&install, "origin").unwrap();
        branches.sort();
        assert_eq!(branches, vec!["beta".to_string(), "main".to_string()]);

        let head = provider.head_commit(&install).unwrap();
        assert_eq!(head.id, head_of(&origin));
        assert_eq!(head.date.len(), "10-16-2026 12:00".len());
        assert_eq!(
            provider
                .resolve_ref(&install, "refs/remotes/origin/main")
                .unwrap(),
            head.id
        );
    }

    #[test]
    fn test_dirty_tracks_only_tracked_files() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_origin(&origin);
        let provider = CliGitProvider;

        assert!(!provider.is_dirty(&origin).unwrap());
        fs::write(origin.join("untracked.txt"), "new").unwrap();
        assert!(!provider.is_dirty(&origin).unwrap());

        fs::write(origin.join("README.md"), "# changed").unwrap();
        fs::remove_file(origin.join("mods/core.jar")).unwrap();
        assert!(provider.is_dirty(&origin).unwrap());

        let changes = provider.changed_files(&origin).unwrap();
        assert_eq!(changes.len(), 2);
        assert!(
            changes
                .iter()
                .any(|c| c.kind == ChangeKind::Modified && c.path == "README.md")
        );
        assert!(
            changes
                .iter()
                .any(|c| c.kind == ChangeKind::Deleted && c.path == "mods/core.jar")
        );

        provider.reset_hard(&origin).unwrap();
        assert!(!provider.is_dirty(&origin).unwrap());
        assert!(origin.join("untracked.txt").exists());
    }

    #[test]
    fn test_checkout_over_existing_files_needs_force() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_origin(&origin);

        let install = tmp.path().join("install");
        fs::create_dir_all(install.join("mods")).unwrap();
        fs::write(install.join("mods/core.jar"), "local copy").unwrap();
        fs::write(install.join("options.txt"), "keep me").unwrap();

        let provider = CliGitProvider;
        provider.init(&install).unwrap();
        provider
            .add_remote(&install, "origin", &url_of(&origin))
            .unwrap();
        provider.fetch(&install, "origin", &|_| {}).unwrap();

        let err = provider.checkout(&install, "main", false).unwrap_err();
        assert!(err.to_string().contains("git checkout failed"));

        provider.checkout(&install, "main", true).unwrap();
        assert_eq!(fs::read_to_string(install.join("mods/core.jar")).unwrap(), "v1");
        assert_eq!(fs::read_to_string(install.join("options.txt")).unwrap(), "keep me");
        assert!(provider.is_work_tree(&install));
    }

    #[test]
    fn test_pull_brings_in_new_commits() {
        let tmp = tempdir().unwrap();
        let origin = tmp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_origin(&origin);
        let install = tmp.path().join("install");
        let provider = CliGitProvider;
        provider.clone_repo(&url_of(&origin), &install, &|_| {}).unwrap();

        fs::write(origin.join("mods/core.jar"), "v2").unwrap();
        git_ok(&origin, &["commit", "-am", "bump"]);

        provider.fetch(&install, "origin", &|_| {}).unwrap();
        assert_eq!(
            provider
                .resolve_ref(&install, "refs/remotes/origin/main")
                .unwrap(),
            head_of(&origin)
        );
        assert_ne!(provider.head_commit(&install).unwrap().id, head_of(&origin));

        provider.pull(&install, "origin", "main", &|_| {}).unwrap();
        assert_eq!(provider.head_commit(&install).unwrap().id, head_of(&origin));
        assert_eq!(fs::read_to_string(install.join("mods/core.jar")).unwrap(), "v2");
    }

    #[test]
    fn test_clone_failure_reports_git_message() {
        let tmp = tempdir().unwrap();
        let provider = CliGitProvider;
        let err = provider
            .clone_repo(
                &url_of(&tmp.path().join("nowhere")),
                &tmp.path().join("install"),
                &|_| {},
            )
            .unwrap_err();
        assert!(err.to_string().starts_with("git clone failed"));
    }
}
