use crate::{
    constants::LAUNCHER_CACHE_FILE,
    sink::{Tone, UiSink},
};
use anyhow::{Context, Result};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

pub const NOT_FOUND_TITLE: &str = "Launcher Not Found";
pub const SELECT_TITLE: &str = "Select Minecraft Launcher";

pub fn marker_path(game_dir: &Path) -> PathBuf {
    game_dir.join(LAUNCHER_CACHE_FILE)
}

/// Launcher path remembered from a previous launch, if any.
pub fn read_marker(game_dir: &Path) -> Option<PathBuf> {
    let contents = fs::read_to_string(marker_path(game_dir)).ok()?;
    let line = contents.lines().next()?.trim();
    (!line.is_empty()).then(|| PathBuf::from(line))
}

pub fn write_marker(game_dir: &Path, launcher: &Path) -> Result<()> {
    let marker = marker_path(game_dir);
    fs::write(&marker, format!("{}\n", launcher.display()))
        .with_context(|| format!("failed to write {}", marker.display()))
}

/// Find the launcher, asking the user to browse for it while the candidate
/// doesn't exist. Returns `None` when the user gives up.
pub fn resolve_launcher(game_dir: &Path, default: &Path, ui: &dyn UiSink) -> Option<PathBuf> {
    let mut candidate = read_marker(game_dir).unwrap_or_else(|| default.to_path_buf());
    while !candidate.is_file() {
        ui.log(Tone::Error, &format!("no launcher at {}", candidate.display()));
        let message = format!(
            "The Minecraft launcher was not found at:\n{}\n\nDo you want to browse for the launcher?",
            candidate.display()
        );
        let browsed = ui
            .confirm(NOT_FOUND_TITLE, &message)
            .then(|| ui.ask_path(SELECT_TITLE, "Path to the launcher executable"))
            .flatten();
        let Some(path) = browsed else {
            ui.log(Tone::Caution, "User aborted launch");
            return None;
        };
        candidate = path;
    }

    ui.log(Tone::Success, &format!("found launcher at {}", candidate.display()));
    if let Err(e) = write_marker(game_dir, &candidate) {
        warn!("{e:#}");
        ui.log(Tone::Caution, &format!("could not remember launcher path: {e:#}"));
    }
    Some(candidate)
}

/// Start the launcher without tying it to this process's stdio.
pub fn spawn_detached(launcher: &Path) -> Result<()> {
    let mut cmd = Command::new(launcher);
    if let Some(dir) = launcher.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }
    let child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("failed to start {}", launcher.display()))?;
    info!("launcher started with pid {}", child.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::mock::RecordingSink;
    use tempfile::tempdir;

    #[test]
    fn test_marker_round_trip() {
        let tmp = tempdir().unwrap();
        assert_eq!(read_marker(tmp.path()), None);
        write_marker(tmp.path(), Path::new("/opt/mc/launcher")).unwrap();
        assert_eq!(
            read_marker(tmp.path()),
            Some(PathBuf::from("/opt/mc/launcher"))
        );
    }

    #[test]
    fn test_blank_marker_ignored() {
        let tmp = tempdir().unwrap();
        fs::write(marker_path(tmp.path()), "\n").unwrap();
        assert_eq!(read_marker(tmp.path()), None);
    }

    #[test]
    fn test_default_launcher_found_is_remembered() {
        let tmp = tempdir().unwrap();
        let launcher = tmp.path().join("launcher");
        fs::write(&launcher, "").unwrap();
        let sink = RecordingSink::default();

        let found = resolve_launcher(tmp.path(), &launcher, &sink);
        assert_eq!(found.as_deref(), Some(launcher.as_path()));
        assert!(sink.prompt_titles().is_empty());
        assert_eq!(read_marker(tmp.path()), Some(launcher));
        assert!(sink.has_line("found launcher at"));
    }

    #[test]
    fn test_marker_wins_over_default() {
        let tmp = tempdir().unwrap();
        let cached = tmp.path().join("cached-launcher");
        fs::write(&cached, "").unwrap();
        write_marker(tmp.path(), &cached).unwrap();

        let found = resolve_launcher(
            tmp.path(),
            &tmp.path().join("missing"),
            &RecordingSink::default(),
        );
        assert_eq!(found, Some(cached));
    }

    #[test]
    fn test_declining_browse_aborts() {
        let tmp = tempdir().unwrap();
        let sink = RecordingSink::answering(&[false]);
        let found = resolve_launcher(tmp.path(), &tmp.path().join("missing"), &sink);
        assert_eq!(found, None);
        assert_eq!(sink.prompt_titles(), vec![NOT_FOUND_TITLE.to_string()]);
        assert_eq!(sink.tone_of("no launcher at"), Some(Tone::Error));
        assert_eq!(sink.tone_of("User aborted launch"), Some(Tone::Caution));
        assert!(!marker_path(tmp.path()).exists());
    }

    #[test]
    fn test_browsing_until_found() {
        let tmp = tempdir().unwrap();
        let real = tmp.path().join("MinecraftLauncher");
        fs::write(&real, "").unwrap();
        let sink = RecordingSink::answering(&[true, true]);
        sink.path_answers.lock().unwrap().extend([
            Some(tmp.path().join("still-missing")),
            Some(real.clone()),
        ]);

        let found = resolve_launcher(tmp.path(), &tmp.path().join("missing"), &sink);
        assert_eq!(found.as_deref(), Some(real.as_path()));
        assert_eq!(
            sink.prompt_titles(),
            vec![NOT_FOUND_TITLE, SELECT_TITLE, NOT_FOUND_TITLE, SELECT_TITLE]
        );
        assert_eq!(read_marker(tmp.path()), Some(real));
    }

    #[test]
    fn test_empty_browse_aborts() {
        let tmp = tempdir().unwrap();
        let sink = RecordingSink::answering(&[true]);
        sink.path_answers.lock().unwrap().push_back(None);
        assert_eq!(
            resolve_launcher(tmp.path(), &tmp.path().join("missing"), &sink),
            None
        );
        assert!(sink.has_line("User aborted launch"));
    }

    #[test]
    fn test_spawn_missing_launcher_fails() {
        let err = spawn_detached(Path::new("/no/such/launcher-xyz")).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }
}
