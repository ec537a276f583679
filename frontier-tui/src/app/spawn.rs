use frontier_core::{
    adapter::UpdateOutcome,
    event::AppEvent,
    icon::fetch_icon,
    launcher::{resolve_launcher, spawn_detached},
    platform::open_in_file_manager,
    sink::{Tone, UiSink},
    state::{AppState, InstallationState},
    workflow,
};
use log::warn;
use std::{
    path::{Path, PathBuf},
    thread,
};

use super::{EventSender, Services};

pub(super) const BUSY_TITLE: &str = "Console Busy";

/// Run `work` on a worker thread if no other task holds the serializer.
/// The token travels into the thread and is released before the UI hears
/// `TaskFinished`.
fn spawn_task<F>(
    label: &str,
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    work: F,
) where
    F: FnOnce(&Services, &EventSender) + Send + 'static,
{
    let token = match services.tasks.try_acquire() {
        Ok(token) => token,
        Err(busy) => {
            warn!("refused {label}: {busy}");
            state.show_notice(BUSY_TITLE, &busy.to_string());
            return;
        }
    };
    state.running_task = Some(label.to_string());

    let services = services.clone();
    let sender = sender.clone();
    thread::spawn(move || {
        work(&services, &sender);
        token.release();
        sender.send(AppEvent::TaskFinished);
    });
}

/// Publish the final state; a connected install also gets its branches and
/// a verbose status report.
fn settle(services: &Services, sender: &EventSender, path: &Path, next: InstallationState) {
    sender.send(AppEvent::StateChanged(next));
    if next != InstallationState::Connected {
        return;
    }
    let branches = services.adapter.list_branches(path, sender);
    sender.send(AppEvent::BranchesLoaded(branches));
    report_status(services, sender, path, true);
}

fn report_status(services: &Services, sender: &EventSender, path: &Path, verbose: bool) {
    // Failures are already on the console
    if let Ok(report) = services.adapter.status(path, verbose, sender) {
        sender.send(AppEvent::StatusReported(report));
    }
}

pub(super) fn spawn_confirm(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    path: PathBuf,
) {
    spawn_task("checking path", state, services, sender, move |services, sender| {
        let announce = |s: InstallationState| sender.send(AppEvent::StateChanged(s));
        let next = workflow::resolve_path_state(&services.adapter, &path, sender, &announce);
        settle(services, sender, &path, next);
    });
}

pub(super) fn spawn_install(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    path: PathBuf,
) {
    spawn_task("installing", state, services, sender, move |services, sender| {
        let announce = |s: InstallationState| sender.send(AppEvent::StateChanged(s));
        let next = workflow::install(&services.adapter, &path, sender, &announce);
        settle(services, sender, &path, next);
    });
}

pub(super) fn spawn_update(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    path: PathBuf,
    branch: String,
) {
    spawn_task("updating", state, services, sender, move |services, sender| {
        if let Ok(UpdateOutcome::Updated) = services.adapter.update(&path, &branch, sender) {
            report_status(services, sender, &path, true);
        }
    });
}

pub(super) fn spawn_status(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    path: PathBuf,
) {
    spawn_task("checking status", state, services, sender, move |services, sender| {
        report_status(services, sender, &path, true);
    });
}

pub(super) fn spawn_open_dir(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    path: PathBuf,
) {
    spawn_task("opening folder", state, services, sender, move |services, sender| {
        match open_in_file_manager(services.os, &path) {
            Ok(()) => sender.log(Tone::Plain, &format!("opened {}", path.display())),
            Err(e) => {
                warn!("open {} failed: {e:#}", path.display());
                sender.log(Tone::Error, &format!("Error opening directory: {e:#}"));
            }
        }
    });
}

pub(super) fn spawn_launch(
    state: &mut AppState,
    services: &Services,
    sender: &EventSender,
    game_dir: PathBuf,
) {
    spawn_task("launching", state, services, sender, move |services, sender| {
        let Some(launcher) = resolve_launcher(&game_dir, &services.launcher_default, sender) else {
            return;
        };
        sender.log(Tone::Plain, "running launcher..");
        match spawn_detached(&launcher) {
            Ok(()) => sender.send(AppEvent::Launched(launcher)),
            Err(e) => {
                warn!("{e:#}");
                sender.log(Tone::Error, &format!("Error running launcher: {e:#}"));
            }
        }
    });
}

/// Fetch the modpack icon. Runs outside the serializer; failure only costs
/// the icon.
pub(super) fn spawn_icon_fetch(services: &Services, sender: &EventSender) {
    let url = services.icon_url.clone();
    let sender = sender.clone();
    thread::spawn(move || match fetch_icon(&url) {
        Ok(icon) => sender.send(AppEvent::IconLoaded(icon)),
        Err(e) => {
            warn!("icon fetch failed: {e:#}");
            sender.log(Tone::Error, &format!("Error loading image: {e:#}"));
        }
    });
}
