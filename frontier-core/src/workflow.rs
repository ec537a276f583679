//! Drives a confirmed path to its installation state: probe the
//! filesystem, check the work tree, offer adoption, verify.

use crate::{
    adapter::{InstallOutcome, RepositoryAdapter},
    sink::{Tone, UiSink},
    state::{Adoption, InstallationState, transition},
};
use log::info;
use std::{fs, path::Path};

pub const ADOPT_TITLE: &str = "Warning: existing install";

/// Missing paths and empty directories hold nothing to adopt.
pub fn is_absent(path: &Path) -> bool {
    match fs::read_dir(path) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => !path.exists(),
    }
}

/// Offer to turn an existing, unmanaged directory into a tracked install.
pub fn adopt(adapter: &RepositoryAdapter, path: &Path, ui: &dyn UiSink) -> Adoption {
    let message = format!(
        "{} already has files in it but isn't tracking the modpack.\n\n\
         Set it up for tracking? Files the modpack ships may be overwritten; \
         you will be asked before that happens.",
        path.display()
    );
    if !ui.confirm(ADOPT_TITLE, &message) {
        ui.log(Tone::Caution, "left existing install untouched");
        return Adoption::Declined;
    }

    match adapter.install_fresh(path, ui) {
        Ok(InstallOutcome::Installed) => {
            ui.log(Tone::Plain, "done. verifying...");
            if adapter.check(path, ui).is_ok() {
                ui.log(
                    Tone::Success,
                    &format!("successfully set up tracking for install at {}", path.display()),
                );
                Adoption::Installed
            } else {
                Adoption::Failed
            }
        }
        Ok(InstallOutcome::Declined) => {
            ui.log(
                Tone::Error,
                "did not add remote, try again or try removing pre-existing install",
            );
            Adoption::Declined
        }
        Err(_) => {
            ui.log(
                Tone::Error,
                "did not add remote, try again or try removing pre-existing install",
            );
            Adoption::Failed
        }
    }
}

/// Work out the installation state for `path`. `announce` hears about
/// intermediate states (the adoption prompt) before the final one is
/// returned.
pub fn resolve_path_state(
    adapter: &RepositoryAdapter,
    path: &Path,
    ui: &dyn UiSink,
    announce: &dyn Fn(InstallationState),
) -> InstallationState {
    ui.log(Tone::Plain, &format!("Checking path: {}", path.display()));
    if is_absent(path) {
        ui.log(Tone::Notice, "no install found, ready to install");
        return transition(false, false, Adoption::Declined);
    }
    if adapter.check(path, ui).is_ok() {
        ui.log(Tone::Success, "found tracked install");
        return transition(true, true, Adoption::Declined);
    }

    announce(InstallationState::NonManagedInstall);
    let adoption = adopt(adapter, path, ui);
    info!("adoption of {} finished: {adoption:?}", path.display());
    transition(true, false, adoption)
}

/// The install control: clone into an absent path, adopt an occupied one,
/// then recompute the state either way.
pub fn install(
    adapter: &RepositoryAdapter,
    path: &Path,
    ui: &dyn UiSink,
    announce: &dyn Fn(InstallationState),
) -> InstallationState {
    // Failures are already on the console; the recomputed state tells the rest.
    if is_absent(path) {
        let _ = adapter.clone_fresh(path, ui);
    }
    resolve_path_state(adapter, path, ui, announce)
}
