mod logging;

use anyhow::Result;
use clap::Parser;
use frontier_core::{
    RepositoryAdapter, TaskSerializer,
    config::{self, Config},
    git::{CliGitProvider, GitProvider},
    platform::HostOs,
    state::AppState,
};
use frontier_tui::{ExitReason, Services, Theme};
use std::{path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Parser)]
#[command(version, about = "Installer and updater for the Frontier Minecraft modpack")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL, value_parser = logging::parse_level)]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let setup = HostOs::detect()
        .map_err(anyhow::Error::from)
        .and_then(|os| Ok((os, config::load_config(cli.config.as_deref())?)));
    let (os, config) = match setup {
        Ok(setup) => setup,
        Err(error) => {
            eprintln!("Error: {error:#}");
            return ExitCode::from(2);
        }
    };

    // The installer still works without a log file
    if let Err(error) = logging::setup_logging(cli.log_level) {
        eprintln!("Warning: logging disabled: {error:#}");
    }

    match run_tui(os, &config) {
        Ok(ExitReason::Launched(launcher)) => {
            log::info!("exited after starting {}", launcher.display());
            println!("have fun!");
            ExitCode::SUCCESS
        }
        Ok(ExitReason::Quit) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error:#}");
            eprintln!("Error: {error:#}");
            ExitCode::from(2)
        }
    }
}

fn run_tui(os: HostOs, config: &Config) -> Result<ExitReason> {
    let git: Arc<dyn GitProvider> = Arc::new(CliGitProvider);
    let remote = config.modpack.remote_spec();
    let default_branch = remote.default_branch.clone();
    let services = Services {
        adapter: Arc::new(RepositoryAdapter::new(git, remote)),
        tasks: TaskSerializer::default(),
        os,
        launcher_default: config.launcher_default(os),
        icon_url: config.modpack.icon_url.clone(),
    };

    let game_dir = config.resolved_game_dir(os);
    let mut state = AppState::new(&game_dir.display().to_string(), &default_branch);
    let theme = Theme::from_config(&config.theme);

    let mut terminal = if should_disable_alt_screen() {
        // Inline viewport keeps drawing in the primary screen buffer, which makes
        // scrollback captures usable for debugging.
        ratatui::init_with_options(ratatui::TerminalOptions {
            viewport: ratatui::Viewport::Inline(30),
        })
    } else {
        ratatui::init()
    };
    let result = frontier_tui::run(&mut terminal, &mut state, &services, &theme);
    ratatui::restore();
    result
}

fn should_disable_alt_screen() -> bool {
    match std::env::var("FRONTIER_NO_ALT_SCREEN") {
        Ok(value) => {
            let value = value.trim().to_ascii_lowercase();
            !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
        }
        Err(_) => false,
    }
}
