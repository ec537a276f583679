/// HTTPS form of the modpack remote.
pub const REPO_URL: &str = "https://github.com/collebrusco/frontier.git";

/// SSH form of the same remote; either is accepted when checking a work tree.
pub const REPO_URL_SSH: &str = "git@github.com:collebrusco/frontier.git";

pub const MAIN_BRANCH_NAME: &str = "main";

pub const REMOTE_NAME: &str = "origin";

pub const ICON_URL: &str =
    "https://raw.githubusercontent.com/collebrusco/frontier/refs/heads/main/frontier_assets/img/icon.png";

/// Single-line marker file inside the game directory holding the launcher path.
pub const LAUNCHER_CACHE_FILE: &str = ".mc_launcher_path.cache";

pub const SHORT_ID_LEN: usize = 7;

/// Passed to `git log --date=format:...`.
pub const COMMIT_DATE_FORMAT: &str = "%m-%d-%Y %H:%M";

/// Lines kept in the on-screen console before the oldest are dropped.
pub const CONSOLE_CAPACITY: usize = 500;
