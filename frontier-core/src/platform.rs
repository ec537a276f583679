use anyhow::{Context, Result, bail};
use std::{
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unsupported operating system: {0}")]
pub struct UnsupportedPlatform(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Mac,
    Linux,
}

impl HostOs {
    pub fn detect() -> Result<Self, UnsupportedPlatform> {
        Self::from_os_name(std::env::consts::OS)
    }

    pub fn from_os_name(name: &str) -> Result<Self, UnsupportedPlatform> {
        match name {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::Mac),
            "linux" => Ok(Self::Linux),
            other => Err(UnsupportedPlatform(other.to_string())),
        }
    }

    pub fn default_game_dir(self, home: &Path) -> PathBuf {
        match self {
            Self::Windows => home.join("AppData").join("Roaming").join(".minecraft"),
            Self::Mac => home
                .join("Library")
                .join("Application Support")
                .join("minecraft"),
            Self::Linux => home.join(".minecraft"),
        }
    }

    pub fn default_launcher_path(self) -> PathBuf {
        match self {
            Self::Windows => {
                PathBuf::from(r"C:\Program Files (x86)\Minecraft Launcher\MinecraftLauncher.exe")
            }
            Self::Mac => PathBuf::from("/Applications/Minecraft.app/Contents/MacOS/launcher"),
            Self::Linux => PathBuf::from("/usr/bin/minecraft-launcher"),
        }
    }

    pub fn file_manager(self) -> &'static str {
        match self {
            Self::Windows => "explorer",
            Self::Mac => "open",
            Self::Linux => "xdg-open",
        }
    }
}

/// Show `path` in the platform file manager.
pub fn open_in_file_manager(os: HostOs, path: &Path) -> Result<()> {
    if !path.is_dir() {
        bail!("{} is not a directory", path.display());
    }
    let status = Command::new(os.file_manager())
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .with_context(|| format!("failed to run {}", os.file_manager()))?;
    // explorer exits non-zero even when the window opened
    if !status.success() && os != HostOs::Windows {
        bail!("{} exited with {status}", os.file_manager());
    }
    Ok(())
}

/// Expand a leading `~` to the user's home directory.
///
/// Returns `None` when the path starts with `~` but the home directory
/// cannot be determined. Other paths are returned as-is.
pub fn expand_tilde(path: &str) -> Option<PathBuf> {
    if path == "~" {
        dirs::home_dir()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir().map(|home| home.join(rest))
    } else {
        Some(PathBuf::from(path))
    }
}
