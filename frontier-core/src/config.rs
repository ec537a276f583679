use crate::{
    adapter::RemoteSpec,
    constants::{ICON_URL, MAIN_BRANCH_NAME, REPO_URL, REPO_URL_SSH},
    platform::{HostOs, expand_tilde},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const APP_NAME: &str = "frontier";

fn config_dir() -> Option<PathBuf> {
    // Use ~/.config on both Linux and macOS (not ~/Library/Application Support)
    #[cfg(unix)]
    {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.is_empty()
        {
            return Some(PathBuf::from(xdg_config_home).join(APP_NAME));
        }
        dirs::home_dir().map(|home| home.join(".config").join(APP_NAME))
    }
    #[cfg(windows)]
    {
        dirs::config_dir().map(|dir| dir.join(APP_NAME))
    }
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Game directory pre-filled in the path field. Supports `~`. Defaults
    /// to the usual `.minecraft` location for the host OS.
    pub game_dir: Option<String>,

    /// Which remote the installer tracks.
    #[serde(default)]
    pub modpack: ModpackConfig,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ModpackConfig {
    pub remote_url: String,
    /// Also accepted when checking an existing install's `origin`.
    pub remote_ssh_url: String,
    pub default_branch: String,
    pub icon_url: String,
    /// Where to look for the game launcher before asking. Overrides the
    /// per-OS default.
    pub launcher_path: Option<String>,
}

impl Default for ModpackConfig {
    fn default() -> Self {
        Self {
            remote_url: REPO_URL.to_string(),
            remote_ssh_url: REPO_URL_SSH.to_string(),
            default_branch: MAIN_BRANCH_NAME.to_string(),
            icon_url: ICON_URL.to_string(),
            launcher_path: None,
        }
    }
}

impl ModpackConfig {
    pub fn remote_spec(&self) -> RemoteSpec {
        RemoteSpec {
            url: self.remote_url.clone(),
            ssh_url: self.remote_ssh_url.clone(),
            default_branch: self.default_branch.clone(),
        }
    }
}

impl Config {
    pub fn resolved_game_dir(&self, os: HostOs) -> PathBuf {
        if let Some(dir) = &self.game_dir
            && let Some(path) = expand_tilde(dir)
        {
            return path;
        }
        os.default_game_dir(&dirs::home_dir().unwrap_or_default())
    }

    pub fn launcher_default(&self, os: HostOs) -> PathBuf {
        self.modpack
            .launcher_path
            .as_deref()
            .and_then(expand_tilde)
            .unwrap_or_else(|| os.default_launcher_path())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Ordinary console text (default: "white").
    #[serde(default = "ThemeConfig::default_plain", deserialize_with = "deserialize_color")]
    pub plain: ThemeColor,
    /// Completed operations (default: "lime").
    #[serde(default = "ThemeConfig::default_success", deserialize_with = "deserialize_color")]
    pub success: ThemeColor,
    /// Transfer progress and modified files (default: "cyan").
    #[serde(default = "ThemeConfig::default_progress", deserialize_with = "deserialize_color")]
    pub progress: ThemeColor,
    /// Steps in progress (default: "yellow").
    #[serde(default = "ThemeConfig::default_notice", deserialize_with = "deserialize_color")]
    pub notice: ThemeColor,
    /// Something needs the user's attention (default: "orange").
    #[serde(default = "ThemeConfig::default_caution", deserialize_with = "deserialize_color")]
    pub caution: ThemeColor,
    /// Failures (default: "red").
    #[serde(default = "ThemeConfig::default_error", deserialize_with = "deserialize_color")]
    pub error: ThemeColor,
    /// Status report lines (default: "pink").
    #[serde(default = "ThemeConfig::default_status", deserialize_with = "deserialize_color")]
    pub status: ThemeColor,
    /// Header when the path is connected (default: "green").
    #[serde(default = "ThemeConfig::default_connected", deserialize_with = "deserialize_color")]
    pub connected: ThemeColor,
    /// Border color (default: "gray").
    #[serde(default = "ThemeConfig::default_border", deserialize_with = "deserialize_color")]
    pub border: ThemeColor,
    /// Key hints (default: "blue").
    #[serde(default = "ThemeConfig::default_hint", deserialize_with = "deserialize_color")]
    pub hint: ThemeColor,
    /// Disabled controls (default: "darkgray").
    #[serde(default = "ThemeConfig::default_muted", deserialize_with = "deserialize_color")]
    pub muted: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            plain: Self::default_plain(),
            success: Self::default_success(),
            progress: Self::default_progress(),
            notice: Self::default_notice(),
            caution: Self::default_caution(),
            error: Self::default_error(),
            status: Self::default_status(),
            connected: Self::default_connected(),
            border: Self::default_border(),
            hint: Self::default_hint(),
            muted: Self::default_muted(),
        }
    }
}

impl ThemeConfig {
    fn default_plain() -> ThemeColor {
        ThemeColor::Named(NamedColor::White)
    }
    fn default_success() -> ThemeColor {
        ThemeColor::Named(NamedColor::Lime)
    }
    fn default_progress() -> ThemeColor {
        ThemeColor::Named(NamedColor::Cyan)
    }
    fn default_notice() -> ThemeColor {
        ThemeColor::Named(NamedColor::Yellow)
    }
    fn default_caution() -> ThemeColor {
        ThemeColor::Named(NamedColor::Orange)
    }
    fn default_error() -> ThemeColor {
        ThemeColor::Named(NamedColor::Red)
    }
    fn default_status() -> ThemeColor {
        ThemeColor::Named(NamedColor::Pink)
    }
    fn default_connected() -> ThemeColor {
        ThemeColor::Named(NamedColor::Green)
    }
    fn default_border() -> ThemeColor {
        ThemeColor::Named(NamedColor::Gray)
    }
    fn default_hint() -> ThemeColor {
        ThemeColor::Named(NamedColor::Blue)
    }
    fn default_muted() -> ThemeColor {
        ThemeColor::Named(NamedColor::DarkGray)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
    DarkGray,
    Lime,
    Orange,
    Pink,
}

impl NamedColor {
    /// All named colours in alphabetical order, as accepted by the config parser.
    pub const fn all() -> &'static [(&'static str, NamedColor)] {
        &[
            ("black", NamedColor::Black),
            ("blue", NamedColor::Blue),
            ("cyan", NamedColor::Cyan),
            ("darkgray", NamedColor::DarkGray),
            ("gray", NamedColor::Gray),
            ("green", NamedColor::Green),
            ("lime", NamedColor::Lime),
            ("magenta", NamedColor::Magenta),
            ("orange", NamedColor::Orange),
            ("pink", NamedColor::Pink),
            ("red", NamedColor::Red),
            ("white", NamedColor::White),
            ("yellow", NamedColor::Yellow),
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Magenta => "magenta",
            Self::Cyan => "cyan",
            Self::White => "white",
            Self::Gray => "gray",
            Self::DarkGray => "darkgray",
            Self::Lime => "lime",
            Self::Orange => "orange",
            Self::Pink => "pink",
        }
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(n) => f.write_str(n.as_str()),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl Serialize for ThemeColor {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#')
            && hex.len() == 6
        {
            let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
            let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
            let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
            return Some(Self::Rgb(r, g, b));
        }
        let lower = s.to_lowercase();
        let lookup = match lower.as_str() {
            "grey" => "gray",
            "darkgrey" | "dark_gray" | "dark_grey" => "darkgray",
            other => other,
        };
        NamedColor::all()
            .iter()
            .find(|(name, _)| *name == lookup)
            .map(|(_, color)| Self::Named(*color))
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<ThemeColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    ThemeColor::parse(&s).ok_or_else(|| {
        let names: Vec<&str> = NamedColor::all().iter().map(|(name, _)| *name).collect();
        serde::de::Error::custom(format!(
            "invalid color '{s}': expected a named color ({}) or hex (#rrggbb)",
            names.join(", ")
        ))
    })
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

/// Load the config file. Without an override a missing default file yields
/// the built-in defaults; a missing override is an error.
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match (config_override, config_file()) {
        (Some(path), _) => {
            if !path.exists() {
                bail!("Config file not found at {}", path.display());
            }
            path.to_path_buf()
        }
        (None, Some(path)) if path.exists() => path,
        (None, _) => return Ok(Config::default()),
    };
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("invalid config at {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert!(config.game_dir.is_none());
        assert_eq!(config.modpack, ModpackConfig::default());
        assert_eq!(config.modpack.remote_spec(), RemoteSpec::default());
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"
game_dir = "/srv/minecraft"

[modpack]
remote_url = "https://example.com/pack.git"
default_branch = "stable"
launcher_path = "/opt/launcher"
"#,
        )
        .unwrap();
        assert_eq!(
            config.resolved_game_dir(HostOs::Linux),
            PathBuf::from("/srv/minecraft")
        );
        let remote = config.modpack.remote_spec();
        assert_eq!(remote.url, "https://example.com/pack.git");
        assert_eq!(remote.ssh_url, REPO_URL_SSH);
        assert_eq!(remote.default_branch, "stable");
        assert_eq!(
            config.launcher_default(HostOs::Linux),
            PathBuf::from("/opt/launcher")
        );
    }

    #[test]
    fn test_default_launcher_follows_os() {
        let config = Config::default();
        assert_eq!(
            config.launcher_default(HostOs::Windows),
            HostOs::Windows.default_launcher_path()
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(load_config_from_str("unknown_field = true").is_err());
        assert!(load_config_from_str("[modpack]\nbranch = \"main\"").is_err());
    }

    #[test]
    fn test_theme_config_defaults() {
        let theme = load_config_from_str("").unwrap().theme;
        assert_eq!(theme.success, ThemeColor::Named(NamedColor::Lime));
        assert_eq!(theme.caution, ThemeColor::Named(NamedColor::Orange));
        assert_eq!(theme.status, ThemeColor::Named(NamedColor::Pink));
        assert_eq!(theme.muted, ThemeColor::Named(NamedColor::DarkGray));
        assert_eq!(theme.error, ThemeColor::Named(NamedColor::Red));
    }

    #[test]
    fn test_theme_config_custom() {
        let config = load_config_from_str(
            r##"
[theme]
success = "green"
status = "#ff00ff"
"##,
        )
        .unwrap();
        assert_eq!(config.theme.success, ThemeColor::Named(NamedColor::Green));
        assert_eq!(config.theme.status, ThemeColor::Rgb(255, 0, 255));
        assert_eq!(config.theme.notice, ThemeColor::Named(NamedColor::Yellow));
    }

    #[test]
    fn test_theme_invalid_color_rejected() {
        let err = load_config_from_str("[theme]\nerror = \"notacolor\"")
            .unwrap_err()
            .to_string();
        assert!(err.contains("invalid color"), "Error was: {err}");
    }

    #[test]
    fn test_theme_color_parse() {
        assert_eq!(
            ThemeColor::parse("ORANGE"),
            Some(ThemeColor::Named(NamedColor::Orange))
        );
        assert_eq!(
            ThemeColor::parse("grey"),
            Some(ThemeColor::Named(NamedColor::Gray))
        );
        assert_eq!(
            ThemeColor::parse("darkgrey"),
            Some(ThemeColor::Named(NamedColor::DarkGray))
        );
        assert_eq!(
            ThemeColor::parse("#00ff00"),
            Some(ThemeColor::Rgb(0, 255, 0))
        );
        assert_eq!(ThemeColor::parse("#fff"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
        assert_eq!(ThemeColor::parse("notacolor"), None);
    }

    #[test]
    fn test_missing_override_is_error() {
        let tmp = tempdir().unwrap();
        let err = load_config(Some(&tmp.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_override_is_loaded() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "game_dir = \"/games/mc\"\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.game_dir.as_deref(), Some("/games/mc"));
    }
}
