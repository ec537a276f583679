use frontier_core::{
    config::{NamedColor, ThemeColor, ThemeConfig},
    sink::Tone,
};
use ratatui::style::Color;

pub struct Theme {
    pub plain: Color,
    pub success: Color,
    pub progress: Color,
    pub notice: Color,
    pub caution: Color,
    pub error: Color,
    pub status: Color,
    pub connected: Color,
    pub border: Color,
    pub hint: Color,
    pub muted: Color,
}

impl Theme {
    pub fn from_config(config: &ThemeConfig) -> Self {
        Self {
            plain: to_ratatui_color(&config.plain),
            success: to_ratatui_color(&config.success),
            progress: to_ratatui_color(&config.progress),
            notice: to_ratatui_color(&config.notice),
            caution: to_ratatui_color(&config.caution),
            error: to_ratatui_color(&config.error),
            status: to_ratatui_color(&config.status),
            connected: to_ratatui_color(&config.connected),
            border: to_ratatui_color(&config.border),
            hint: to_ratatui_color(&config.hint),
            muted: to_ratatui_color(&config.muted),
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Plain => self.plain,
            Tone::Success => self.success,
            Tone::Progress => self.progress,
            Tone::Notice => self.notice,
            Tone::Caution => self.caution,
            Tone::Error => self.error,
            Tone::Status => self.status,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

fn to_ratatui_color(color: &ThemeColor) -> Color {
    match color {
        ThemeColor::Rgb(r, g, b) => Color::Rgb(*r, *g, *b),
        ThemeColor::Named(named) => match named {
            NamedColor::Black => Color::Black,
            NamedColor::Red => Color::Red,
            NamedColor::Green => Color::Green,
            NamedColor::Yellow => Color::Yellow,
            NamedColor::Blue => Color::Blue,
            NamedColor::Magenta => Color::Magenta,
            NamedColor::Cyan => Color::Cyan,
            NamedColor::White => Color::White,
            NamedColor::Gray => Color::Gray,
            NamedColor::DarkGray => Color::DarkGray,
            // Tk colour names, kept so the console reads the same as it always has
            NamedColor::Lime => Color::Rgb(0, 255, 0),
            NamedColor::Orange => Color::Rgb(255, 165, 0),
            NamedColor::Pink => Color::Rgb(255, 192, 203),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.plain, Color::White);
        assert_eq!(theme.success, Color::Rgb(0, 255, 0));
        assert_eq!(theme.progress, Color::Cyan);
        assert_eq!(theme.notice, Color::Yellow);
        assert_eq!(theme.caution, Color::Rgb(255, 165, 0));
        assert_eq!(theme.error, Color::Red);
        assert_eq!(theme.status, Color::Rgb(255, 192, 203));
        assert_eq!(theme.muted, Color::DarkGray);
    }

    #[test]
    fn test_theme_custom() {
        let config = ThemeConfig {
            success: ThemeColor::Named(NamedColor::Green),
            status: ThemeColor::Rgb(255, 0, 255),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.success, Color::Green);
        assert_eq!(theme.status, Color::Rgb(255, 0, 255));
        assert_eq!(theme.error, Color::Red);
    }

    #[test]
    fn test_tone_mapping() {
        let theme = Theme::default();
        assert_eq!(theme.tone(Tone::Error), theme.error);
        assert_eq!(theme.tone(Tone::Status), theme.status);
        assert_eq!(theme.tone(Tone::Plain), theme.plain);
    }
}
