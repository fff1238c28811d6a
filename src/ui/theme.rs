use crate::config::Units;
use crate::logic::WeatherIcon;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const HIGHLIGHT: Color = Color::LightCyan;

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Weather colors
    pub const TEMP_FREEZING: Color = Color::LightBlue;
    pub const TEMP_COOL: Color = Color::Cyan;
    pub const TEMP_MILD: Color = Color::Green;
    pub const TEMP_WARM: Color = Color::Yellow;
    pub const TEMP_HOT: Color = Color::Red;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn header() -> Style {
        Style::default().fg(Self::FG).add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR).add_modifier(Modifier::BOLD)
    }

    /// Color for a temperature given in the configured unit system
    pub fn temp_color(temp: f64, units: Units) -> Color {
        let celsius = match units {
            Units::Metric => temp,
            Units::Imperial => (temp - 32.0) * 5.0 / 9.0,
        };

        if celsius < 0.0 {
            Self::TEMP_FREEZING
        } else if celsius < 10.0 {
            Self::TEMP_COOL
        } else if celsius < 20.0 {
            Self::TEMP_MILD
        } else if celsius < 28.0 {
            Self::TEMP_WARM
        } else {
            Self::TEMP_HOT
        }
    }

    pub fn icon_color(icon: WeatherIcon) -> Color {
        match icon {
            WeatherIcon::Sunny => Color::Yellow,
            WeatherIcon::Cloudy => Color::Gray,
            WeatherIcon::Rainy => Color::Blue,
            WeatherIcon::Snowy => Color::White,
            WeatherIcon::Misty => Color::DarkGray,
            WeatherIcon::Default => Self::FG,
        }
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::HIGHLIGHT)
    }
}
