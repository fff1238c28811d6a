/// Icon shown for a forecast condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherIcon {
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Misty,
    #[default]
    Default,
}

/// Condition descriptions (lower case) and their icons.
/// Anything not listed maps to [`WeatherIcon::Default`].
pub const CONDITION_ICONS: &[(&str, WeatherIcon)] = &[
    ("clear sky", WeatherIcon::Sunny),
    ("few clouds", WeatherIcon::Cloudy),
    ("scattered clouds", WeatherIcon::Cloudy),
    ("broken clouds", WeatherIcon::Cloudy),
    ("overcast clouds", WeatherIcon::Cloudy),
    ("shower rain", WeatherIcon::Rainy),
    ("rain", WeatherIcon::Rainy),
    ("thunderstorm", WeatherIcon::Rainy),
    ("snow", WeatherIcon::Snowy),
    ("mist", WeatherIcon::Misty),
];

/// Map a free-text condition label to its icon, ignoring case
pub fn icon_for(description: &str) -> WeatherIcon {
    let normalized = description.trim().to_lowercase();
    CONDITION_ICONS
        .iter()
        .find(|(label, _)| *label == normalized)
        .map(|(_, icon)| *icon)
        .unwrap_or_default()
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "sunny",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Rainy => "rainy",
            WeatherIcon::Snowy => "snowy",
            WeatherIcon::Misty => "misty",
            WeatherIcon::Default => "default",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherIcon::Sunny => "☀",
            WeatherIcon::Cloudy => "☁",
            WeatherIcon::Rainy => "🌧",
            WeatherIcon::Snowy => "❄",
            WeatherIcon::Misty => "🌫",
            WeatherIcon::Default => "🌡",
        }
    }
}

impl std::fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_conditions() {
        assert_eq!(icon_for("clear sky"), WeatherIcon::Sunny);
        assert_eq!(icon_for("few clouds"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("scattered clouds"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("broken clouds"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("overcast clouds"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("shower rain"), WeatherIcon::Rainy);
        assert_eq!(icon_for("rain"), WeatherIcon::Rainy);
        assert_eq!(icon_for("thunderstorm"), WeatherIcon::Rainy);
        assert_eq!(icon_for("snow"), WeatherIcon::Snowy);
        assert_eq!(icon_for("mist"), WeatherIcon::Misty);
    }

    #[test]
    fn mixed_case() {
        assert_eq!(icon_for("Clear Sky"), WeatherIcon::Sunny);
        assert_eq!(icon_for("OVERCAST CLOUDS"), WeatherIcon::Cloudy);
        assert_eq!(icon_for("ThunderStorm"), WeatherIcon::Rainy);
    }

    #[test]
    fn unknown_falls_back_to_default() {
        assert_eq!(icon_for(""), WeatherIcon::Default);
        assert_eq!(icon_for("light rain"), WeatherIcon::Default);
        assert_eq!(icon_for("volcanic ash"), WeatherIcon::Default);
        assert_eq!(icon_for("☀"), WeatherIcon::Default);
    }

    #[test]
    fn table_keys_are_lowercase_and_unique() {
        for (i, (label, _)) in CONDITION_ICONS.iter().enumerate() {
            assert_eq!(*label, label.to_lowercase());
            assert!(CONDITION_ICONS[i + 1..].iter().all(|(other, _)| other != label));
        }
    }

    #[test]
    fn icon_names() {
        assert_eq!(WeatherIcon::Sunny.as_str(), "sunny");
        assert_eq!(WeatherIcon::Default.to_string(), "default");
    }
}
