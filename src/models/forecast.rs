use chrono::{DateTime, Datelike, Month, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Approximate viewer location resolved from a GeoIP lookup (or configured manually)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
}

/// A single 3-hour forecast sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64, // percent
    pub wind_speed: f64,
    pub condition_description: String,
}

impl ForecastSample {
    /// Calendar day of this sample in the given time zone
    pub fn day_key<Tz: TimeZone>(&self, tz: &Tz) -> DayKey {
        DayKey::from_datetime(&self.timestamp, tz)
    }

    /// Hour of day (0-23) in the given time zone
    pub fn local_hour<Tz: TimeZone>(&self, tz: &Tz) -> u32 {
        use chrono::Timelike;
        self.timestamp.with_timezone(tz).hour()
    }
}

/// Calendar-day identifier (day of month + month) in the viewer's time zone.
///
/// There is no year component: samples on the same day and month of different
/// years compare equal. The forecast horizon is five days, so this only
/// matters if longer ranges are ever fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayKey {
    day: u32,
    month: u32,
}

impl DayKey {
    pub fn new(day: u32, month: u32) -> Self {
        Self { day, month }
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Utc>, tz: &Tz) -> Self {
        let local = at.with_timezone(tz);
        Self {
            day: local.day(),
            month: local.month(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02} {}", self.day, self.month_name())
    }
}

/// The day currently driving the hourly view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: DayKey,
}

/// Highest `temp_max` and lowest `temp_min` over one day
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureRange {
    pub max: f64,
    pub min: f64,
}

/// One entry of the daily strip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DaySummary {
    pub key: DayKey,
    pub range: TemperatureRange,
}

/// Five-day forecast for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub fetched_at: DateTime<Utc>,
    pub location: GeoLocation,
    pub samples: Vec<ForecastSample>, // 3-hour intervals
}

impl Forecast {
    /// The first sample stands in for current conditions
    pub fn current(&self) -> Option<&ForecastSample> {
        self.samples.first()
    }
}

/// Whole degrees for display. Halves round up (-2.5 to -2) and there is no "-0".
pub fn round_temperature(temp: f64) -> i64 {
    (temp + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn temperature_rounding_halves_go_up() {
        assert_eq!(round_temperature(21.5), 22);
        assert_eq!(round_temperature(21.4), 21);
        assert_eq!(round_temperature(-0.3), 0);
        assert_eq!(round_temperature(-0.5), 0);
        assert_eq!(round_temperature(-2.5), -2);
        assert_eq!(round_temperature(-2.6), -3);
        assert_eq!(round_temperature(-0.3).to_string(), "0");
    }

    #[test]
    fn day_key_display() {
        assert_eq!(DayKey::new(15, 6).to_string(), "15 June");
        assert_eq!(DayKey::new(3, 12).to_string(), "03 December");
    }

    #[test]
    fn day_key_follows_time_zone() {
        // 2024-06-15 23:30 UTC is already 16 June two hours east
        let at = Utc.with_ymd_and_hms(2024, 6, 15, 23, 30, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();

        assert_eq!(DayKey::from_datetime(&at, &utc), DayKey::new(15, 6));
        assert_eq!(DayKey::from_datetime(&at, &plus_two), DayKey::new(16, 6));
    }

    #[test]
    fn day_key_ignores_year() {
        let tz = FixedOffset::east_opt(0).unwrap();
        let a = Utc.with_ymd_and_hms(2024, 6, 15, 3, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 6, 15, 21, 0, 0).unwrap();
        assert_eq!(DayKey::from_datetime(&a, &tz), DayKey::from_datetime(&b, &tz));
    }

    #[test]
    fn sample_local_hour() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let sample = ForecastSample {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
            temperature: 20.0,
            feels_like: 19.0,
            temp_min: 18.0,
            temp_max: 21.0,
            humidity: 50.0,
            wind_speed: 3.0,
            condition_description: "clear sky".into(),
        };
        assert_eq!(sample.local_hour(&tz), 7);
    }
}
