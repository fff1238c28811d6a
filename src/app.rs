use crate::config::Units;
use crate::logic::aggregation::{
    day_summaries, day_temperature_range, grouped_days, samples_for_day, select_day,
};
use crate::models::{
    DayKey, DaySummary, Forecast, ForecastSample, SelectionState, TemperatureRange,
};
use chrono::{DateTime, Local, TimeZone, Utc};

/// Everything the screen shows. Only changed through the `App` actions below.
#[derive(Debug, Default)]
struct WeatherState {
    forecast: Option<Forecast>,
    selection: Option<SelectionState>,
    error: Option<String>,
    geo_city: String,
}

/// One row of the hourly table
#[derive(Debug, Clone, Copy)]
pub struct HourlyEntry<'a> {
    pub hour: u32,
    pub sample: &'a ForecastSample,
}

/// Read-only snapshot handed to the renderer
#[derive(Debug)]
pub struct WeatherView<'a> {
    pub geo_city: &'a str,
    pub current_weather: Option<&'a ForecastSample>,
    pub days: Vec<DaySummary>,
    pub hourly: Vec<HourlyEntry<'a>>,
    pub selected: Option<DayKey>,
    /// `None` while the selected day has no samples
    pub selected_range: Option<TemperatureRange>,
    pub error: Option<&'a str>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub units: Units,
}

pub struct App<Tz: TimeZone = Local> {
    pub should_quit: bool,
    pub units: Units,
    tz: Tz,
    state: WeatherState,

    // UI state
    pub status_message: Option<String>,
    pub needs_refresh: bool,
}

impl App {
    pub fn new(units: Units) -> Self {
        App::with_time_zone(units, Local)
    }
}

impl<Tz: TimeZone> App<Tz> {
    pub fn with_time_zone(units: Units, tz: Tz) -> Self {
        Self {
            should_quit: false,
            units,
            tz,
            state: WeatherState::default(),
            status_message: None,
            needs_refresh: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn request_refresh(&mut self) {
        self.needs_refresh = true;
        self.set_status("Refreshing forecast...");
    }

    /// A fetch completed: replace the forecast and select its first day
    pub fn fetch_succeeded(&mut self, forecast: Forecast) {
        self.state.selection = forecast
            .current()
            .map(|first| select_day(first.day_key(&self.tz)));
        self.state.geo_city = forecast.location.city.clone();
        self.state.forecast = Some(forecast);
        self.state.error = None;
    }

    /// A fetch (or the location lookup before it) failed: drop everything shown
    pub fn fetch_failed(&mut self, message: impl Into<String>) {
        self.state.forecast = None;
        self.state.selection = None;
        self.state.error = Some(message.into());
    }

    /// The user picked a day. Only ignored when no forecast is loaded.
    pub fn day_selected(&mut self, key: DayKey) {
        if self.state.forecast.is_some() {
            self.state.selection = Some(select_day(key));
        }
    }

    pub fn selected_day(&self) -> Option<DayKey> {
        self.state.selection.map(|s| s.selected)
    }

    fn days(&self) -> Vec<DayKey> {
        self.state
            .forecast
            .as_ref()
            .map(|f| grouped_days(&f.samples, &self.tz))
            .unwrap_or_default()
    }

    fn selected_index(&self, days: &[DayKey]) -> Option<usize> {
        let selected = self.selected_day()?;
        days.iter().position(|d| *d == selected)
    }

    pub fn select_next_day(&mut self) {
        let days = self.days();
        let next = match self.selected_index(&days) {
            Some(i) if i + 1 < days.len() => days[i + 1],
            Some(i) => days[i],
            None => match days.first() {
                Some(first) => *first,
                None => return,
            },
        };
        self.day_selected(next);
    }

    pub fn select_prev_day(&mut self) {
        let days = self.days();
        let prev = match self.selected_index(&days) {
            Some(i) if i > 0 => days[i - 1],
            Some(i) => days[i],
            None => match days.first() {
                Some(first) => *first,
                None => return,
            },
        };
        self.day_selected(prev);
    }

    /// Select the n-th day of the strip (0-based); out of range is ignored
    pub fn select_day_at(&mut self, index: usize) {
        if let Some(key) = self.days().get(index).copied() {
            self.day_selected(key);
        }
    }

    pub fn view(&self) -> WeatherView<'_> {
        let forecast = self.state.forecast.as_ref();
        let selected = self.selected_day();

        let days = forecast
            .map(|f| day_summaries(&f.samples, &self.tz))
            .unwrap_or_default();

        let hourly = match (forecast, selected) {
            (Some(f), Some(key)) => samples_for_day(&f.samples, key, &self.tz)
                .into_iter()
                .map(|sample| HourlyEntry {
                    hour: sample.local_hour(&self.tz),
                    sample,
                })
                .collect(),
            _ => Vec::new(),
        };

        let selected_range = match (forecast, selected) {
            (Some(f), Some(key)) => day_temperature_range(&f.samples, key, &self.tz),
            _ => None,
        };

        WeatherView {
            geo_city: &self.state.geo_city,
            current_weather: forecast.and_then(|f| f.current()),
            days,
            hourly,
            selected,
            selected_range,
            error: self.state.error.as_deref(),
            fetched_at: forecast.map(|f| f.fetched_at),
            units: self.units,
        }
    }
}
