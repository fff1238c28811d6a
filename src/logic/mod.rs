pub mod aggregation;
pub mod forecast_sync;
pub mod icons;

pub use forecast_sync::ForecastService;
pub use icons::{icon_for, WeatherIcon};
