pub mod day_strip;
pub mod gauge;

pub use day_strip::DayStrip;
pub use gauge::{humidity_gauge, temperature_gauge, wind_gauge};
