pub mod forecast;

pub use forecast::ForecastScreen;
