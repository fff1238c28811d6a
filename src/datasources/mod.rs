pub mod forecast;
pub mod geolocation;

pub use forecast::ForecastClient;
pub use geolocation::GeoIpClient;
