//! Weather adapters. Implement `DataSource<WeatherDomain>`.

pub mod openweather;

pub use openweather::OpenWeatherAdapter;
