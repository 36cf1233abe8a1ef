//! OpenWeather API client: geocoding, current conditions, air pollution,
//! and the 5-day/3-hour forecast, plus the reduction of forecast entries
//! into the weekday series the chart consumes.

use crate::charts::Series;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const GEO_URL: &str = "http://api.openweathermap.org/geo/1.0/direct";
const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const AIR_URL: &str = "http://api.openweathermap.org/data/2.5/air_pollution";
const FORECAST_URL: &str = "http://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Clone, Deserialize)]
pub struct GeoLocation {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeather {
    pub weather: Vec<Condition>,
    pub main: MainMetrics,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQuality {
    pub list: Vec<AirQualityEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityEntry {
    pub main: AqiIndex,
    pub components: Pollutants,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AqiIndex {
    pub aqi: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pollutants {
    pub co: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub list: Vec<ForecastEntry>,
}

/// One 3-hourly forecast step.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastMetrics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastMetrics {
    pub temp: f64,
}

pub struct WeatherClient {
    http: reqwest::Client,
    api_key: String,
}

impl WeatherClient {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { http, api_key })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("request to {url} returned status {status}");
        }

        response
            .json()
            .await
            .with_context(|| format!("invalid JSON from {url}"))
    }

    /// Resolves a city name to coordinates; the first match wins.
    pub async fn geocode(&self, city: &str) -> Result<GeoLocation> {
        let mut results: Vec<GeoLocation> = self
            .get_json(GEO_URL, &[("q", city.to_string())])
            .await?;
        if results.is_empty() {
            bail!("no geocoding result for {city:?}");
        }
        let location = results.remove(0);
        debug!(
            "geocoded {city:?} to {} ({}, {})",
            location.name, location.lat, location.lon
        );
        Ok(location)
    }

    pub async fn current(&self, city: &str) -> Result<CurrentWeather> {
        self.get_json(
            WEATHER_URL,
            &[("q", city.to_string()), ("units", "metric".to_string())],
        )
        .await
    }

    pub async fn air_quality(&self, city: &str) -> Result<AirQualityEntry> {
        let location = self.geocode(city).await?;
        let air: AirQuality = self
            .get_json(
                AIR_URL,
                &[
                    ("lat", location.lat.to_string()),
                    ("lon", location.lon.to_string()),
                ],
            )
            .await?;
        air.list
            .into_iter()
            .next()
            .context("air pollution response was empty")
    }

    pub async fn forecast(&self, city: &str) -> Result<Forecast> {
        let location = self.geocode(city).await?;
        self.get_json(
            FORECAST_URL,
            &[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("units", "metric".to_string()),
            ],
        )
        .await
    }
}

/// Collapses 3-hourly forecast entries into one bar per weekday: the daily
/// maximum temperature, rounded to an integer, with sub-zero days clamped
/// to zero. Days appear in chronological order.
pub fn daily_temperature_series(entries: &[ForecastEntry]) -> Series {
    let mut series = Series::new();
    for entry in entries {
        let Some(ts) = DateTime::<Utc>::from_timestamp(entry.dt, 0) else {
            continue;
        };
        let day = weekday_abbrev(ts.weekday());
        let temp = entry.main.temp.max(0.0).round() as u64;
        let value = series.get(day).map_or(temp, |current| current.max(temp));
        series.insert(day, value);
    }
    series
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}
