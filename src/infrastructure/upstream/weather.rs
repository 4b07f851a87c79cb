//! AMap weather API
//!
//! Live conditions and forecasts come from the same endpoint, selected by
//! `extensions=base` and `extensions=all` respectively.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::lenient_string;
use crate::application::errors::UpstreamError;
use crate::domain::entities::{City, ForecastEntry, WeatherSnapshot};
use crate::infrastructure::http::HttpClient;

#[derive(Deserialize, Debug)]
struct Envelope {
    #[serde(deserialize_with = "lenient_string")]
    status: String,
    #[serde(default, deserialize_with = "lenient_string")]
    info: String,
}

#[derive(Deserialize, Debug)]
struct LivesResponse {
    #[serde(default)]
    lives: Vec<Live>,
}

#[derive(Deserialize, Debug)]
struct ForecastsResponse {
    #[serde(default)]
    forecasts: Vec<Forecast>,
}

#[derive(Deserialize, Debug)]
struct Live {
    #[serde(deserialize_with = "lenient_string")]
    province: String,
    #[serde(deserialize_with = "lenient_string")]
    city: String,
    #[serde(deserialize_with = "lenient_string")]
    weather: String,
    #[serde(deserialize_with = "lenient_string")]
    temperature: String,
    #[serde(deserialize_with = "lenient_string")]
    winddirection: String,
    #[serde(deserialize_with = "lenient_string")]
    windpower: String,
    #[serde(deserialize_with = "lenient_string")]
    humidity: String,
}

#[derive(Deserialize, Debug)]
struct Forecast {
    #[serde(default)]
    casts: Vec<Cast>,
}

#[derive(Deserialize, Debug)]
struct Cast {
    date: String,
    #[serde(deserialize_with = "lenient_string")]
    dayweather: String,
    #[serde(deserialize_with = "lenient_string")]
    nightweather: String,
    #[serde(deserialize_with = "lenient_string")]
    daytemp: String,
    #[serde(deserialize_with = "lenient_string")]
    nighttemp: String,
    #[serde(deserialize_with = "lenient_string")]
    daywind: String,
    #[serde(deserialize_with = "lenient_string")]
    nightwind: String,
    #[serde(deserialize_with = "lenient_string")]
    daypower: String,
    #[serde(deserialize_with = "lenient_string")]
    nightpower: String,
}

/// Client for the AMap weather endpoint
#[derive(Clone)]
pub struct WeatherService {
    http: HttpClient,
    api_url: String,
    token: String,
}

impl WeatherService {
    pub fn new(http: HttpClient, api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            token: token.into(),
        }
    }

    /// Current conditions and the first forecast day for `city`.
    pub async fn fetch(&self, city: &City) -> Result<WeatherSnapshot, UpstreamError> {
        let (lives, forecasts) = tokio::join!(
            self.request::<LivesResponse>(city, "base"),
            self.request::<ForecastsResponse>(city, "all"),
        );

        let live = lives?
            .lives
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::MalformedResponse(format!("no live weather for {}", city.adcode)))?;
        let cast = forecasts?
            .forecasts
            .into_iter()
            .next()
            .and_then(|f| f.casts.into_iter().next())
            .ok_or_else(|| UpstreamError::MalformedResponse(format!("no forecast for {}", city.adcode)))?;

        let forecast_date = NaiveDate::parse_from_str(&cast.date, "%Y-%m-%d")
            .map_err(|e| UpstreamError::MalformedResponse(format!("forecast date {:?}: {}", cast.date, e)))?;

        Ok(WeatherSnapshot {
            province: live.province,
            city: live.city,
            condition_now: live.weather,
            temperature_now: live.temperature,
            humidity: live.humidity,
            wind_power_now: live.windpower,
            wind_direction_now: live.winddirection,
            forecast_date,
            day_forecast: ForecastEntry {
                condition: cast.dayweather,
                temperature: cast.daytemp,
                wind_power: cast.daypower,
                wind_direction: cast.daywind,
            },
            night_forecast: ForecastEntry {
                condition: cast.nightweather,
                temperature: cast.nighttemp,
                wind_power: cast.nightpower,
                wind_direction: cast.nightwind,
            },
        })
    }

    async fn request<T: DeserializeOwned>(&self, city: &City, extensions: &str) -> Result<T, UpstreamError> {
        let response = self
            .http
            .inner()
            .get(&self.api_url)
            .query(&[
                ("key", self.token.as_str()),
                ("city", city.adcode.as_str()),
                ("extensions", extensions),
                ("output", "JSON"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: Envelope = serde_json::from_slice(&body)?;
        if envelope.status != "1" {
            return Err(UpstreamError::Business(envelope.info));
        }

        Ok(serde_json::from_slice(&body)?)
    }
}
