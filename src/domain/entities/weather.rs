use chrono::NaiveDate;

/// One half-day of a forecast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastEntry {
    pub condition: String,
    pub temperature: String,
    pub wind_power: String,
    pub wind_direction: String,
}

/// Current conditions plus the first forecast day for one location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub province: String,
    pub city: String,
    pub condition_now: String,
    pub temperature_now: String,
    pub humidity: String,
    pub wind_power_now: String,
    pub wind_direction_now: String,
    pub forecast_date: NaiveDate,
    pub day_forecast: ForecastEntry,
    pub night_forecast: ForecastEntry,
}

/// Locations the weather command reports on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub name: String,
    pub adcode: String,
}

impl City {
    pub fn new(name: impl Into<String>, adcode: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            adcode: adcode.into(),
        }
    }

    pub fn feng_xian() -> Self {
        Self::new("奉贤区", "310120")
    }

    pub fn xu_hui() -> Self {
        Self::new("徐汇区", "310104")
    }
}
