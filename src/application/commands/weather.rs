//! Weather for the two campuses

use async_trait::async_trait;
use chrono::Datelike;

use crate::domain::entities::{City, ForecastEntry, WeatherSnapshot};
use crate::domain::traits::{CommandContext, CommandHandler};
use crate::infrastructure::upstream::WeatherService;

pub const TRIGGER: &str = "查天气";
pub const FAILURE: &str = "查询失败，无法连接到天气服务";
const DIVIDER: &str = "------------";

pub struct WeatherCommand {
    service: WeatherService,
    cities: (City, City),
}

impl WeatherCommand {
    pub fn new(service: WeatherService) -> Self {
        Self {
            service,
            cities: (City::feng_xian(), City::xu_hui()),
        }
    }
}

#[async_trait]
impl CommandHandler for WeatherCommand {
    async fn handle(&self, ctx: CommandContext<'_>) {
        let (first, second) = tokio::join!(
            self.service.fetch(&self.cities.0),
            self.service.fetch(&self.cities.1),
        );

        // Both are needed; never send one city on its own.
        let reply = match (first, second) {
            (Ok(first), Ok(second)) => combined_reply(&first, &second),
            (first, second) => {
                for (city, result) in [(&self.cities.0, first), (&self.cities.1, second)] {
                    if let Err(e) = result {
                        tracing::error!("Weather fetch for {} failed: {:?}", city.name, e);
                    }
                }
                FAILURE.to_string()
            }
        };
        ctx.reply(&reply).await;
    }
}

pub fn combined_reply(first: &WeatherSnapshot, second: &WeatherSnapshot) -> String {
    format!("\n{}\n{}\n{}", render(first), DIVIDER, render(second))
}

fn render(snapshot: &WeatherSnapshot) -> String {
    format!(
        "{} {}：\n{}，{}°C，湿度{}%，{}级{}风\n预测 {}月{}日：\n白天 {}\n夜间 {}",
        snapshot.province,
        snapshot.city,
        snapshot.condition_now,
        snapshot.temperature_now,
        snapshot.humidity,
        snapshot.wind_power_now,
        snapshot.wind_direction_now,
        snapshot.forecast_date.month(),
        snapshot.forecast_date.day(),
        render_entry(&snapshot.day_forecast),
        render_entry(&snapshot.night_forecast),
    )
}

fn render_entry(entry: &ForecastEntry) -> String {
    format!(
        "{} {}°C，{}级{}风",
        entry.condition, entry.temperature, entry.wind_power, entry.wind_direction
    )
}
