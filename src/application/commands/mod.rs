//! Chat commands
//!
//! Each command turns the outcome of one or more upstream calls into a single
//! user-facing reply. Failures are answered, never propagated.

pub mod balance;
pub mod download;
pub mod forum;
pub mod status;
pub mod weather;

pub use balance::BalanceCommand;
pub use download::DownloadCommand;
pub use forum::ForumCommand;
pub use status::StatusCommand;
pub use weather::WeatherCommand;

use crate::domain::entities::{Command, CommandRegistry, HealthTarget};
use crate::infrastructure::config::Config;
use crate::infrastructure::http::HttpClient;
use crate::infrastructure::upstream::{BalanceService, ForumService, HealthService, WeatherService};

/// Last-resort reply when nothing more specific can be said
pub const SERVICE_UNAVAILABLE: &str =
    "小应生活服务无响应，请稍后再试，若此问题依然存在，请联系机器人管理员";

/// The upstream adapters the commands talk to
#[derive(Clone)]
pub struct Upstreams {
    pub balance: BalanceService,
    pub weather: WeatherService,
    pub forum: ForumService,
    pub health: HealthService,
}

impl Upstreams {
    pub fn from_config(http: &HttpClient, config: &Config) -> Self {
        Self {
            balance: BalanceService::new(http.clone(), &config.elec_url, &config.elec_admin_token),
            weather: WeatherService::new(http.clone(), &config.weather_api, &config.weather_token),
            forum: ForumService::new(http.clone(), &config.forum_url, &config.forum_token),
            health: HealthService::new(http.clone(), HealthTarget::campus_defaults()),
        }
    }
}

/// All commands in match order
pub fn registry(upstreams: Upstreams) -> CommandRegistry {
    CommandRegistry::new()
        .with(
            Command::new(balance::TRIGGER, BalanceCommand::new(upstreams.balance))
                .with_description("查询宿舍电费余额"),
        )
        .with(
            Command::new(weather::TRIGGER, WeatherCommand::new(upstreams.weather))
                .with_description("查询校区天气"),
        )
        .with(
            Command::new(status::TRIGGER, StatusCommand::new(upstreams.health))
                .with_description("检查学校服务状态"),
        )
        .with(
            Command::new(download::TRIGGER, DownloadCommand::default())
                .with_description("获取小应生活下载地址"),
        )
        .with(
            Command::new(forum::TRIGGER, ForumCommand::new(upstreams.forum))
                .with_description("论坛热帖"),
        )
}
