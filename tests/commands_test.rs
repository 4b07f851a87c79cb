//! Command handlers against mocked upstream services
//! Run with: cargo test --test commands_test

mod common;

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{ensure_init, http, message, RecordingSink};
use mimir_bot::application::commands::weather::FAILURE as WEATHER_FAILURE;
use mimir_bot::application::commands::{
    BalanceCommand, ForumCommand, StatusCommand, WeatherCommand, SERVICE_UNAVAILABLE,
};
use mimir_bot::application::messaging::{Dispatch, MessageDispatcher};
use mimir_bot::domain::entities::{Command, CommandRegistry, HealthTarget};
use mimir_bot::domain::traits::CommandHandler;
use mimir_bot::infrastructure::config::Mode;
use mimir_bot::infrastructure::upstream::{BalanceService, ForumService, HealthService, WeatherService};

async fn run(trigger: &str, handler: impl CommandHandler + 'static, text: &str) -> Vec<String> {
    let registry = CommandRegistry::new().with(Command::new(trigger, handler));
    let dispatcher = MessageDispatcher::new(registry, Mode::Production);
    let sink = RecordingSink::new();
    assert_eq!(dispatcher.dispatch(&message(text), &sink).await, Dispatch::Handled);
    sink.texts()
}

fn balance(server: &MockServer) -> BalanceCommand {
    BalanceCommand::new(BalanceService::new(http(), format!("{}/elec", server.uri()), "admin-token"))
}

#[tokio::test]
async fn test_balance_success_rounds_to_cents() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .and(query_param("raw", "101"))
        .and(header("Cookie", "MIMIR_ELEC_ADMIN_TOKEN=admin-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roomNumber": "101", "balance": 12.345})))
        .expect(1)
        .mount(&server)
        .await;

    let replies = run("查电费", balance(&server), "查电费 101").await;

    assert_eq!(replies, vec!["#101 的电费为 12.35 元"]);
}

#[tokio::test]
async fn test_balance_room_not_found() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "roomNotFound"})))
        .mount(&server)
        .await;

    let replies = run("查电费", balance(&server), "查电费 9999").await;

    assert_eq!(replies, vec!["请输入正确的房间号"]);
}

#[tokio::test]
async fn test_balance_fetch_failed_names_room() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({"message": "fetchFailed", "roomNumber": 10101})),
        )
        .mount(&server)
        .await;

    let replies = run("查电费", balance(&server), "查电费 10101").await;

    assert_eq!(replies, vec!["查询 #10101 的电费失败"]);
}

#[tokio::test]
async fn test_balance_unknown_business_error() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "maintenance"})))
        .mount(&server)
        .await;

    let replies = run("查电费", balance(&server), "查电费 101").await;

    assert_eq!(replies, vec!["查询电费时出现未知错误"]);
}

#[tokio::test]
async fn test_balance_malformed_body() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let replies = run("查电费", balance(&server), "查电费 101").await;

    assert_eq!(replies, vec!["解析电费查询响应时出错"]);
}

#[tokio::test]
async fn test_balance_unreachable_backend() {
    ensure_init();
    // Nothing listens on port 9 of localhost
    let service = BalanceService::new(http(), "http://127.0.0.1:9/elec", "admin-token");

    let replies = run("查电费", BalanceCommand::new(service), "查电费 101").await;

    assert_eq!(replies, vec!["无法连接到电费查询服务，请稍后再试"]);
}

#[tokio::test]
async fn test_repeated_message_gets_identical_reply() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/elec/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"roomNumber": "101", "balance": 3})))
        .mount(&server)
        .await;

    let registry = CommandRegistry::new().with(Command::new("查电费", balance(&server)));
    let dispatcher = MessageDispatcher::new(registry, Mode::Production);
    let sink = RecordingSink::new();
    dispatcher.dispatch(&message("查电费 101"), &sink).await;
    dispatcher.dispatch(&message("查电费 101"), &sink).await;

    let replies = sink.texts();
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0], replies[1]);
    assert_eq!(replies[0], "#101 的电费为 3.00 元");
}

async fn mount_city(server: &MockServer, adcode: &str, city: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", adcode))
        .and(query_param("extensions", "base"))
        .and(query_param("key", "amap-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "info": "OK",
            "lives": [{
                "province": "上海",
                "city": city,
                "adcode": adcode,
                "weather": "晴",
                "temperature": "21",
                "winddirection": "东南",
                "windpower": "≤3",
                "humidity": "60",
                "reporttime": "2024-05-09 20:00:00"
            }]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", adcode))
        .and(query_param("extensions", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "1",
            "info": "OK",
            "forecasts": [{
                "city": city,
                "adcode": adcode,
                "province": "上海",
                "casts": [
                    {
                        "date": "2024-05-09", "week": "4",
                        "dayweather": "多云", "nightweather": "小雨",
                        "daytemp": "25", "nighttemp": "17",
                        "daywind": "东", "nightwind": "东",
                        "daypower": "≤3", "nightpower": "≤3"
                    },
                    {
                        "date": "2024-05-10", "week": "5",
                        "dayweather": "晴", "nightweather": "晴",
                        "daytemp": "28", "nighttemp": "18",
                        "daywind": "南", "nightwind": "南",
                        "daypower": "4", "nightpower": "4"
                    }
                ]
            }]
        })))
        .mount(server)
        .await;
}

fn weather(server: &MockServer) -> WeatherCommand {
    WeatherCommand::new(WeatherService::new(http(), format!("{}/weather", server.uri()), "amap-key"))
}

#[tokio::test]
async fn test_weather_combines_both_cities() {
    ensure_init();
    let server = MockServer::start().await;
    mount_city(&server, "310120", "奉贤区").await;
    mount_city(&server, "310104", "徐汇区").await;

    let replies = run("查天气", weather(&server), "查天气").await;

    let block = |city: &str| {
        format!(
            "上海 {}：\n晴，21°C，湿度60%，≤3级东南风\n预测 5月9日：\n白天 多云 25°C，≤3级东风\n夜间 小雨 17°C，≤3级东风",
            city
        )
    };
    assert_eq!(
        replies,
        vec![format!("\n{}\n------------\n{}", block("奉贤区"), block("徐汇区"))]
    );
}

#[tokio::test]
async fn test_weather_never_replies_with_one_city() {
    ensure_init();
    let server = MockServer::start().await;
    mount_city(&server, "310120", "奉贤区").await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "310104"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "0", "info": "INVALID_USER_KEY"})))
        .mount(&server)
        .await;

    let replies = run("查天气", weather(&server), "查天气").await;

    assert_eq!(replies, vec![WEATHER_FAILURE]);
}

#[tokio::test]
async fn test_weather_empty_forecast_is_a_failure() {
    ensure_init();
    let server = MockServer::start().await;
    mount_city(&server, "310104", "徐汇区").await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("city", "310120"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "1", "lives": [], "forecasts": []})))
        .mount(&server)
        .await;

    let replies = run("查天气", weather(&server), "查天气").await;

    assert_eq!(replies, vec![WEATHER_FAILURE]);
}

#[tokio::test]
async fn test_status_keeps_configured_order() {
    ensure_init();
    let server = MockServer::start().await;
    for (route, delay) in [("/slow-a", 2000), ("/fast-b", 0), ("/slow-c", 2000), ("/fast-d", 50)] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(delay)))
            .mount(&server)
            .await;
    }

    let targets = vec![
        HealthTarget::new("教务系统", format!("{}/slow-a", server.uri())),
        HealthTarget::new("电费服务", format!("{}/fast-b", server.uri())),
        HealthTarget::new("消费记录服务", format!("{}/slow-c", server.uri())),
        HealthTarget::new("应网办", format!("{}/fast-d", server.uri())),
    ];
    let service = HealthService::new(http(), targets).with_timeout(Duration::from_millis(500));

    let replies = run("服务状态", StatusCommand::new(service), "服务状态").await;

    assert_eq!(
        replies,
        vec!["\n教务系统: 连接超时\n电费服务: 正常运行\n消费记录服务: 连接超时\n应网办: 正常运行"]
    );
}

#[tokio::test]
async fn test_status_treats_http_errors_as_timeouts() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/up"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let targets = vec![
        HealthTarget::new("a", format!("{}/up", server.uri())),
        HealthTarget::new("b", format!("{}/moved", server.uri())),
        HealthTarget::new("c", format!("{}/down", server.uri())),
        HealthTarget::new("d", "http://127.0.0.1:9/"),
    ];

    let replies = run("服务状态", StatusCommand::new(HealthService::new(http(), targets)), "服务状态").await;

    assert_eq!(replies, vec!["\na: 正常运行\nb: 连接超时\nc: 连接超时\nd: 连接超时"]);
}

fn forum(server: &MockServer) -> ForumCommand {
    ForumCommand::new(ForumService::new(http(), server.uri(), "forum-token"))
}

#[tokio::test]
async fn test_forum_numbers_titles_in_server_order() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/discussions"))
        .and(query_param("sort", "-commentCount"))
        .and(query_param("page[limit]", "10"))
        .and(header("Authorization", "Token forum-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"type": "discussions", "id": "7", "attributes": {"title": "食堂新窗口", "commentCount": 88}},
                {"type": "discussions", "id": "3", "attributes": {"title": "选课攻略", "commentCount": 91}}
            ]
        })))
        .mount(&server)
        .await;

    let replies = run("热帖", forum(&server), "热帖").await;

    assert_eq!(replies, vec!["\n1. 食堂新窗口\n2. 选课攻略"]);
}

#[tokio::test]
async fn test_forum_reports_status_code() {
    ensure_init();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/discussions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let replies = run("热帖", forum(&server), "热帖").await;

    assert_eq!(replies, vec!["\n请求失败，状态码: 401"]);
}

#[tokio::test]
async fn test_forum_unreachable_falls_back() {
    ensure_init();
    let service = ForumService::new(http(), "http://127.0.0.1:9", "forum-token");

    let replies = run("热帖", ForumCommand::new(service), "热帖").await;

    assert_eq!(replies, vec![SERVICE_UNAVAILABLE]);
}
