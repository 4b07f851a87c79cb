use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use mimir_bot::application::commands::{self, Upstreams};
use mimir_bot::application::errors::{BotError, ConfigError};
use mimir_bot::application::messaging::MessageDispatcher;
use mimir_bot::application::services::EventService;
use mimir_bot::domain::entities::GroupEvent;
use mimir_bot::domain::traits::Bot;
use mimir_bot::infrastructure::adapters::console::ConsoleAdapter;
use mimir_bot::infrastructure::adapters::qq::{self, QqAdapter};
use mimir_bot::infrastructure::adapters::pump_stdin;
use mimir_bot::infrastructure::config::Config;
use mimir_bot::infrastructure::http::HttpClient;

/// Pending events buffered between stdin and the dispatcher
const EVENT_BUFFER: usize = 64;

/// Grace period for blocking work (the stdin read) once everything else is done
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "mimir-bot")]
#[command(about = "Campus group chat bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run against the QQ platform; gateway dispatch frames are read from stdin
    Run,
    /// Run locally, reading messages from the console
    Console,
    /// Show version
    Version,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_bot(false),
        Commands::Console => run_bot(true),
        Commands::Version => {
            println!("mimir-bot v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}

fn run_bot(console: bool) -> ExitCode {
    // Missing configuration is the only reason to refuse to start
    let config = match Config::from_env(!console) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Loaded {:?}", config);

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result: Result<(), BotError> = rt.block_on(async {
        let http = HttpClient::new(config.http_timeout)?;

        let result = if console {
            serve(ConsoleAdapter::new(), &config, &http, ConsoleAdapter::decode_line).await
        } else {
            let credentials = config
                .credentials
                .clone()
                .ok_or_else(|| ConfigError::MissingField("QQBOT_APP_ID".to_string()))?;
            let bot = QqAdapter::new(http.clone(), credentials, config.mode);
            serve(bot, &config, &http, qq::decode_line).await
        };

        // Every adapter clone went away with the service inside `serve`
        http.close();
        result
    });

    // A pending stdin read cannot be cancelled; don't let it hold the process
    rt.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve<B: Bot + 'static>(
    bot: B,
    config: &Config,
    http: &HttpClient,
    decode: fn(&str) -> Option<GroupEvent>,
) -> Result<(), BotError> {
    if config.mode.is_sandbox() {
        tracing::warn!("Bot is running in sandboxed environment.");
    } else {
        tracing::info!("Bot is running in production environment.");
    }

    let info = bot.start().await?;
    tracing::info!("robot[{}] is ready.", info.name);

    let registry = commands::registry(Upstreams::from_config(http, config));
    let dispatcher = MessageDispatcher::new(registry, config.mode);
    let service = Arc::new(EventService::new(bot, dispatcher, info));

    let (events, inbox) = mpsc::channel(EVENT_BUFFER);
    let reader = tokio::spawn(pump_stdin(events, decode));

    service.run(inbox, interrupted()).await;

    reader.abort();
    Ok(())
}

async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Interrupted, shutting down"),
        Err(e) => {
            // Without a signal handler the bot runs until stdin closes
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await
        }
    }
}
