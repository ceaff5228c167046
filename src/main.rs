//! # Main Entry Point
//!
//! Initializes the mentor bot:
//! - Domain: Configuration, Catalog and Types
//! - Infrastructure: Telegram, LLM
//! - Application: Router, State Machine, Sessions, Feedback, Notifier
//! - Interface: Webhook Server, Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::application::feedback::{FeedbackRequester, FeedbackSettings};
use crate::application::notifier::Notifier;
use crate::application::router::CommandRouter;
use crate::application::state::SessionStore;
use crate::domain::catalog::ProjectCatalog;
use crate::domain::config::AppConfig;
use crate::infrastructure::llm::Client as LlmClient;
use crate::infrastructure::telegram::TelegramBot;
use crate::interface::http::{AppState, app};
use crate::strings::logs;

#[derive(Parser, Debug)]
#[command(version, about = "Telegram mentor bot for freelance practice projects")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(&args.config)?;
    config.resolve_env()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // 2. Logging Setup
    let log_dir = Path::new(&config.system.log_dir);
    if !log_dir.exists() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Clear previous session log
    let log_path = log_dir.join("session.log");
    if log_path.exists() {
        let _ = fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, "session.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,hyper=warn,reqwest=warn"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    tracing::info!("{}", logs::STARTING);

    // 3. Domain
    let catalog = Arc::new(ProjectCatalog::new(&config.bot.projects)?);
    tracing::info!(
        "{}",
        logs::config_loaded(&args.config.display().to_string(), catalog.len())
    );

    // 4. Infrastructure
    let llm_config = &config.services.llm;
    let llm = Arc::new(LlmClient::new(llm_config).map_err(|e| anyhow!(e.to_string()))?);
    let telegram = Arc::new(TelegramBot::new(&config.services.telegram)?);

    // 5. Application
    let feedback = Arc::new(FeedbackRequester::new(
        llm,
        FeedbackSettings::from(llm_config),
    ));
    let notifier = Notifier::new(
        Duration::from_secs(config.services.telegram.timeout_secs),
        Duration::from_millis(config.bot.notify_retry_backoff_ms),
    );
    let router = Arc::new(CommandRouter::new(
        catalog,
        Arc::new(SessionStore::new()),
        feedback,
        notifier,
        config.bot.greeting.clone(),
    ));

    // 6. Webhook Server
    let state = AppState {
        router,
        chats: Arc::new(telegram),
    };
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("{}", logs::server_listening(&addr));

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Webhook server failed")?;

    tracing::info!("{}", logs::SHUTDOWN);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("{}", logs::shutdown_fail(&e.to_string()));
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
}
