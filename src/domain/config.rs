//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Every section has defaults, so the file is optional; secrets are always read from the
//! environment variables the file names.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub services: ServicesConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub system: SystemConfig,
}

/// Listening address of the webhook server.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

/// Configuration for the connected services.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

/// Telegram Bot API settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_url")]
    pub api_url: String,
    #[serde(default = "default_token_env")]
    pub token_env: String,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: String,
    #[serde(default = "default_send_timeout")]
    pub timeout_secs: u64,
    /// Resolved from `token_env` at startup.
    #[serde(skip)]
    pub token: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_url(),
            token_env: default_token_env(),
            parse_mode: default_parse_mode(),
            timeout_secs: default_send_timeout(),
            token: String::new(),
        }
    }
}

fn default_telegram_url() -> String {
    "https://api.telegram.org".to_string()
}
fn default_token_env() -> String {
    "TELEGRAM_TOKEN".to_string()
}
fn default_parse_mode() -> String {
    "HTML".to_string()
}
fn default_send_timeout() -> u64 {
    10
}

/// Completion service settings.
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
    /// Resolved from `api_key_env` at startup.
    #[serde(skip)]
    pub api_key: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            endpoint: None,
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_llm_timeout(),
            api_key: String::new(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    500
}
fn default_llm_timeout() -> u64 {
    60
}

/// Conversation settings and the project catalog.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_retry_backoff")]
    pub notify_retry_backoff_ms: u64,
    #[serde(default = "default_projects")]
    pub projects: Vec<ProjectEntry>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            notify_retry_backoff_ms: default_retry_backoff(),
            projects: default_projects(),
        }
    }
}

/// A skill and the practice project handed out for it.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProjectEntry {
    pub skill: String,
    pub description: String,
}

fn default_greeting() -> String {
    "/start".to_string()
}
fn default_retry_backoff() -> u64 {
    500
}

fn default_projects() -> Vec<ProjectEntry> {
    vec![
        ProjectEntry {
            skill: "طراحی".to_string(),
            description: "یک لوگو برای کافی‌شاپی به نام \"صبح\" طراحی کن. رنگ‌های ملایم و قهوه‌ای مد نظر صاحب کاره.".to_string(),
        },
        ProjectEntry {
            skill: "برنامه‌نویسی".to_string(),
            description: "یک تابع پایتون بنویس که اعداد زوج یک لیست را برگرداند.".to_string(),
        },
        ProjectEntry {
            skill: "ترجمه".to_string(),
            description: "متن زیر را به انگلیسی روان ترجمه کن: \"ایران کشوری با تاریخ و فرهنگ غنی است.\"".to_string(),
        },
    ]
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}

impl AppConfig {
    /// Reads `path` if it exists, otherwise starts from defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        // An empty file deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Fills the secrets and the `PORT` override from the process environment.
    pub fn resolve_env(&mut self) -> Result<()> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| -> Result<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => bail!("Environment variable {} is not set", name),
            }
        };

        self.services.telegram.token = required(&self.services.telegram.token_env)?;
        self.services.llm.api_key = required(&self.services.llm.api_key_env)?;

        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", port))?;
        }
        Ok(())
    }
}
