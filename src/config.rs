use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::api::DEFAULT_API_URL;
use crate::env::Environment;
use crate::types::ALL_UPDATE_KINDS;

pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";
pub const SECRET_ENV_VAR: &str = "TELEGRAM_WEBHOOK_SECRET";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub webhook_secret: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Update kinds requested on webhook registration. `None` asks for every
    /// kind the dispatcher understands.
    #[serde(default)]
    pub allowed_updates: Option<Vec<String>>,
    /// Client-side timeout for Bot API calls. Unset means no timeout.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Public base URL the platform reaches us at, e.g. `https://bot.example.com`.
    #[serde(default)]
    pub public_url: Option<Url>,
    /// `Host` header values trusted for `/registerWebhook` when `public_url`
    /// is unset, e.g. `bot.example.com` or `localhost:8787`.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            public_url: None,
            allowed_hosts: Vec::new(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8787))
}

impl TelegramConfig {
    pub fn api_url(&self) -> Result<Url> {
        let url = Url::parse(&self.api_url)
            .with_context(|| format!("Invalid telegram.api_url: {}", self.api_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("telegram.api_url must be an http(s) URL: {}", self.api_url);
        }
        Ok(url)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content, |key| std::env::var(key).ok())
    }

    /// Parse a TOML document, filling empty secrets from `lookup_env`.
    pub fn from_toml(content: &str, lookup_env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config: Config = toml::from_str(content).context("Failed to parse config file")?;

        fill_from_env(&mut config.telegram.bot_token, TOKEN_ENV_VAR, &lookup_env);
        fill_from_env(&mut config.telegram.webhook_secret, SECRET_ENV_VAR, &lookup_env);

        if config.telegram.bot_token.is_empty() {
            anyhow::bail!(
                "telegram.bot_token is not set (config file or {})",
                TOKEN_ENV_VAR
            );
        }
        if config.telegram.webhook_secret.is_empty() {
            anyhow::bail!(
                "telegram.webhook_secret is not set (config file or {})",
                SECRET_ENV_VAR
            );
        }
        validate_secret(&config.telegram.webhook_secret)?;
        config.telegram.api_url()?;
        if let Some(kinds) = &config.telegram.allowed_updates {
            validate_update_kinds(kinds)?;
        }

        Ok(config)
    }

    pub fn environment(&self) -> Environment {
        Environment {
            secret: self.telegram.webhook_secret.clone(),
            token: self.telegram.bot_token.clone(),
        }
    }
}

fn fill_from_env(value: &mut String, key: &str, lookup_env: &impl Fn(&str) -> Option<String>) {
    if value.trim().is_empty() {
        if let Some(from_env) = lookup_env(key) {
            *value = from_env.trim().to_string();
        }
    }
}

/// Telegram only accepts 1-256 characters of `A-Z`, `a-z`, `0-9`, `_` and `-`.
fn validate_secret(secret: &str) -> Result<()> {
    if secret.len() > 256 {
        anyhow::bail!("telegram.webhook_secret must be at most 256 characters");
    }
    if let Some(bad) = secret
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        anyhow::bail!(
            "telegram.webhook_secret contains an invalid character: {:?}",
            bad
        );
    }
    Ok(())
}

fn validate_update_kinds(kinds: &[String]) -> Result<()> {
    for kind in kinds {
        if !ALL_UPDATE_KINDS.contains(&kind.as_str()) {
            anyhow::bail!("telegram.allowed_updates: unknown update kind {:?}", kind);
        }
    }
    Ok(())
}
