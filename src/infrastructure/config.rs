use anyhow::Context;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use crate::domain::counter::DEFAULT_DURATION_MS;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub counter: CounterSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where the flight data document lives. Without a `url` nothing is fetched.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub url: Option<String>,
    pub token: Option<String>,
    #[serde(default = "default_key")]
    pub key: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CounterSettings {
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_key() -> String {
    "flight_data".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_duration_ms() -> u64 {
    DEFAULT_DURATION_MS
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            url: None,
            token: None,
            key: default_key(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

impl StoreSettings {
    /// Base URL without trailing slash, or `None` when unset or blank.
    pub fn base_url(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(|u| u.trim().trim_end_matches('/'))
            .filter(|u| !u.is_empty())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl CounterSettings {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

/// Layers `config/dashboard.*`, `DASHBOARD__SECTION__KEY` variables and the
/// conventional `UPSTASH_URL` / `UPSTASH_TOKEN` variables, in that order.
pub fn load_config() -> anyhow::Result<AppConfig> {
    let builder = config::Config::builder()
        .add_source(File::with_name("config/dashboard").required(false))
        .add_source(Environment::with_prefix("DASHBOARD").separator("__"))
        .set_override_option("store.url", non_empty_var("UPSTASH_URL"))?
        .set_override_option("store.token", non_empty_var("UPSTASH_TOKEN"))?;

    build_config(builder)
}

pub fn build_config(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<AppConfig> {
    let settings = builder.build()?;
    Ok(settings.try_deserialize()?)
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> AppConfig {
        build_config(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml))).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_toml("");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.store.key, "flight_data");
        assert_eq!(config.store.base_url(), None);
        assert_eq!(config.counter.duration_ms, 2000);
        assert_eq!(config.counter.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_store_section() {
        let config = from_toml(
            r#"
            [store]
            url = "https://kv.example.com/"
            token = "secret"
            key = "flights"

            [server]
            host = "127.0.0.1"
            port = 3000
            "#,
        );

        assert_eq!(config.store.base_url(), Some("https://kv.example.com"));
        assert_eq!(config.store.token.as_deref(), Some("secret"));
        assert_eq!(config.store.key, "flights");
        assert_eq!(config.server.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_blank_url_is_unconfigured() {
        let config = from_toml("[store]\nurl = \"  \"");
        assert_eq!(config.store.base_url(), None);
    }
}
