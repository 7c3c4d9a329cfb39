//! Per-key precedence: non-empty env var, then non-empty file value, then
//! the hard-coded default.

use std::collections::HashMap;

use mars_core::error::{MarsError, Result};

use super::schema::ConfigSection;

/// Env var that switches on debug logging.
pub const DEBUG_ENV: &str = "FLASK_DEBUG";
/// Env var naming the directory for `info.log`.
pub const LOG_DIR_ENV: &str = "LOG_DIR";
pub const DEFAULT_LOG_DIR: &str = "/mnt/logs";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    StoreHost,
    StorePort,
    ServerHost,
    ServerPort,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 4] = [
        ConfigKey::StoreHost,
        ConfigKey::StorePort,
        ConfigKey::ServerHost,
        ConfigKey::ServerPort,
    ];

    pub fn env_var(self) -> &'static str {
        match self {
            ConfigKey::StoreHost => "REDIS_HOST",
            ConfigKey::StorePort => "REDIS_PORT",
            ConfigKey::ServerHost => "SERVER_HOST",
            ConfigKey::ServerPort => "SERVER_PORT",
        }
    }

    pub fn file_key(self) -> &'static str {
        match self {
            ConfigKey::StoreHost => "redis_address",
            ConfigKey::StorePort => "redis_port",
            ConfigKey::ServerHost => "server_address",
            ConfigKey::ServerPort => "server_port",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            ConfigKey::StoreHost => "localhost",
            ConfigKey::StorePort => "6379",
            ConfigKey::ServerHost => "0.0.0.0",
            ConfigKey::ServerPort => "5000",
        }
    }
}

/// Env snapshot plus the file section. Tests build one from a plain map so
/// they never touch the process environment.
#[derive(Debug, Default)]
pub struct ConfigResolver {
    env: HashMap<String, String>,
    file: ConfigSection,
}

impl ConfigResolver {
    pub fn new(env: HashMap<String, String>, file: ConfigSection) -> Self {
        Self { env, file }
    }

    pub fn from_process_env() -> Self {
        Self::new(std::env::vars().collect(), ConfigSection::default())
    }

    pub fn with_file(mut self, file: ConfigSection) -> Self {
        self.file = file;
        self
    }

    /// Non-empty env value, trimmed.
    pub fn env(&self, name: &str) -> Option<String> {
        non_empty(self.env.get(name).cloned())
    }

    /// Env, then file. `None` means the default applies.
    pub fn resolve(&self, key: ConfigKey) -> Option<String> {
        self.env(key.env_var())
            .or_else(|| non_empty(self.file.get(key.file_key())))
    }

    pub fn resolve_or_default(&self, key: ConfigKey) -> String {
        self.resolve(key)
            .unwrap_or_else(|| key.default_value().to_string())
    }

    pub fn debug(&self) -> bool {
        self.env(DEBUG_ENV)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn log_dir(&self) -> String {
        self.env(LOG_DIR_ENV)
            .unwrap_or_else(|| DEFAULT_LOG_DIR.to_string())
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        if self.debug() {
            "debug"
        } else {
            "info"
        }
    }

    pub fn effective(&self, config_path: impl Into<String>) -> Result<EffectiveConfig> {
        Ok(EffectiveConfig {
            store_host: self.resolve_or_default(ConfigKey::StoreHost),
            store_port: self.port(ConfigKey::StorePort)?,
            server_host: self.resolve_or_default(ConfigKey::ServerHost),
            server_port: self.port(ConfigKey::ServerPort)?,
            debug: self.debug(),
            config_path: config_path.into(),
        })
    }

    fn port(&self, key: ConfigKey) -> Result<u16> {
        let raw = self.resolve_or_default(key);
        match raw.parse::<u16>() {
            Ok(p) if p != 0 => Ok(p),
            _ => Err(MarsError::InvalidPort { key: key.env_var(), value: raw }),
        }
    }
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Resolved once at startup, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub store_host: String,
    pub store_port: u16,
    pub server_host: String,
    pub server_port: u16,
    pub debug: bool,
    pub config_path: String,
}

impl EffectiveConfig {
    pub fn store_url(&self) -> String {
        format!("redis://{}:{}/", self.store_host, self.store_port)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
