//! Config resolution: environment first, then the config file, then defaults.

pub mod resolve;
pub mod schema;

use std::fs;

use ::config::{Config, ConfigError, File, FileFormat};

use mars_core::error::{MarsError, Result};

pub use resolve::{ConfigKey, ConfigResolver, EffectiveConfig};
pub use schema::{ConfigFile, ConfigSection, SECTION};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
/// Used when `CONFIG_PATH` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "mars.config";

pub fn load_from_file(path: &str) -> Result<ConfigFile> {
    let s = fs::read_to_string(path)
        .map_err(|e| MarsError::Config(format!("read {path} failed: {e}")))?;
    load_from_str(&s)
}

/// Parse INI text. Only the `[config]` section is read; a missing section
/// or missing keys fall through to the defaults.
pub fn load_from_str(s: &str) -> Result<ConfigFile> {
    let parsed = Config::builder()
        .add_source(File::from_str(s, FileFormat::Ini))
        .build()
        .map_err(|e| MarsError::Config(format!("invalid ini: {e}")))?;

    let config = match parsed.get::<ConfigSection>(SECTION) {
        Ok(section) => section,
        Err(ConfigError::NotFound(_)) => ConfigSection::default(),
        Err(e) => return Err(MarsError::Config(format!("invalid [{SECTION}] section: {e}"))),
    };
    Ok(ConfigFile { config })
}

/// Resolve the effective config from the process environment and the
/// file it points at. Any failure here is fatal for startup.
pub fn load_effective() -> Result<EffectiveConfig> {
    let resolver = ConfigResolver::from_process_env();
    let path = resolver
        .env(CONFIG_PATH_ENV)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let file = load_from_file(&path)?;
    resolver.with_file(file.config).effective(path)
}
