use serde::Deserialize;

/// INI section holding every key we read.
pub const SECTION: &str = "config";

/// Parsed config file. Other sections are ignored.
#[derive(Debug, Default)]
pub struct ConfigFile {
    pub config: ConfigSection,
}

/// `[config]` keys. INI values are untyped; ports are parsed later.
/// Unknown keys are ignored.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigSection {
    #[serde(default)]
    pub redis_address: Option<String>,
    #[serde(default)]
    pub redis_port: Option<String>,
    #[serde(default)]
    pub server_address: Option<String>,
    #[serde(default)]
    pub server_port: Option<String>,
}

impl ConfigSection {
    /// Look up a value by its file key name.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "redis_address" => self.redis_address.clone(),
            "redis_port" => self.redis_port.clone(),
            "server_address" => self.server_address.clone(),
            "server_port" => self.server_port.clone(),
            _ => None,
        }
    }
}
