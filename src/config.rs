//! Ambient configuration: per-call defaults overridable from the
//! environment or an optional TOML file.

use serde::Deserialize;

pub const DEFAULT_DUBBO_VERSION: &str = "2.4.10";
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("DUBBO_INVOKE_TIMEOUT_MS={0:?} is not a valid u64")]
    InvalidTimeoutEnv(String),
}

/// Defaults for `dubboVersion` and `timeoutMs` when a call omits them.
/// Overridable by an optional TOML file (`[defaults]` table) and then by
/// environment variables, in that order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub dubbo_version: String,
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dubbo_version: DEFAULT_DUBBO_VERSION.to_owned(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    defaults: Config,
}

impl Config {
    /// Loads defaults from `toml_source` (if any) and then layers
    /// environment overrides on top.
    pub fn load(toml_source: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match toml_source {
            Some(source) => toml::from_str::<ConfigFile>(source)?.defaults,
            None => Config::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(version) = std::env::var("DUBBO_INVOKE_VERSION") {
            self.dubbo_version = version;
        }
        if let Ok(timeout) = std::env::var("DUBBO_INVOKE_TIMEOUT_MS") {
            self.timeout_ms = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidTimeoutEnv(timeout))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.dubbo_version, "2.4.10");
        assert_eq!(config.timeout_ms, 60_000);
    }

    #[test]
    fn toml_source_overrides_defaults() {
        let config = Config::load(Some("[defaults]\ndubbo_version = \"2.6.0\"\ntimeout_ms = 1000\n")).unwrap();
        assert_eq!(config.dubbo_version, "2.6.0");
        assert_eq!(config.timeout_ms, 1000);
    }

    #[test]
    fn missing_toml_table_falls_back_to_defaults() {
        let config = Config::load(Some("")).unwrap();
        assert_eq!(config.dubbo_version, DEFAULT_DUBBO_VERSION);
    }
}
