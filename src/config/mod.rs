use std::time::Duration;

use config::{Config, ConfigError};
use once_cell::sync::Lazy;
use rocket::serde::Deserialize;

/// config properties for the simulated latency the gateway adds to each operation
#[derive(Clone, Debug, PartialEq)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub min_millis: u64,
    pub max_millis: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogConfig {
    /// one of off, error, warn, info, debug, trace
    pub level: String,
}

/// browser origins allowed to call the api, e.g. the management ui's dev server
#[derive(Clone, Debug, PartialEq)]
pub struct CorsConfig {
    /// exact `Origin` header values. `*` allows any origin
    pub allowed_origins: Vec<String>,
}

/// config properties for the whole of this application
#[derive(Clone, Debug, PartialEq)]
pub struct TagManagerConfig {
    pub latency: LatencyConfig,
    pub logging: LogConfig,
    pub cors: CorsConfig,
}

/// Parses the config file located at ./TagManager.toml, if it exists.
/// A missing or unreadable file falls back to [`TagManagerConfig::default`]
pub fn parse_config() -> TagManagerConfig {
    parse_config_file("./TagManager.toml")
}

fn parse_config_file(path: &str) -> TagManagerConfig {
    let builder = Config::builder()
        .add_source(config::File::with_name(path))
        .build();
    let settings = match builder {
        Ok(settings) => settings,
        // some errors are fine, such as not found
        Err(ConfigError::Foreign(e)) if e.to_string().contains("not found") => {
            log::warn!("No config file found. Continuing startup...");
            return TagManagerConfig::default();
        }
        Err(ConfigError::NotFound(_)) => {
            log::warn!("No config file found. Continuing startup...");
            return TagManagerConfig::default();
        }
        Err(e) => {
            log::error!("Failed to parse config file. Falling back to defaults. Exception is {e}");
            return TagManagerConfig::default();
        }
    };
    match settings.try_deserialize::<PartialConfig>() {
        Ok(partial) => partial.into_config(),
        Err(e) => {
            log::error!("Failed to read config values. Falling back to defaults. Exception is {e}");
            TagManagerConfig::default()
        }
    }
}

/// global variable for config, that way it doesn't need to be repeatedly parsed
pub static TAG_MANAGER_CONFIG: Lazy<TagManagerConfig> = Lazy::new(parse_config);

/// the config file as written, where any section or key may be left out.
/// Keys are matched without underscores (`minmillis`), with the underscored spelling as an alias
#[derive(Deserialize, Default)]
#[serde(crate = "rocket::serde", default)]
struct PartialConfig {
    latency: PartialLatencyConfig,
    logging: PartialLogConfig,
    cors: PartialCorsConfig,
}

#[derive(Deserialize, Default)]
#[serde(crate = "rocket::serde", default)]
struct PartialLatencyConfig {
    enabled: Option<bool>,
    #[serde(alias = "min_millis")]
    minmillis: Option<u64>,
    #[serde(alias = "max_millis")]
    maxmillis: Option<u64>,
}

#[derive(Deserialize, Default)]
#[serde(crate = "rocket::serde", default)]
struct PartialLogConfig {
    level: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(crate = "rocket::serde", default)]
struct PartialCorsConfig {
    #[serde(alias = "allowed_origins")]
    allowedorigins: Option<Vec<String>>,
}

// ----------------------------------

impl PartialConfig {
    fn into_config(self) -> TagManagerConfig {
        let default = TagManagerConfig::default();
        TagManagerConfig {
            latency: LatencyConfig {
                enabled: self.latency.enabled.unwrap_or(default.latency.enabled),
                min_millis: self.latency.minmillis.unwrap_or(default.latency.min_millis),
                max_millis: self.latency.maxmillis.unwrap_or(default.latency.max_millis),
            },
            logging: LogConfig {
                level: self.logging.level.unwrap_or(default.logging.level),
            },
            cors: CorsConfig {
                allowed_origins: self
                    .cors
                    .allowedorigins
                    .unwrap_or(default.cors.allowed_origins),
            },
        }
    }
}

impl Default for TagManagerConfig {
    fn default() -> Self {
        Self {
            latency: LatencyConfig {
                enabled: false,
                min_millis: 300,
                max_millis: 800,
            },
            logging: LogConfig {
                level: "info".to_string(),
            },
            cors: CorsConfig::default(),
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://localhost:5174".to_string(),
                "http://localhost:3000".to_string(),
            ],
        }
    }
}

impl CorsConfig {
    pub fn allows(&self, origin: &str) -> bool {
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

impl LatencyConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            min_millis: 0,
            max_millis: 0,
        }
    }

    /// the inclusive range the simulated delay is picked from, or `None` if latency is turned off
    pub fn bounds(&self) -> Option<(Duration, Duration)> {
        if !self.enabled {
            return None;
        }
        let (min, max) = if self.min_millis <= self.max_millis {
            (self.min_millis, self.max_millis)
        } else {
            (self.max_millis, self.min_millis)
        };
        Some((Duration::from_millis(min), Duration::from_millis(max)))
    }
}

impl LogConfig {
    /// the configured level, or `Info` if it isn't a level name
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
