use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub smtp: SmtpConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Record store backend selection
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// "memory" (default) or "postgres"; postgres reads DATABASE_URL
    pub backend: String,
}

/// SMTP transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Account address; also used as the sender address
    pub username: String,
    pub password: String,
    pub from_name: String,
}

/// Daily scan schedule configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Local wall-clock hour the scan fires
    pub hour: u32,
    pub minute: u32,
    /// Pause between notification attempts during a scan
    pub pace_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "smtp.gmail.com".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_name: "Birthday Reminder".to_string(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hour: 7,
            minute: 0,
            pace_secs: 1,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.schedule.hour, 7);
        assert_eq!(config.schedule.minute, 0);
        assert_eq!(config.schedule.pace_secs, 1);
        assert_eq!(config.smtp.port, 587);
    }

    #[test]
    fn test_deserializes_partial_config() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "host": "127.0.0.1", "port": 8080 },
            "schedule": { "hour": 9 }
        }))
        .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.schedule.hour, 9);
        // Unspecified fields fall back to defaults
        assert_eq!(config.schedule.minute, 0);
        assert_eq!(config.storage.backend, "memory");
    }
}
