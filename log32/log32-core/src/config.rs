//! Construction-time configuration of loggers and handlers

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::level::LogLevel;
use crate::logger::UnsetLevelPolicy;

/// Serial console handler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Wrap lines in ANSI colors
    pub color: bool,
    /// Bring the console up at this rate; 0 = already initialized
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            color: true,
            baud_rate: 0,
        }
    }
}

/// Syslog (UDP) handler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyslogConfig {
    /// Wrap messages in ANSI colors
    pub color: bool,
    /// Name or IP address of the syslog server
    pub host: String,
    /// UDP port of the syslog server
    pub port: u16,
    /// Syslog facility, 0..=23 (1 = user-level)
    pub facility: u8,
}

impl Default for SyslogConfig {
    fn default() -> Self {
        Self {
            color: false,
            host: String::new(),
            port: 514,
            facility: 1,
        }
    }
}

impl SyslogConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::MissingHost);
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.facility > 23 {
            return Err(ConfigError::InvalidFacility(self.facility));
        }
        Ok(())
    }
}

/// Level override for a module logger derived from the root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub tag: String,
    #[serde(default)]
    pub level: LogLevel,
}

/// Complete logging setup: root logger, its sinks and module overrides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tag of the root logger
    pub tag: String,
    /// Level of the root logger
    pub level: LogLevel,
    /// Device id set on the root logger (e.g. derived from the MAC address)
    pub device_id: Option<String>,
    /// What an all-unset chain means
    pub unset_policy: UnsetLevelPolicy,
    pub serial: Option<SerialConfig>,
    pub syslog: Option<SyslogConfig>,
    /// Child loggers of the root to create up front
    pub modules: Vec<ModuleConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            tag: "main".to_string(),
            level: LogLevel::NOTSET,
            device_id: None,
            unset_policy: UnsetLevelPolicy::default(),
            serial: Some(SerialConfig::default()),
            syslog: None,
            modules: Vec::new(),
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.serial.is_none() && self.syslog.is_none() {
            return Err(ConfigError::NoSink);
        }
        if let Some(syslog) = &self.syslog {
            syslog.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_config_default() {
        let config = SerialConfig::default();
        assert!(config.color);
        assert_eq!(config.baud_rate, 0);
    }

    #[test]
    fn test_syslog_config_validate() {
        let mut config = SyslogConfig {
            host: "syslog.local".to_string(),
            ..SyslogConfig::default()
        };
        assert_eq!(config.validate(), Ok(()));

        config.port = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidPort));

        config.port = 514;
        config.facility = 24;
        assert_eq!(config.validate(), Err(ConfigError::InvalidFacility(24)));

        config.facility = 23;
        config.host = " ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::MissingHost));
    }

    #[test]
    fn test_logging_config_requires_sink() {
        let config = LoggingConfig {
            serial: None,
            ..LoggingConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoSink));
        assert_eq!(LoggingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{
            "level": 20,
            "device_id": "e32-a1b2c3",
            "serial": { "baud_rate": 115200 },
            "syslog": { "host": "192.168.178.20", "port": 10000 },
            "modules": [ { "tag": "anotherModule", "level": 30 }, { "tag": "wifi" } ]
        }"#;
        let config: LoggingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.tag, "main");
        assert_eq!(config.level, LogLevel::INFO);
        assert_eq!(config.device_id.as_deref(), Some("e32-a1b2c3"));
        assert_eq!(config.unset_policy, UnsetLevelPolicy::AllowAll);
        assert_eq!(
            config.serial,
            Some(SerialConfig {
                color: true,
                baud_rate: 115_200
            })
        );
        let syslog = config.syslog.as_ref().unwrap();
        assert_eq!(syslog.port, 10_000);
        assert_eq!(syslog.facility, 1);
        assert!(!syslog.color);
        assert_eq!(config.modules.len(), 2);
        assert_eq!(config.modules[0].level, LogLevel::WARNING);
        assert_eq!(config.modules[1].level, LogLevel::NOTSET);
    }

    #[test]
    fn test_parse_suppress_policy() {
        let config: LoggingConfig =
            serde_json::from_str(r#"{ "unset_policy": "suppress_all" }"#).unwrap();
        assert_eq!(config.unset_policy, UnsetLevelPolicy::SuppressAll);
        assert!(config.serial.is_some());
    }
}
