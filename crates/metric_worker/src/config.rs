use common::domain::{SchemaVersion, UnknownSchemaVersion};
use config::{Config, ConfigError, Environment};
use garde::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    #[garde(length(min = 1))]
    pub log_level: String,

    /// Service name reported in logs
    #[serde(default = "default_service_name")]
    #[garde(length(min = 1))]
    pub service_name: String,

    /// Metric schema version (v1, v2, v3)
    #[serde(default = "default_schema_version")]
    #[garde(length(min = 1))]
    pub schema_version: String,

    /// Event action routed to the insert validator
    #[serde(default = "default_insert_action")]
    #[garde(length(min = 1))]
    pub insert_action: String,

    /// Subject attached to messages read from stdin
    #[serde(default = "default_subject")]
    #[garde(length(min = 1))]
    pub subject: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "metric-worker".to_string()
}

fn default_schema_version() -> String {
    SchemaVersion::default().to_string()
}

fn default_insert_action() -> String {
    "insert".to_string()
}

fn default_subject() -> String {
    "metrics.events".to_string()
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("METRIC"))
            .build()?
            .try_deserialize()
    }

    pub fn schema_version(&self) -> Result<SchemaVersion, UnknownSchemaVersion> {
        self.schema_version.parse()
    }
}
