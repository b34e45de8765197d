//! Configuration type definitions.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{MetaError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Firebird connection settings.
    pub connection: ConnectionConfig,

    /// Export behavior.
    #[serde(default)]
    pub export: ExportConfig,

    /// New database settings for `build-db`.
    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Configuration with defaults for everything but the connection.
    pub fn with_connection(connection: ConnectionConfig) -> Self {
        Self {
            connection,
            export: ExportConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

/// Firebird server connection.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Server host (default: "localhost").
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port (default: 3050).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Database path or alias on the server.
    #[serde(default)]
    pub database: String,

    /// Username (default: "SYSDBA").
    #[serde(default = "default_user")]
    pub user: String,

    /// Password.
    #[serde(default)]
    pub password: String,

    /// Connection charset (default: "UTF8").
    #[serde(default = "default_charset")]
    pub charset: String,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: String::new(),
            user: default_user(),
            password: String::new(),
            charset: default_charset(),
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("charset", &self.charset)
            .finish()
    }
}

impl ConnectionConfig {
    /// Parse an ADO.NET style connection string
    /// (`User=SYSDBA;Password=...;Database=...;DataSource=localhost;Port=3050`).
    ///
    /// Keys are case-insensitive; unknown keys are ignored with a warning.
    pub fn from_connection_string(conn_str: &str) -> Result<Self> {
        let mut config = ConnectionConfig::default();

        for pair in conn_str.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                MetaError::Config(format!("invalid connection string segment '{}'", pair))
            })?;
            let value = value.trim().to_string();

            match key.trim().to_lowercase().as_str() {
                "user" | "userid" | "user id" | "username" => config.user = value,
                "password" | "pwd" => config.password = value,
                "database" | "initial catalog" => config.database = value,
                "datasource" | "data source" | "server" | "host" => config.host = value,
                "port" => {
                    config.port = value.parse().map_err(|_| {
                        MetaError::Config(format!("invalid port '{}' in connection string", value))
                    })?
                }
                "charset" | "character set" => config.charset = value,
                other => warn!("Ignoring connection string key '{}'", other),
            }
        }

        Ok(config)
    }

    /// `host/port:database`, for logging.
    pub fn display_target(&self) -> String {
        format!("{}/{}:{}", self.host, self.port, self.database)
    }
}

/// Export pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    /// Name of the generated script (default: "schema.sql").
    #[serde(default = "default_script_name")]
    pub file_name: String,

    /// Also write a `schema.json` snapshot of the model (default: false).
    #[serde(default)]
    pub json_snapshot: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_script_name(),
            json_snapshot: false,
        }
    }
}

/// Settings for creating a new database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildConfig {
    /// Database file created inside the target directory (default: "database_1.fdb").
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Page size in bytes (default: 8192).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            page_size: default_page_size(),
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3050
}

fn default_user() -> String {
    "SYSDBA".to_string()
}

fn default_charset() -> String {
    "UTF8".to_string()
}

fn default_script_name() -> String {
    "schema.sql".to_string()
}

fn default_database_file() -> String {
    "database_1.fdb".to_string()
}

fn default_page_size() -> u32 {
    8192
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_connection_string() {
        let config = ConnectionConfig::from_connection_string(
            "User=SYSDBA;Password=root;Database=/data/app.fdb;DataSource=db.local;Port=3051;Charset=UTF8",
        )
        .unwrap();
        assert_eq!(config.user, "SYSDBA");
        assert_eq!(config.password, "root");
        assert_eq!(config.database, "/data/app.fdb");
        assert_eq!(config.host, "db.local");
        assert_eq!(config.port, 3051);
        assert_eq!(config.charset, "UTF8");
    }

    #[test]
    fn test_parse_connection_string_aliases_and_defaults() {
        let config = ConnectionConfig::from_connection_string(
            " user id = admin ; pwd=secret; initial catalog=C:\\db\\fb5.fdb; ServerType=0;",
        )
        .unwrap();
        assert_eq!(config.user, "admin");
        assert_eq!(config.password, "secret");
        assert_eq!(config.database, "C:\\db\\fb5.fdb");
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 3050);
    }

    #[test]
    fn test_parse_connection_string_errors() {
        assert!(ConnectionConfig::from_connection_string("Port=abc").is_err());
        assert!(ConnectionConfig::from_connection_string("Database").is_err());
    }

    #[test]
    fn test_connection_debug_redacts_password() {
        let config = ConnectionConfig {
            password: "super_secret_password_123".to_string(),
            ..ConnectionConfig::default()
        };
        let debug_output = format!("{:?}", config);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password_123"));
    }
}
