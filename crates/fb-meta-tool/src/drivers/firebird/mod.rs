//! Firebird database driver.
//!
//! This module provides Firebird-specific implementations for:
//! - [`FirebirdReader`]: metadata source over the system catalog
//! - [`FirebirdWriter`]: script executor with one connection-level transaction
//! - [`create_database`]: creation of an empty database file
//!
//! # Feature Flag
//!
//! This module is only available when the `firebird` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! fb-meta-tool = { version = "0.3", features = ["firebird"] }
//! ```
//!
//! # Client
//!
//! Uses the pure Rust wire protocol client from `rsfbclient`, so no
//! `fbclient` library is needed at runtime. The client is blocking; every
//! call runs on the tokio blocking pool.

mod reader;
mod writer;

pub use reader::FirebirdReader;
pub use writer::{FirebirdTransaction, FirebirdWriter};

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rsfbclient::charset::{self, Charset};
use rsfbclient::SimpleConnection;
use tracing::{info, warn};

use crate::config::{BuildConfig, ConnectionConfig};
use crate::error::{MetaError, Result};

/// Shared handle to a blocking Firebird connection.
#[derive(Clone)]
pub(crate) struct SharedConnection {
    inner: Arc<Mutex<SimpleConnection>>,
}

impl SharedConnection {
    /// Connect to the database named in `config`.
    pub(crate) async fn open(config: &ConnectionConfig) -> Result<Self> {
        let config = config.clone();
        let conn = tokio::task::spawn_blocking(move || -> Result<SimpleConnection> {
            let charset = parse_charset(&config.charset)?;
            let conn = rsfbclient::builder_pure_rust()
                .host(&config.host)
                .port(config.port)
                .db_name(&config.database)
                .user(&config.user)
                .pass(&config.password)
                .charset(charset)
                .connect()?;
            Ok(conn.into())
        })
        .await
        .map_err(|e| MetaError::database(format!("connection task failed: {}", e)))??;

        Ok(Self {
            inner: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` with exclusive access to the connection on the blocking pool.
    pub(crate) async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SimpleConnection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || {
            let mut conn = inner
                .lock()
                .map_err(|_| MetaError::database("connection lock poisoned"))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| MetaError::database(format!("database task failed: {}", e)))?
    }

    /// Run `f` on the calling thread; used where no runtime is available.
    pub(crate) fn run_blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SimpleConnection) -> Result<T>,
    {
        let mut conn = self
            .inner
            .lock()
            .map_err(|_| MetaError::database("connection lock poisoned"))?;
        f(&mut conn)
    }
}

/// Map a Firebird charset name to the client charset.
pub fn parse_charset(name: &str) -> Result<Charset> {
    match name.to_uppercase().replace('-', "").as_str() {
        "UTF8" => Ok(charset::UTF_8),
        "ISO88591" => Ok(charset::ISO_8859_1),
        "WIN1252" => Ok(charset::WIN_1252),
        other => Err(MetaError::Config(format!(
            "unsupported charset '{}'. Supported: UTF8, ISO8859_1, WIN1252",
            other
        ))),
    }
}

/// Create an empty database `<db_dir>/<build.database_file>` on the server
/// from `connection`, replacing any existing file.
///
/// Returns the connection settings pointing at the new database.
pub async fn create_database(
    connection: &ConnectionConfig,
    build: &BuildConfig,
    db_dir: &Path,
) -> Result<ConnectionConfig> {
    tokio::fs::create_dir_all(db_dir).await?;
    let db_path: PathBuf = db_dir.join(&build.database_file);

    if tokio::fs::try_exists(&db_path).await? {
        warn!("Overwriting existing database {}", db_path.display());
        tokio::fs::remove_file(&db_path).await?;
    }

    let target = ConnectionConfig {
        database: db_path.to_string_lossy().into_owned(),
        ..connection.clone()
    };
    info!("Creating database {}", target.display_target());

    let settings = target.clone();
    let page_size = build.page_size;
    tokio::task::spawn_blocking(move || -> Result<()> {
        let charset = parse_charset(&settings.charset)?;
        let conn = rsfbclient::builder_pure_rust()
            .host(&settings.host)
            .port(settings.port)
            .db_name(&settings.database)
            .user(&settings.user)
            .pass(&settings.password)
            .charset(charset)
            .page_size(page_size)
            .create_database()
            .map_err(|e| {
                MetaError::database(format!("error during database file creation: {}", e))
            })?;
        drop(conn);
        Ok(())
    })
    .await
    .map_err(|e| MetaError::database(format!("database creation task failed: {}", e)))??;

    info!("Database created");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_charset() {
        assert!(parse_charset("UTF8").is_ok());
        assert!(parse_charset("utf-8").is_ok());
        assert!(parse_charset("win1252").is_ok());
        assert!(matches!(parse_charset("KOI8R"), Err(MetaError::Config(_))));
    }
}
