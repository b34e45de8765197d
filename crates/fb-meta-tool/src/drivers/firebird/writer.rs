//! Firebird script executor.

use async_trait::async_trait;
use rsfbclient::Execute;
use tracing::{debug, info, warn};

use super::SharedConnection;
use crate::config::ConnectionConfig;
use crate::core::traits::ScriptExecutor;
use crate::error::Result;

/// Executes statements against one Firebird connection.
pub struct FirebirdWriter {
    conn: SharedConnection,
}

impl FirebirdWriter {
    /// Connect to the database to update.
    pub async fn new(config: &ConnectionConfig) -> Result<Self> {
        let conn = SharedConnection::open(config).await?;
        info!("Connected to Firebird target: {}", config.display_target());
        Ok(Self { conn })
    }
}

/// Open connection-level transaction.
///
/// Dropping a transaction that was neither committed nor rolled back rolls
/// it back.
pub struct FirebirdTransaction {
    conn: SharedConnection,
    open: bool,
}

impl Drop for FirebirdTransaction {
    fn drop(&mut self) {
        if !self.open {
            return;
        }
        warn!("Transaction dropped while open, rolling back");
        if let Err(e) = self.conn.run_blocking(|conn| Ok(conn.rollback()?)) {
            warn!("Rollback of dropped transaction failed: {}", e);
        }
    }
}

#[async_trait]
impl ScriptExecutor for FirebirdWriter {
    type Transaction = FirebirdTransaction;

    async fn begin_transaction(&self) -> Result<Self::Transaction> {
        self.conn.run(|conn| Ok(conn.begin_transaction()?)).await?;
        debug!("Transaction started");
        Ok(FirebirdTransaction {
            conn: self.conn.clone(),
            open: true,
        })
    }

    async fn execute(&self, sql: &str, _tx: &mut Self::Transaction) -> Result<()> {
        let sql = sql.to_string();
        self.conn
            .run(move |conn| {
                conn.execute(&sql, ())?;
                Ok(())
            })
            .await
    }

    async fn commit(&self, tx: &mut Self::Transaction) -> Result<()> {
        self.conn.run(|conn| Ok(conn.commit()?)).await?;
        tx.open = false;
        Ok(())
    }

    async fn rollback(&self, mut tx: Self::Transaction) -> Result<()> {
        tx.open = false;
        self.conn.run(|conn| Ok(conn.rollback()?)).await
    }
}
