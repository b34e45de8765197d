//! Core traits for reading catalog metadata and executing scripts.
//!
//! - [`MetadataSource`]: yields the domains, tables and procedures of a database
//! - [`ScriptExecutor`]: runs SQL statements inside one explicit transaction
//!
//! Both are async so driver I/O sits behind `.await`; the core never spawns
//! tasks of its own.

use async_trait::async_trait;

use crate::error::Result;

use super::schema::{Domain, Procedure, Schema, Table};

/// Read schema metadata from a database catalog.
///
/// Each method returns the complete, ordered collection in a single call.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// User-defined domains.
    async fn domains(&self) -> Result<Vec<Domain>>;

    /// User tables with columns in ordinal order.
    async fn tables(&self) -> Result<Vec<Table>>;

    /// Procedures with input and output parameters in declaration order.
    async fn procedures(&self) -> Result<Vec<Procedure>>;

    /// Load the full schema model.
    ///
    /// Template method calling the three collection methods in the order the
    /// script is rendered. The first failure aborts the load.
    async fn load_schema(&self) -> Result<Schema> {
        let domains = self.domains().await?;
        let tables = self.tables().await?;
        let procedures = self.procedures().await?;
        Ok(Schema {
            domains,
            tables,
            procedures,
        })
    }
}

/// Execute statements against a live connection inside one transaction.
///
/// [`commit`] borrows the handle so a failed commit can still be rolled
/// back; [`rollback`] consumes it.
///
/// [`commit`]: ScriptExecutor::commit
/// [`rollback`]: ScriptExecutor::rollback
#[async_trait]
pub trait ScriptExecutor: Send + Sync {
    /// Handle for an open transaction.
    type Transaction: Send;

    /// Start a new transaction.
    async fn begin_transaction(&self) -> Result<Self::Transaction>;

    /// Execute one statement within the transaction.
    async fn execute(&self, sql: &str, tx: &mut Self::Transaction) -> Result<()>;

    /// Commit the transaction. On error the transaction is still open.
    async fn commit(&self, tx: &mut Self::Transaction) -> Result<()>;

    /// Roll the transaction back.
    async fn rollback(&self, tx: Self::Transaction) -> Result<()>;
}
