//! In-memory executor and metadata sources for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::schema::{Domain, Procedure, Table};
use crate::core::traits::{MetadataSource, ScriptExecutor};
use crate::error::{MetaError, Result};

#[derive(Default)]
struct Recorded {
    events: Vec<&'static str>,
    committed: Vec<String>,
}

/// Executor that records calls and keeps statements of committed
/// transactions only.
#[derive(Default)]
pub struct RecordingExecutor {
    fail_on: Option<String>,
    fail_begin: bool,
    fail_commit: bool,
    fail_rollback: bool,
    recorded: Mutex<Recorded>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any statement starting with `prefix`.
    pub fn failing_on(prefix: &str) -> Self {
        Self {
            fail_on: Some(prefix.to_string()),
            ..Self::default()
        }
    }

    pub fn with_failing_begin(mut self) -> Self {
        self.fail_begin = true;
        self
    }

    pub fn with_failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn with_failing_rollback(mut self) -> Self {
        self.fail_rollback = true;
        self
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.recorded.lock().unwrap().events.clone()
    }

    /// Statements whose transaction was committed.
    pub fn committed(&self) -> Vec<String> {
        self.recorded.lock().unwrap().committed.clone()
    }

    fn record(&self, event: &'static str) {
        self.recorded.lock().unwrap().events.push(event);
    }
}

#[async_trait]
impl ScriptExecutor for RecordingExecutor {
    type Transaction = Vec<String>;

    async fn begin_transaction(&self) -> Result<Self::Transaction> {
        if self.fail_begin {
            return Err(MetaError::database("connection refused"));
        }
        self.record("begin");
        Ok(Vec::new())
    }

    async fn execute(&self, sql: &str, tx: &mut Self::Transaction) -> Result<()> {
        self.record("exec");
        if let Some(prefix) = &self.fail_on {
            if sql.starts_with(prefix.as_str()) {
                return Err(MetaError::database(format!("cannot execute: {}", sql)));
            }
        }
        tx.push(sql.to_string());
        Ok(())
    }

    async fn commit(&self, tx: &mut Self::Transaction) -> Result<()> {
        let mut recorded = self.recorded.lock().unwrap();
        recorded.events.push("commit");
        if self.fail_commit {
            return Err(MetaError::database("commit failed"));
        }
        recorded.committed.append(tx);
        Ok(())
    }

    async fn rollback(&self, _tx: Self::Transaction) -> Result<()> {
        self.record("rollback");
        if self.fail_rollback {
            return Err(MetaError::database("rollback failed"));
        }
        Ok(())
    }
}

/// Metadata source whose `tables` call fails.
pub struct FailingSource;

#[async_trait]
impl MetadataSource for FailingSource {
    async fn domains(&self) -> Result<Vec<Domain>> {
        Ok(vec![Domain::new("D", "INTEGER")])
    }

    async fn tables(&self) -> Result<Vec<Table>> {
        Err(MetaError::source_failure("catalog query failed"))
    }

    async fn procedures(&self) -> Result<Vec<Procedure>> {
        Ok(Vec::new())
    }
}
