//! All-or-nothing execution of script statements.
//!
//! Every statement runs inside one transaction owned by the applier.
//! `COMMIT` and `ROLLBACK` found in the script are skipped, never forwarded.
//! The first failing statement triggers a rollback and is reported with its
//! position; a failing rollback is logged and attached to that error but
//! never replaces it. A failing commit is rolled back as well.

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::core::traits::ScriptExecutor;
use crate::error::{MetaError, Result};
use crate::script::Statement;

/// Outcome of a committed apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Statements sent to the executor.
    pub executed: usize,
    /// Blank and transaction-control statements skipped.
    pub skipped: usize,
}

/// Execute `statements` in order inside one transaction.
///
/// Commits only if every statement succeeds.
pub async fn apply_statements<E>(statements: &[Statement], executor: &E) -> Result<ApplyReport>
where
    E: ScriptExecutor + ?Sized,
{
    let mut tx = executor.begin_transaction().await?;
    let mut report = ApplyReport::default();

    for (index, statement) in statements.iter().enumerate() {
        if statement.is_blank() {
            report.skipped += 1;
            continue;
        }
        if statement.is_transaction_control() {
            warn!(
                "Skipping statement {}: '{}' (transaction is managed by the tool)",
                index,
                statement.as_str().trim()
            );
            report.skipped += 1;
            continue;
        }

        debug!("Executing statement {}", index);
        if let Err(e) = executor.execute(statement.as_str(), &mut tx).await {
            error!("Statement {} failed: {}", index, e);
            info!("Rolling back transaction");

            let rollback_error = match executor.rollback(tx).await {
                Ok(()) => None,
                Err(rollback) => {
                    error!("Error during rollback: {}", rollback);
                    Some(rollback.to_string())
                }
            };

            return Err(MetaError::StatementFailed {
                index,
                statement: statement.as_str().to_string(),
                message: e.to_string(),
                rollback_error,
            });
        }
        report.executed += 1;
    }

    if let Err(e) = executor.commit(&mut tx).await {
        error!("Commit failed: {}", e);
        info!("Rolling back transaction");
        if let Err(rollback) = executor.rollback(tx).await {
            error!("Error during rollback: {}", rollback);
        }
        return Err(e);
    }
    info!(
        "Transaction committed ({} executed, {} skipped)",
        report.executed, report.skipped
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingExecutor;

    fn statements(sql: &[&str]) -> Vec<Statement> {
        sql.iter().map(|s| Statement::new(*s)).collect()
    }

    #[tokio::test]
    async fn test_all_statements_commit() {
        let executor = RecordingExecutor::new();
        let report = apply_statements(
            &statements(&["CREATE DOMAIN D AS INTEGER", "CREATE TABLE T (A D)"]),
            &executor,
        )
        .await
        .unwrap();

        assert_eq!(report, ApplyReport { executed: 2, skipped: 0 });
        assert_eq!(
            executor.committed(),
            vec!["CREATE DOMAIN D AS INTEGER", "CREATE TABLE T (A D)"]
        );
        assert_eq!(executor.events(), vec!["begin", "exec", "exec", "commit"]);
    }

    #[tokio::test]
    async fn test_transaction_control_statements_skipped() {
        let executor = RecordingExecutor::new();
        let report = apply_statements(
            &statements(&["CREATE TABLE T (A INTEGER)", " commit ", "Rollback", "", "COMMIT WORK"]),
            &executor,
        )
        .await
        .unwrap();

        assert_eq!(report, ApplyReport { executed: 2, skipped: 3 });
        assert_eq!(
            executor.committed(),
            vec!["CREATE TABLE T (A INTEGER)", "COMMIT WORK"]
        );
    }

    #[tokio::test]
    async fn test_failure_rolls_back_and_reports_index() {
        let executor = RecordingExecutor::failing_on("CREATE TABLE BAD");
        let err = apply_statements(
            &statements(&["CREATE DOMAIN D AS INTEGER", "CREATE TABLE BAD (X)", "CREATE TABLE T (A D)"]),
            &executor,
        )
        .await
        .unwrap_err();

        match err {
            MetaError::StatementFailed {
                index,
                statement,
                rollback_error,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(statement, "CREATE TABLE BAD (X)");
                assert!(rollback_error.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(executor.committed().is_empty());
        assert_eq!(executor.events(), vec!["begin", "exec", "exec", "rollback"]);
    }

    #[tokio::test]
    async fn test_rollback_failure_does_not_mask_original_error() {
        let executor = RecordingExecutor::failing_on("DROP").with_failing_rollback();
        let err = apply_statements(&statements(&["DROP TABLE X"]), &executor)
            .await
            .unwrap_err();

        match err {
            MetaError::StatementFailed {
                index,
                message,
                rollback_error,
                ..
            } => {
                assert_eq!(index, 0);
                assert!(message.contains("DROP TABLE X"));
                assert!(rollback_error.unwrap().contains("rollback failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commit_failure_rolls_back() {
        let executor = RecordingExecutor::new().with_failing_commit();
        let err = apply_statements(&statements(&["CREATE TABLE T (A INTEGER)"]), &executor)
            .await
            .unwrap_err();

        assert!(matches!(err, MetaError::Database(ref msg) if msg.contains("commit failed")));
        assert!(executor.committed().is_empty());
        assert_eq!(executor.events(), vec!["begin", "exec", "commit", "rollback"]);
    }

    #[tokio::test]
    async fn test_commit_failure_survives_rollback_failure() {
        let executor = RecordingExecutor::new()
            .with_failing_commit()
            .with_failing_rollback();
        let err = apply_statements(&statements(&["CREATE TABLE T (A INTEGER)"]), &executor)
            .await
            .unwrap_err();

        assert!(matches!(err, MetaError::Database(ref msg) if msg.contains("commit failed")));
    }

    #[tokio::test]
    async fn test_begin_failure_propagates() {
        let executor = RecordingExecutor::new().with_failing_begin();
        let err = apply_statements(&statements(&["SELECT 1 FROM RDB$DATABASE"]), &executor)
            .await
            .unwrap_err();
        assert!(matches!(err, MetaError::Database(_)));
        assert!(executor.events().is_empty());
    }

    #[tokio::test]
    async fn test_empty_statement_list_commits() {
        let executor = RecordingExecutor::new();
        let report = apply_statements(&[], &executor).await.unwrap();
        assert_eq!(report, ApplyReport::default());
        assert_eq!(executor.events(), vec!["begin", "commit"]);
    }
}
