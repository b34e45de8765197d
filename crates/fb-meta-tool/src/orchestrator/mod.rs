//! Pipelines tying metadata sources, the renderer, the splitter and the
//! applier together.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::apply::apply_statements;
use crate::catalog::SnapshotSource;
use crate::config::ExportConfig;
use crate::core::traits::{MetadataSource, ScriptExecutor};
use crate::ddl::render_schema;
use crate::error::Result;
use crate::script::{load_script, split_script_detailed};

/// File name of the JSON snapshot written next to the script.
pub const SNAPSHOT_FILE_NAME: &str = "schema.json";

/// Result of an export run.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    /// Written DDL script.
    pub script_path: PathBuf,

    /// Written JSON snapshot, if enabled.
    pub snapshot_path: Option<PathBuf>,

    pub domains: usize,
    pub tables: usize,
    pub procedures: usize,

    /// Start time.
    pub started_at: DateTime<Utc>,

    /// Duration in seconds.
    pub duration_seconds: f64,
}

impl ExportResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Result of a committed update run.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResult {
    /// Script that was applied.
    pub script_path: PathBuf,

    /// Statements produced by the splitter.
    pub statements: usize,

    /// Statements executed.
    pub executed: usize,

    /// Blank and transaction-control statements skipped.
    pub skipped: usize,

    /// Whether unterminated text at the end of the script was dropped.
    pub discarded_trailing_text: bool,

    /// Start time.
    pub started_at: DateTime<Utc>,

    /// Duration in seconds.
    pub duration_seconds: f64,
}

impl UpdateResult {
    /// Convert to JSON string.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Export the schema of `source` as a DDL script into `output_dir`.
///
/// The whole schema is read before anything is written, so a failing source
/// leaves `output_dir` untouched.
pub async fn export_scripts<S>(
    source: &S,
    output_dir: &Path,
    options: &ExportConfig,
) -> Result<ExportResult>
where
    S: MetadataSource + ?Sized,
{
    let started_at = Utc::now();

    info!("Phase 1: Reading metadata");
    let schema = source.load_schema().await?;
    info!(
        "Found {} domains, {} tables, {} procedures",
        schema.domains.len(),
        schema.tables.len(),
        schema.procedures.len()
    );

    info!("Phase 2: Writing scripts to {}", output_dir.display());
    let script = render_schema(&schema);
    tokio::fs::create_dir_all(output_dir).await?;

    let script_path = output_dir.join(&options.file_name);
    tokio::fs::write(&script_path, script).await?;

    let snapshot_path = if options.json_snapshot {
        let path = output_dir.join(SNAPSHOT_FILE_NAME);
        tokio::fs::write(&path, schema.to_json()?).await?;
        Some(path)
    } else {
        None
    };

    let result = ExportResult {
        script_path,
        snapshot_path,
        domains: schema.domains.len(),
        tables: schema.tables.len(),
        procedures: schema.procedures.len(),
        started_at,
        duration_seconds: elapsed_seconds(started_at),
    };

    info!(
        "Export completed: {} objects written to {} in {:.1}s",
        schema.object_count(),
        result.script_path.display(),
        result.duration_seconds
    );
    Ok(result)
}

/// Apply the script found in `scripts_dir` through `executor` as a single
/// transaction.
pub async fn update_database<E>(executor: &E, scripts_dir: &Path) -> Result<UpdateResult>
where
    E: ScriptExecutor + ?Sized,
{
    let started_at = Utc::now();

    info!("Phase 1: Loading script from {}", scripts_dir.display());
    let (script_path, content) = load_script(scripts_dir)?;
    let split = split_script_detailed(&content);
    if let Some(rest) = &split.discarded {
        warn!(
            "Discarding unterminated text at end of {}: '{}'",
            script_path.display(),
            rest.trim()
        );
    }
    info!(
        "Split {} into {} statements",
        script_path.display(),
        split.statements.len()
    );

    info!("Phase 2: Applying statements");
    let report = apply_statements(&split.statements, executor).await?;

    let result = UpdateResult {
        script_path,
        statements: split.statements.len(),
        executed: report.executed,
        skipped: report.skipped,
        discarded_trailing_text: split.discarded.is_some(),
        started_at,
        duration_seconds: elapsed_seconds(started_at),
    };

    info!(
        "Update completed: {} statements executed in {:.1}s",
        result.executed, result.duration_seconds
    );
    Ok(result)
}

/// Render a JSON schema snapshot to a DDL script without a database.
pub async fn render_snapshot(
    json_path: &Path,
    output_dir: &Path,
    options: &ExportConfig,
) -> Result<ExportResult> {
    info!("Loading snapshot {}", json_path.display());
    let source = SnapshotSource::load(json_path)?;
    export_scripts(&source, output_dir, options).await
}

/// Create an empty database in `db_dir` and apply the script from
/// `scripts_dir` to it.
#[cfg(feature = "firebird")]
pub async fn build_database(
    config: &crate::config::Config,
    db_dir: &Path,
    scripts_dir: &Path,
) -> Result<UpdateResult> {
    use crate::drivers::{create_database, FirebirdWriter};

    info!("Creating new database in {}", db_dir.display());
    let target = create_database(&config.connection, &config.build, db_dir).await?;
    let writer = FirebirdWriter::new(&target).await?;
    update_database(&writer, scripts_dir).await
}

fn elapsed_seconds(started_at: DateTime<Utc>) -> f64 {
    (Utc::now() - started_at).num_milliseconds() as f64 / 1000.0
}
