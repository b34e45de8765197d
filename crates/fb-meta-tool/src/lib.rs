//! # fb-meta-tool
//!
//! Firebird schema metadata export and script application.
//!
//! This library provides:
//!
//! - **Metadata export**: domains, tables and stored procedures read from the
//!   system catalog and rendered as a re-runnable DDL script
//! - **Script splitting** with `SET TERM` terminator switching
//! - **All-or-nothing apply**: every statement of a script in one transaction
//! - **Offline rendering** of JSON schema snapshots
//!
//! The Firebird driver is behind the `firebird` feature.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use fb_meta_tool::{orchestrator, ExportConfig};
//!
//! #[tokio::main]
//! async fn main() -> fb_meta_tool::Result<()> {
//!     let result = orchestrator::render_snapshot(
//!         Path::new("schema.json"),
//!         Path::new("out"),
//!         &ExportConfig::default(),
//!     )
//!     .await?;
//!     println!("Wrote {}", result.script_path.display());
//!     Ok(())
//! }
//! ```

pub mod apply;
pub mod catalog;
pub mod config;
pub mod core;
pub mod ddl;
#[cfg(feature = "firebird")]
pub mod drivers;
pub mod error;
pub mod orchestrator;
pub mod script;
pub mod typemap;

#[cfg(test)]
mod test_support;

// Re-exports for convenient access
pub use apply::{apply_statements, ApplyReport};
pub use catalog::SnapshotSource;
pub use config::{BuildConfig, Config, ConnectionConfig, ExportConfig};
pub use crate::core::{MetadataSource, Schema, ScriptExecutor};
pub use ddl::render_schema;
pub use error::{MetaError, Result};
pub use orchestrator::{export_scripts, render_snapshot, update_database, ExportResult, UpdateResult};
pub use script::{split_script, Statement};
