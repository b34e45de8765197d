//! Catalog access shared by metadata sources.
//!
//! - [`queries`]: SQL text for the Firebird system tables
//! - [`rows`]: typed query rows and their assembly into schema metadata
//! - [`SnapshotSource`]: a metadata source backed by an in-memory [`Schema`]

pub mod queries;
pub mod rows;

pub use rows::{ColumnRow, Direction, DomainRow, FieldType, ParameterRow, ProcedureRow};

use std::path::Path;

use async_trait::async_trait;

use crate::core::schema::{Domain, Procedure, Schema, Table};
use crate::core::traits::MetadataSource;
use crate::error::Result;

/// Metadata source serving a schema loaded from a JSON snapshot or built in
/// memory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    schema: Schema,
}

impl SnapshotSource {
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    /// Load a snapshot file written by the export pipeline.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(Schema::from_json(&content)?))
    }
}

#[async_trait]
impl MetadataSource for SnapshotSource {
    async fn domains(&self) -> Result<Vec<Domain>> {
        Ok(self.schema.domains.clone())
    }

    async fn tables(&self) -> Result<Vec<Table>> {
        Ok(self.schema.tables.clone())
    }

    async fn procedures(&self) -> Result<Vec<Procedure>> {
        Ok(self.schema.procedures.clone())
    }
}
