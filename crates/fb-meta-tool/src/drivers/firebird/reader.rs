//! Firebird metadata reader.
//!
//! Runs the catalog queries and hands the rows to [`crate::catalog::rows`]
//! for assembly.

use async_trait::async_trait;
use rsfbclient::{Queryable, SimpleConnection};
use tracing::{debug, info};

use super::SharedConnection;
use crate::catalog::{queries, ColumnRow, DomainRow, FieldType, ParameterRow, ProcedureRow};
use crate::config::ConnectionConfig;
use crate::core::schema::{Column, Domain, Procedure, Table};
use crate::core::traits::MetadataSource;
use crate::error::{MetaError, Result};

type DomainTuple = (
    String,
    i16,
    i16,
    Option<i16>,
    Option<i16>,
    Option<i16>,
    Option<String>,
    Option<String>,
);

type ColumnTuple = (
    String,
    String,
    i16,
    i16,
    Option<i16>,
    Option<i16>,
    Option<i16>,
    Option<String>,
);

type ParameterTuple = (
    String,
    i16,
    String,
    Option<i16>,
    Option<i16>,
    Option<i16>,
    Option<i16>,
);

/// Firebird metadata source.
pub struct FirebirdReader {
    conn: SharedConnection,
}

impl FirebirdReader {
    /// Connect to the database to export.
    pub async fn new(config: &ConnectionConfig) -> Result<Self> {
        let conn = SharedConnection::open(config).await?;
        info!("Connected to Firebird source: {}", config.display_target());
        Ok(Self { conn })
    }
}

#[async_trait]
impl MetadataSource for FirebirdReader {
    async fn domains(&self) -> Result<Vec<Domain>> {
        let rows: Vec<DomainTuple> = self
            .conn
            .run(|conn| conn.query(queries::DOMAINS, ()).map_err(catalog_error))
            .await?;

        debug!("Loaded {} domains", rows.len());
        Ok(rows
            .into_iter()
            .map(|(name, ty, length, scale, sub_type, null_flag, default, check)| {
                DomainRow {
                    name,
                    field: FieldType::new(ty, length, scale.unwrap_or(0), sub_type),
                    null_flag,
                    default_source: default,
                    validation_source: check,
                }
                .into_domain()
            })
            .collect())
    }

    async fn tables(&self) -> Result<Vec<Table>> {
        self.conn
            .run(|conn| {
                let names: Vec<(String,)> =
                    conn.query(queries::TABLES, ()).map_err(catalog_error)?;

                names
                    .into_iter()
                    .map(|(name,)| -> Result<Table> {
                        let name = name.trim().to_string();
                        let columns = load_columns(conn, &name)?;
                        Ok(Table::new(name, columns))
                    })
                    .collect()
            })
            .await
    }

    async fn procedures(&self) -> Result<Vec<Procedure>> {
        self.conn
            .run(|conn| {
                let rows: Vec<(String, String)> =
                    conn.query(queries::PROCEDURES, ()).map_err(catalog_error)?;

                rows.into_iter()
                    .map(|(name, source)| -> Result<Procedure> {
                        let row = ProcedureRow { name, source };
                        let parameters = load_parameters(conn, &row.trimmed_name())?;
                        Ok(row.into_procedure(parameters))
                    })
                    .collect()
            })
            .await
    }
}

fn load_columns(conn: &mut SimpleConnection, table: &str) -> Result<Vec<Column>> {
    let rows: Vec<ColumnTuple> = conn
        .query(queries::TABLE_COLUMNS, (table.to_string(),))
        .map_err(catalog_error)?;

    debug!("Table {}: {} columns", table, rows.len());
    Ok(rows
        .into_iter()
        .map(|(name, source, ty, length, scale, sub_type, null_flag, default)| {
            ColumnRow {
                name,
                field_source: source,
                field: FieldType::new(ty, length, scale.unwrap_or(0), sub_type),
                null_flag,
                default_source: default,
            }
            .into_column()
        })
        .collect())
}

fn load_parameters(conn: &mut SimpleConnection, procedure: &str) -> Result<Vec<ParameterRow>> {
    let rows: Vec<ParameterTuple> = conn
        .query(queries::PROCEDURE_PARAMETERS, (procedure.to_string(),))
        .map_err(catalog_error)?;

    // LEFT JOIN: a missing field row decodes to the fallback type.
    Ok(rows
        .into_iter()
        .map(|(name, parameter_type, source, ty, length, scale, sub_type)| ParameterRow {
            name,
            parameter_type,
            field_source: source,
            field: FieldType::new(
                ty.unwrap_or(0),
                length.unwrap_or(0),
                scale.unwrap_or(0),
                sub_type,
            ),
        })
        .collect())
}

fn catalog_error(e: rsfbclient::FbError) -> MetaError {
    MetaError::source_failure(format!("catalog query failed: {}", e))
}
