//! Configuration validation.

use super::{Config, ExportConfig};
use crate::error::{MetaError, Result};

/// Page sizes accepted by Firebird 5.
const PAGE_SIZES: [u32; 4] = [4096, 8192, 16384, 32768];

/// Validate the configuration.
pub fn validate(config: &Config) -> Result<()> {
    let conn = &config.connection;
    if conn.host.is_empty() {
        return Err(MetaError::Config("connection.host is required".into()));
    }
    if conn.port == 0 {
        return Err(MetaError::Config("connection.port must not be 0".into()));
    }
    if conn.database.is_empty() {
        return Err(MetaError::Config("connection.database is required".into()));
    }
    if conn.user.is_empty() {
        return Err(MetaError::Config("connection.user is required".into()));
    }
    if conn.charset.is_empty() {
        return Err(MetaError::Config("connection.charset is required".into()));
    }

    validate_export(&config.export)?;
    validate_file_name("build.database_file", &config.build.database_file)?;

    if !PAGE_SIZES.contains(&config.build.page_size) {
        return Err(MetaError::Config(format!(
            "build.page_size must be one of {:?}, got {}",
            PAGE_SIZES, config.build.page_size
        )));
    }

    Ok(())
}

/// Validate the export section on its own.
pub fn validate_export(export: &ExportConfig) -> Result<()> {
    validate_file_name("export.file_name", &export.file_name)
}

/// File names are joined onto a directory, so they must not contain paths.
fn validate_file_name(field: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(MetaError::Config(format!("{} is required", field)));
    }
    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(MetaError::Config(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }
    Ok(())
}
