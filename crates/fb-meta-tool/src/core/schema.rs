//! Schema metadata types for domains, tables and stored procedures.
//!
//! These are plain value records built by a metadata source and read by
//! the DDL renderer. Optional text fields are `None` rather than empty.

use serde::{Deserialize, Serialize};

use crate::error::MetaError;

/// A named, reusable column type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    /// Domain name.
    pub name: String,

    /// SQL type expression (e.g., "INTEGER", "VARCHAR(50)").
    pub type_definition: String,

    /// Whether the domain carries a NOT NULL constraint.
    #[serde(default)]
    pub is_not_null: bool,

    /// Default value as stored in the catalog, possibly prefixed with `DEFAULT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expression: Option<String>,

    /// Validation source, usually `CHECK (VALUE ...)` or only the condition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_constraint: Option<String>,
}

impl Domain {
    /// Create a nullable domain without default or check.
    pub fn new(name: impl Into<String>, type_definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_definition: type_definition.into(),
            is_not_null: false,
            default_expression: None,
            check_constraint: None,
        }
    }

    /// Mark the domain NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.is_not_null = true;
        self
    }

    /// Set the default expression; empty strings are treated as absent.
    pub fn with_default(mut self, expr: impl Into<String>) -> Self {
        self.default_expression = non_empty(expr.into());
        self
    }

    /// Set the check constraint; empty strings are treated as absent.
    pub fn with_check(mut self, check: impl Into<String>) -> Self {
        self.check_constraint = non_empty(check.into());
        self
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,

    /// Decoded primitive type, or the name of the domain the column uses.
    pub type_definition: String,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Default value as stored in the catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_expression: Option<String>,
}

impl Column {
    /// Create a nullable column without a default.
    pub fn new(name: impl Into<String>, type_definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_definition: type_definition.into(),
            is_nullable: true,
            default_expression: None,
        }
    }

    /// Mark the column NOT NULL.
    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    /// Set the default expression; empty strings are treated as absent.
    pub fn with_default(mut self, expr: impl Into<String>) -> Self {
        self.default_expression = non_empty(expr.into());
        self
    }
}

/// Table metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Table name.
    pub name: String,

    /// Columns in catalog ordinal order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from its ordered columns.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }
}

/// Procedure parameter. Direction is given by the list it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,

    /// Decoded type or domain name.
    pub type_definition: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, type_definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_definition: type_definition.into(),
        }
    }
}

/// Stored procedure metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    /// Procedure name.
    pub name: String,

    /// Procedure body as stored in `RDB$PROCEDURE_SOURCE` (opaque).
    pub source: String,

    /// Input parameters in declaration order.
    #[serde(default)]
    pub input_parameters: Vec<Parameter>,

    /// Output parameters in declaration order.
    #[serde(default)]
    pub output_parameters: Vec<Parameter>,
}

impl Procedure {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            input_parameters: Vec::new(),
            output_parameters: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, params: Vec<Parameter>) -> Self {
        self.input_parameters = params;
        self
    }

    pub fn with_outputs(mut self, params: Vec<Parameter>) -> Self {
        self.output_parameters = params;
        self
    }
}

/// Complete schema model handed from a metadata source to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub tables: Vec<Table>,
    #[serde(default)]
    pub procedures: Vec<Procedure>,
}

impl Schema {
    /// Total number of objects in the schema.
    pub fn object_count(&self) -> usize {
        self.domains.len() + self.tables.len() + self.procedures.len()
    }

    /// Load a schema snapshot from JSON and validate it.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let schema: Schema = serde_json::from_str(json)?;
        schema.validate()?;
        Ok(schema)
    }

    /// Check that every object can be rendered: names and type definitions
    /// are non-empty and every table has at least one column.
    pub fn validate(&self) -> crate::error::Result<()> {
        for domain in &self.domains {
            require("domain name", &domain.name, "")?;
            require("domain type", &domain.type_definition, &domain.name)?;
        }

        for table in &self.tables {
            require("table name", &table.name, "")?;
            if table.columns.is_empty() {
                return Err(MetaError::Config(format!(
                    "snapshot table '{}' has no columns",
                    table.name
                )));
            }
            for column in &table.columns {
                require("column name", &column.name, &table.name)?;
                require("column type", &column.type_definition, &table.name)?;
            }
        }

        for procedure in &self.procedures {
            require("procedure name", &procedure.name, "")?;
            for param in procedure
                .input_parameters
                .iter()
                .chain(&procedure.output_parameters)
            {
                require("parameter name", &param.name, &procedure.name)?;
                require("parameter type", &param.type_definition, &procedure.name)?;
            }
        }

        Ok(())
    }

    /// Serialize the schema as pretty-printed JSON.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn require(what: &str, value: &str, owner: &str) -> crate::error::Result<()> {
    if !value.trim().is_empty() {
        return Ok(());
    }
    if owner.is_empty() {
        Err(MetaError::Config(format!("snapshot {} is empty", what)))
    } else {
        Err(MetaError::Config(format!("snapshot {} is empty in '{}'", what, owner)))
    }
}

/// Map empty strings to `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
