//! Typed catalog rows and their assembly into schema metadata.
//!
//! Drivers map raw query rows into these records; everything after that
//! (trimming of CHAR-padded names, NULL flag interpretation, domain
//! references, parameter direction) happens here.

use tracing::debug;

use crate::core::schema::{non_empty, Column, Domain, Parameter, Procedure};
use crate::typemap::{decode_type, CatalogType};

/// Prefix of system-generated field sources; anything else names a domain.
const SYSTEM_FIELD_PREFIX: &str = "RDB$";

/// Low-level type descriptor from `RDB$FIELDS`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldType {
    pub field_type: i16,
    pub length: i16,
    pub scale: i16,
    pub sub_type: Option<i16>,
}

impl FieldType {
    pub fn new(field_type: i16, length: i16, scale: i16, sub_type: Option<i16>) -> Self {
        Self {
            field_type,
            length,
            scale,
            sub_type,
        }
    }

    /// SQL type syntax; a NULL sub type counts as 0.
    pub fn decode(&self) -> String {
        if CatalogType::from_code(self.field_type).is_none() {
            debug!("Unmapped catalog type code {}, using fallback", self.field_type);
        }
        decode_type(
            self.field_type,
            self.length,
            self.scale,
            self.sub_type.unwrap_or(0),
        )
    }
}

/// Row of the domains query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRow {
    pub name: String,
    pub field: FieldType,
    pub null_flag: Option<i16>,
    pub default_source: Option<String>,
    pub validation_source: Option<String>,
}

impl DomainRow {
    pub fn into_domain(self) -> Domain {
        Domain {
            name: self.name.trim().to_string(),
            type_definition: self.field.decode(),
            is_not_null: self.null_flag == Some(1),
            default_expression: trimmed(self.default_source),
            check_constraint: trimmed(self.validation_source),
        }
    }
}

/// Row of the table columns query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRow {
    pub name: String,
    /// `RDB$FIELD_SOURCE`: a domain name or a system `RDB$nnn` field.
    pub field_source: String,
    pub field: FieldType,
    pub null_flag: Option<i16>,
    pub default_source: Option<String>,
}

impl ColumnRow {
    pub fn into_column(self) -> Column {
        Column {
            name: self.name.trim().to_string(),
            type_definition: type_definition(&self.field_source, &self.field),
            is_nullable: matches!(self.null_flag, None | Some(0)),
            default_expression: trimmed(self.default_source),
        }
    }
}

/// Parameter direction (`RDB$PARAMETER_TYPE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl Direction {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Direction::Input),
            1 => Some(Direction::Output),
            _ => None,
        }
    }
}

/// Row of the procedure parameters query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRow {
    pub name: String,
    pub parameter_type: i16,
    pub field_source: String,
    pub field: FieldType,
}

impl ParameterRow {
    /// `None` for parameter types other than input or output.
    pub fn into_parameter(self) -> Option<(Direction, Parameter)> {
        let direction = Direction::from_code(self.parameter_type)?;
        let parameter = Parameter {
            name: self.name.trim().to_string(),
            type_definition: type_definition(&self.field_source, &self.field),
        };
        Some((direction, parameter))
    }
}

/// Row of the procedures query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcedureRow {
    pub name: String,
    pub source: String,
}

impl ProcedureRow {
    /// Procedure name with CHAR padding removed.
    pub fn trimmed_name(&self) -> String {
        self.name.trim().to_string()
    }

    /// Build the procedure, splitting parameters by direction.
    ///
    /// Parameter rows are expected in declaration order; the body is kept
    /// verbatim.
    pub fn into_procedure(self, parameters: Vec<ParameterRow>) -> Procedure {
        let mut procedure = Procedure::new(self.trimmed_name(), self.source);
        for (direction, parameter) in parameters.into_iter().filter_map(ParameterRow::into_parameter)
        {
            match direction {
                Direction::Input => procedure.input_parameters.push(parameter),
                Direction::Output => procedure.output_parameters.push(parameter),
            }
        }
        procedure
    }
}

/// Domain name for domain-based fields, decoded primitive type otherwise.
fn type_definition(field_source: &str, field: &FieldType) -> String {
    let source = field_source.trim();
    if source.starts_with(SYSTEM_FIELD_PREFIX) {
        field.decode()
    } else {
        source.to_string()
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|v| non_empty(v.trim().to_string()))
}
