//! Catalog queries against the Firebird system tables.
//!
//! Column order in each query matches the field order of the row record it
//! is mapped into (see [`super::rows`]). Parameters use `?` placeholders.

/// User-defined domains (`RDB$FIELDS` entries not generated by the engine).
pub const DOMAINS: &str = "
SELECT
    F.RDB$FIELD_NAME,
    F.RDB$FIELD_TYPE,
    F.RDB$FIELD_LENGTH,
    F.RDB$FIELD_SCALE,
    F.RDB$FIELD_SUB_TYPE,
    F.RDB$NULL_FLAG,
    F.RDB$DEFAULT_SOURCE,
    F.RDB$VALIDATION_SOURCE
FROM RDB$FIELDS F
WHERE F.RDB$SYSTEM_FLAG = 0 AND F.RDB$FIELD_NAME NOT LIKE 'RDB$%'
ORDER BY F.RDB$FIELD_NAME";

/// User tables (views excluded).
pub const TABLES: &str = "
SELECT RDB$RELATION_NAME
FROM RDB$RELATIONS
WHERE RDB$VIEW_BLR IS NULL AND RDB$SYSTEM_FLAG = 0
ORDER BY RDB$RELATION_NAME";

/// Columns of one table in ordinal order. Parameter: table name.
pub const TABLE_COLUMNS: &str = "
SELECT
    RF.RDB$FIELD_NAME,
    RF.RDB$FIELD_SOURCE,
    F.RDB$FIELD_TYPE,
    F.RDB$FIELD_LENGTH,
    F.RDB$FIELD_SCALE,
    F.RDB$FIELD_SUB_TYPE,
    RF.RDB$NULL_FLAG,
    RF.RDB$DEFAULT_SOURCE
FROM RDB$RELATION_FIELDS RF
JOIN RDB$FIELDS F ON RF.RDB$FIELD_SOURCE = F.RDB$FIELD_NAME
WHERE RF.RDB$RELATION_NAME = ?
ORDER BY RF.RDB$FIELD_POSITION";

/// User procedures that carry source text.
pub const PROCEDURES: &str = "
SELECT RDB$PROCEDURE_NAME, RDB$PROCEDURE_SOURCE
FROM RDB$PROCEDURES
WHERE RDB$SYSTEM_FLAG = 0 AND RDB$PROCEDURE_SOURCE IS NOT NULL
ORDER BY RDB$PROCEDURE_NAME";

/// Parameters of one procedure, inputs first, in declaration order.
/// Parameter: procedure name.
pub const PROCEDURE_PARAMETERS: &str = "
SELECT
    P.RDB$PARAMETER_NAME,
    P.RDB$PARAMETER_TYPE,
    P.RDB$FIELD_SOURCE,
    F.RDB$FIELD_TYPE,
    F.RDB$FIELD_LENGTH,
    F.RDB$FIELD_SCALE,
    F.RDB$FIELD_SUB_TYPE
FROM RDB$PROCEDURE_PARAMETERS P
LEFT JOIN RDB$FIELDS F ON P.RDB$FIELD_SOURCE = F.RDB$FIELD_NAME
WHERE P.RDB$PROCEDURE_NAME = ?
ORDER BY P.RDB$PARAMETER_TYPE, P.RDB$PARAMETER_NUMBER";
