//! Decoding of Firebird catalog type descriptors into SQL type syntax.
//!
//! `RDB$FIELDS` stores a numeric type code plus length, scale and sub type.
//! Character lengths are stored in bytes; the database is assumed to use
//! UTF-8, so byte lengths are divided by 4 to recover the declared size.

/// Type used when the catalog reports a code that is not modeled.
pub const FALLBACK_TYPE: &str = "VARCHAR(100)";

/// Bytes per character under the UTF-8 charset assumption.
const BYTES_PER_CHAR: i16 = 4;

/// Catalog type codes (`RDB$FIELD_TYPE`) understood by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogType {
    SmallInt,
    Integer,
    Float,
    Date,
    Time,
    Char,
    Int64,
    Double,
    Timestamp,
    Varchar,
    Blob,
}

impl CatalogType {
    /// Resolve a raw catalog type code, `None` for unmodeled codes.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            7 => Some(CatalogType::SmallInt),
            8 => Some(CatalogType::Integer),
            10 => Some(CatalogType::Float),
            12 => Some(CatalogType::Date),
            13 => Some(CatalogType::Time),
            14 => Some(CatalogType::Char),
            16 => Some(CatalogType::Int64),
            27 => Some(CatalogType::Double),
            35 => Some(CatalogType::Timestamp),
            37 => Some(CatalogType::Varchar),
            261 => Some(CatalogType::Blob),
            _ => None,
        }
    }
}

/// Decode a catalog type descriptor into a SQL type string.
///
/// Never fails: unknown codes degrade to [`FALLBACK_TYPE`].
pub fn decode_type(type_code: i16, length: i16, scale: i16, sub_type: i16) -> String {
    let Some(kind) = CatalogType::from_code(type_code) else {
        return FALLBACK_TYPE.to_string();
    };

    match kind {
        CatalogType::SmallInt => "SMALLINT".to_string(),
        CatalogType::Integer => "INTEGER".to_string(),
        CatalogType::Float => "FLOAT".to_string(),
        CatalogType::Date => "DATE".to_string(),
        CatalogType::Time => "TIME".to_string(),
        CatalogType::Char => format!("CHAR({})", length / BYTES_PER_CHAR),
        // Scale is stored negated for exact numerics.
        CatalogType::Int64 => match sub_type {
            1 => format!("NUMERIC(18, {})", -i32::from(scale)),
            2 => format!("DECIMAL(18, {})", -i32::from(scale)),
            _ => "BIGINT".to_string(),
        },
        CatalogType::Double => "DOUBLE PRECISION".to_string(),
        CatalogType::Timestamp => "TIMESTAMP".to_string(),
        CatalogType::Varchar => format!("VARCHAR({})", length / BYTES_PER_CHAR),
        CatalogType::Blob => "BLOB SUB_TYPE TEXT".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_types() {
        assert_eq!(decode_type(7, 2, 0, 0), "SMALLINT");
        assert_eq!(decode_type(8, 4, 0, 0), "INTEGER");
        assert_eq!(decode_type(16, 8, 0, 0), "BIGINT");
    }

    #[test]
    fn test_exact_numerics() {
        assert_eq!(decode_type(16, 8, -2, 1), "NUMERIC(18, 2)");
        assert_eq!(decode_type(16, 8, -4, 2), "DECIMAL(18, 4)");
        assert_eq!(decode_type(16, 8, 0, 1), "NUMERIC(18, 0)");
        assert_eq!(decode_type(16, 8, -2, 3), "BIGINT");
    }

    #[test]
    fn test_string_types() {
        assert_eq!(decode_type(14, 40, 0, 0), "CHAR(10)");
        assert_eq!(decode_type(37, 400, 0, 0), "VARCHAR(100)");
        assert_eq!(decode_type(37, 1022, 0, 0), "VARCHAR(255)");
        assert_eq!(decode_type(261, 8, 0, 1), "BLOB SUB_TYPE TEXT");
    }

    #[test]
    fn test_float_and_datetime_types() {
        assert_eq!(decode_type(10, 4, 0, 0), "FLOAT");
        assert_eq!(decode_type(27, 8, 0, 0), "DOUBLE PRECISION");
        assert_eq!(decode_type(12, 4, 0, 0), "DATE");
        assert_eq!(decode_type(13, 4, 0, 0), "TIME");
        assert_eq!(decode_type(35, 8, 0, 0), "TIMESTAMP");
    }

    #[test]
    fn test_unknown_code_falls_back() {
        assert_eq!(decode_type(23, 1, 0, 0), FALLBACK_TYPE);
        assert_eq!(decode_type(0, 0, 0, 0), FALLBACK_TYPE);
        assert_eq!(decode_type(-1, 10, 0, 0), FALLBACK_TYPE);
        assert!(CatalogType::from_code(23).is_none());
    }
}
