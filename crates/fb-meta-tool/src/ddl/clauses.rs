//! Optional clause fragments shared by domain, column and procedure rendering.
//!
//! Each function maps an optional catalog value to an optional fragment,
//! including its leading space, so callers can append results in a fixed
//! order.

/// Keyword introducing a default value.
pub const DEFAULT_KEYWORD: &str = "DEFAULT";

/// Keyword introducing a domain validation.
pub const CHECK_KEYWORD: &str = "CHECK";

/// Alternate terminator used around procedure bodies.
pub const ALT_TERMINATOR: char = '^';

/// ASCII case-insensitive prefix test.
pub fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

/// Append `value` after `keyword`, unless the value already carries it.
fn keyword_clause(keyword: &str, value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    if starts_with_keyword(value, keyword) {
        Some(format!(" {}", value))
    } else {
        Some(format!(" {} {}", keyword, value))
    }
}

/// ` DEFAULT <expr>` fragment. The catalog usually stores the keyword already.
pub fn default_clause(expr: Option<&str>) -> Option<String> {
    keyword_clause(DEFAULT_KEYWORD, expr)
}

/// ` CHECK <expr>` fragment. The catalog often stores only the condition.
pub fn check_clause(check: Option<&str>) -> Option<String> {
    keyword_clause(CHECK_KEYWORD, check)
}

/// ` NOT NULL` fragment.
pub fn not_null_clause(not_null: bool) -> Option<String> {
    not_null.then(|| " NOT NULL".to_string())
}

/// Terminator line for a procedure body that does not end with one yet.
pub fn body_terminator(source: &str) -> Option<String> {
    if source.trim_end().ends_with(ALT_TERMINATOR) {
        None
    } else {
        Some(ALT_TERMINATOR.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clause_prefixes_keyword() {
        assert_eq!(default_clause(Some("0")).as_deref(), Some(" DEFAULT 0"));
        assert_eq!(default_clause(Some("'N'")).as_deref(), Some(" DEFAULT 'N'"));
    }

    #[test]
    fn test_default_clause_keeps_existing_keyword() {
        assert_eq!(default_clause(Some("DEFAULT 0")).as_deref(), Some(" DEFAULT 0"));
        assert_eq!(default_clause(Some("default 'x'")).as_deref(), Some(" default 'x'"));
    }

    #[test]
    fn test_empty_values_produce_no_clause() {
        assert!(default_clause(None).is_none());
        assert!(default_clause(Some("")).is_none());
        assert!(check_clause(Some("")).is_none());
        assert!(not_null_clause(false).is_none());
    }

    #[test]
    fn test_check_clause() {
        assert_eq!(
            check_clause(Some("(VALUE > 0)")).as_deref(),
            Some(" CHECK (VALUE > 0)")
        );
        assert_eq!(
            check_clause(Some("check (VALUE > 0)")).as_deref(),
            Some(" check (VALUE > 0)")
        );
    }

    #[test]
    fn test_starts_with_keyword_handles_short_and_multibyte_text() {
        assert!(!starts_with_keyword("DEF", DEFAULT_KEYWORD));
        assert!(!starts_with_keyword("ÄÖÜÄÖÜÄ", DEFAULT_KEYWORD));
        assert!(starts_with_keyword("Default CURRENT_DATE", DEFAULT_KEYWORD));
    }

    #[test]
    fn test_body_terminator() {
        assert_eq!(body_terminator("BEGIN END").as_deref(), Some("^"));
        assert!(body_terminator("BEGIN END^\n  ").is_none());
    }
}
