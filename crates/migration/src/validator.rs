//! Coarse textual guard against whole-database destructive operations.
//!
//! This is substring matching over the upper-cased script, not parsing: a
//! denylisted phrase inside a string literal or comment is rejected too.

use crate::error::ValidationError;

/// Phrases that reject a script outright, matched after whitespace is collapsed.
pub const DENYLIST: [&str; 3] = ["DROP DATABASE", "DROP SCHEMA", "TRUNCATE DATABASE"];

pub fn validate_script(sql: &str) -> Result<(), ValidationError> {
    if sql.trim().is_empty() {
        return Err(ValidationError::EmptyScript);
    }

    let normalized = sql
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();

    match DENYLIST.iter().find(|pattern| normalized.contains(**pattern)) {
        Some(pattern) => Err(ValidationError::DangerousOperation { pattern: *pattern }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_script;
    use crate::error::ValidationError;

    #[test]
    fn rejects_drop_database_in_any_case() {
        for sql in ["DROP DATABASE foo;", "drop database foo;", "Drop Database foo"] {
            assert_eq!(
                validate_script(sql),
                Err(ValidationError::DangerousOperation {
                    pattern: "DROP DATABASE"
                })
            );
        }
    }

    #[test]
    fn empty_script_has_its_own_reason() {
        assert_eq!(validate_script(""), Err(ValidationError::EmptyScript));
        assert_eq!(validate_script(" \n\t"), Err(ValidationError::EmptyScript));
    }

    #[test]
    fn whitespace_between_keywords_does_not_bypass() {
        let err = validate_script("CREATE TABLE t (id int);\ndrop\n   schema public cascade;")
            .unwrap_err();
        assert!(matches!(err, ValidationError::DangerousOperation { pattern: "DROP SCHEMA" }));
    }

    #[test]
    fn truncate_database_is_rejected() {
        assert!(validate_script("truncate database x").is_err());
    }

    #[test]
    fn mentions_inside_literals_are_over_rejected() {
        assert!(validate_script("INSERT INTO notes VALUES ('never drop database prod')").is_err());
    }

    #[test]
    fn ordinary_ddl_passes() {
        assert_eq!(
            validate_script("CREATE TABLE t (id int); DROP TABLE old_t; TRUNCATE t;"),
            Ok(())
        );
    }
}
