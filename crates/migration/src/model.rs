use core::time::Duration;
use serde::{Deserialize, Serialize};

/// What happened when one statement was sent to the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementOutcome {
    pub ordinal: usize,
    pub success: bool,
    /// Only meaningful for row-mutating statements.
    pub rows_affected: u64,
    pub execution_time_ms: u64,
    pub error_message: Option<String>,
}

impl StatementOutcome {
    pub fn succeeded(ordinal: usize, rows_affected: u64, execution_time_ms: u64) -> Self {
        Self {
            ordinal,
            success: true,
            rows_affected,
            execution_time_ms,
            error_message: None,
        }
    }
}

/// Outcome of applying one script.
///
/// When `success` is false nothing was committed. `tables_created` and
/// `rows_inserted` then only describe statements that ran before the failing
/// one and are diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationResult {
    pub success: bool,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub tables_created: Vec<String>,
    #[serde(default)]
    pub rows_inserted: u64,
    #[serde(with = "duration_ms")]
    pub execution_time: Duration,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub statements_run: usize,
    pub script_checksum: String,
}

impl MigrationResult {
    /// A result for a script that never reached the database.
    pub fn rejected(script_checksum: String, error: impl Into<String>, elapsed: Duration) -> Self {
        Self {
            success: false,
            dry_run: false,
            tables_created: Vec::new(),
            rows_inserted: 0,
            execution_time: elapsed,
            error: Some(error.into()),
            statements_run: 0,
            script_checksum,
        }
    }
}

mod duration_ms {
    use core::time::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(value.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MigrationResult {
        MigrationResult {
            success: true,
            dry_run: false,
            tables_created: vec!["users".to_string()],
            rows_inserted: 2,
            execution_time: Duration::from_millis(1534),
            error: None,
            statements_run: 3,
            script_checksum: "abc".to_string(),
        }
    }

    #[test]
    fn serializes_execution_time_as_milliseconds() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["execution_time"], 1534);
        assert_eq!(json["tables_created"][0], "users");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn deserializes_what_it_serializes() {
        let text = serde_json::to_string(&sample()).unwrap();
        let back: MigrationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn rejected_result_ran_nothing() {
        let r = MigrationResult::rejected("c".into(), "SQL cannot be empty", Duration::ZERO);
        assert!(!r.success);
        assert_eq!(r.statements_run, 0);
        assert_eq!(r.error.as_deref(), Some("SQL cannot be empty"));
    }
}
