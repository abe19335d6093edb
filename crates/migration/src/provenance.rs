//! Best-effort audit trail derived from statement text.
//!
//! Only prefixes are inspected: `INSERT` statements contribute their affected
//! row counts and `CREATE TABLE` statements contribute a table name. Statements
//! that start with `WITH`, use unusual spacing, or touch several tables are not
//! attributed.

use crate::model::StatementOutcome;
use slipway_sql::SqlStatement;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    tables_created: Vec<String>,
    rows_inserted: u64,
}

impl Provenance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one executed statement into the running totals. Failed outcomes are ignored.
    pub fn record(&mut self, statement: &SqlStatement, outcome: &StatementOutcome) {
        if !outcome.success {
            return;
        }

        let sql = statement.sql.trim();

        if starts_with_keyword(sql, "INSERT") {
            self.rows_inserted = self.rows_inserted.saturating_add(outcome.rows_affected);
        }

        if starts_with_keyword(sql, "CREATE TABLE") {
            if let Some(name) = extract_table_name(sql) {
                self.tables_created.push(name);
            }
        }
    }

    /// Tables in creation order, repeats kept, and the inserted row total.
    pub fn into_parts(self) -> (Vec<String>, u64) {
        (self.tables_created, self.rows_inserted)
    }
}

fn starts_with_keyword(sql: &str, keyword: &str) -> bool {
    sql.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Table name of a `CREATE TABLE` statement, without schema or quotes.
pub fn extract_table_name(sql: &str) -> Option<String> {
    let sql = sql.trim();
    if !starts_with_keyword(sql, "CREATE TABLE") {
        return None;
    }

    let tokens: Vec<&str> = sql.split_whitespace().collect();
    let mut candidate = *tokens.get(2)?;
    if candidate.eq_ignore_ascii_case("IF") {
        // IF NOT EXISTS
        candidate = *tokens.get(5)?;
    }

    let unparenthesized = match candidate.find('(') {
        Some(idx) => &candidate[..idx],
        None => candidate,
    };

    let unqualified = match unparenthesized.rfind('.') {
        Some(idx) => &unparenthesized[idx + 1..],
        None => unparenthesized,
    };

    let name = unqualified.trim_matches(|c| c == '"' || c == '`');
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
