use crate::model::SqlStatement;

pub trait StatementParser {
    fn parse_statements(&self, sql: &str) -> Vec<SqlStatement>;
}
