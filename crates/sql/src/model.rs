/// One top-level statement of a script, without its terminating semicolon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlStatement {
    /// 1-based position in the script.
    pub ordinal: usize,
    pub sql: String,
}

impl SqlStatement {
    pub fn new(ordinal: usize, sql: impl Into<String>) -> Self {
        Self {
            ordinal,
            sql: sql.into(),
        }
    }
}
