pub mod excerpt;
pub mod model;
pub mod parser;
pub mod splitter;

pub use excerpt::{excerpt, EXCERPT_MAX_CHARS};
pub use model::SqlStatement;
pub use parser::StatementParser;
pub use splitter::{split_statements, StatementSplitter, TokenizerState};
