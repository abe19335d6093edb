//! Splits a multi-statement script on top-level semicolons.
//!
//! A single left-to-right scan tracks which lexical region the cursor is in.
//! Semicolons only terminate a statement in [`TokenizerState::Normal`]; inside
//! string literals, quoted identifiers, comments and dollar-quoted bodies they
//! are ordinary text.
//!
//! Comments are not executable content. Line-comment text is dropped (its
//! newline is kept) and a block comment collapses to one space, so a script
//! made only of comments, whitespace and semicolons yields no statements.

use crate::model::SqlStatement;
use crate::parser::StatementParser;

/// Lexical region the scanner is currently in. Exactly one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerState {
    Normal,
    /// `--` up to and including the next newline.
    InLineComment,
    /// `/* ... */`, nesting like PostgreSQL.
    InBlockComment { depth: usize },
    /// `'...'` with `''` as an escaped quote.
    InStringLiteral,
    /// `E'...'`: backslash escapes the next character, `''` still works.
    InEscapeString,
    /// `"..."` with `""` as an escaped quote.
    InQuotedIdentifier,
    /// `$tag$ ... $tag$`; only the exact opening tag closes it.
    InDollarQuote { tag: String },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StatementSplitter;

impl StatementSplitter {
    pub fn new() -> Self {
        Self
    }
}

impl StatementParser for StatementSplitter {
    fn parse_statements(&self, sql: &str) -> Vec<SqlStatement> {
        split_statements(sql)
    }
}

pub fn split_statements(sql: &str) -> Vec<SqlStatement> {
    let chars: Vec<char> = sql.chars().collect();
    let mut scanner = Scanner::new(sql.len());

    let mut i = 0usize;
    while i < chars.len() {
        i += scanner.step(&chars, i);
    }

    scanner.finish()
}

struct Scanner {
    state: TokenizerState,
    buf: String,
    has_content: bool,
    out: Vec<SqlStatement>,
}

impl Scanner {
    fn new(capacity: usize) -> Self {
        Self {
            state: TokenizerState::Normal,
            buf: String::with_capacity(capacity.min(4096)),
            has_content: false,
            out: Vec::new(),
        }
    }

    /// Consumes the token starting at `chars[i]` and returns how many chars it spanned.
    fn step(&mut self, chars: &[char], i: usize) -> usize {
        let ch = chars[i];
        let next = chars.get(i + 1).copied();

        match self.state {
            TokenizerState::Normal => self.step_normal(chars, i, ch, next),
            TokenizerState::InLineComment => {
                if ch == '\n' {
                    self.buf.push('\n');
                    self.state = TokenizerState::Normal;
                }
                1
            }
            TokenizerState::InBlockComment { .. } => self.step_block_comment(ch, next),
            TokenizerState::InStringLiteral => self.step_quoted(ch, next, '\''),
            TokenizerState::InEscapeString => self.step_escape_string(ch, next),
            TokenizerState::InQuotedIdentifier => self.step_quoted(ch, next, '"'),
            TokenizerState::InDollarQuote { .. } => self.step_dollar_body(chars, i, ch),
        }
    }

    fn step_normal(&mut self, chars: &[char], i: usize, ch: char, next: Option<char>) -> usize {
        match (ch, next) {
            ('$', _) => {
                if let Some(len) = dollar_tag_len(chars, i) {
                    let tag: String = chars[i..i + len].iter().collect();
                    self.buf.push_str(&tag);
                    self.has_content = true;
                    self.state = TokenizerState::InDollarQuote { tag };
                    return len;
                }
                self.push_content(ch);
                1
            }
            ('-', Some('-')) => {
                self.state = TokenizerState::InLineComment;
                2
            }
            ('/', Some('*')) => {
                self.buf.push(' ');
                self.state = TokenizerState::InBlockComment { depth: 1 };
                2
            }
            ('\'', _) => {
                self.push_content(ch);
                self.state = if starts_escape_string(chars, i) {
                    TokenizerState::InEscapeString
                } else {
                    TokenizerState::InStringLiteral
                };
                1
            }
            ('"', _) => {
                self.push_content(ch);
                self.state = TokenizerState::InQuotedIdentifier;
                1
            }
            (';', _) => {
                self.flush();
                1
            }
            _ => {
                self.push_content(ch);
                1
            }
        }
    }

    fn step_block_comment(&mut self, ch: char, next: Option<char>) -> usize {
        let TokenizerState::InBlockComment { depth } = &mut self.state else {
            return 1;
        };

        match (ch, next) {
            ('/', Some('*')) => {
                *depth += 1;
                2
            }
            ('*', Some('/')) => {
                *depth -= 1;
                if *depth == 0 {
                    self.state = TokenizerState::Normal;
                }
                2
            }
            _ => 1,
        }
    }

    fn step_dollar_body(&mut self, chars: &[char], i: usize, ch: char) -> usize {
        if ch == '$' {
            if let (Some(len), TokenizerState::InDollarQuote { tag }) =
                (dollar_tag_len(chars, i), &self.state)
            {
                let candidate = &chars[i..i + len];
                if tag.chars().eq(candidate.iter().copied()) {
                    self.buf.extend(candidate);
                    self.state = TokenizerState::Normal;
                    return len;
                }
            }
        }

        self.buf.push(ch);
        1
    }

    fn step_quoted(&mut self, ch: char, next: Option<char>, quote: char) -> usize {
        self.buf.push(ch);
        if ch != quote {
            return 1;
        }

        if next == Some(quote) {
            self.buf.push(quote);
            return 2;
        }

        self.state = TokenizerState::Normal;
        1
    }

    fn step_escape_string(&mut self, ch: char, next: Option<char>) -> usize {
        self.buf.push(ch);
        match (ch, next) {
            ('\\', Some(escaped)) | ('\'', Some(escaped @ '\'')) => {
                self.buf.push(escaped);
                2
            }
            ('\'', _) => {
                self.state = TokenizerState::Normal;
                1
            }
            _ => 1,
        }
    }

    fn push_content(&mut self, ch: char) {
        if !ch.is_whitespace() {
            self.has_content = true;
        }
        self.buf.push(ch);
    }

    fn flush(&mut self) {
        if self.has_content {
            let sql = self.buf.trim();
            if !sql.is_empty() {
                let ordinal = self.out.len() + 1;
                self.out.push(SqlStatement::new(ordinal, sql));
            }
        }

        self.buf.clear();
        self.has_content = false;
    }

    fn finish(mut self) -> Vec<SqlStatement> {
        self.flush();
        self.out
    }
}

/// True when the quote at `chars[i]` opens an `E'...'` string: it follows a
/// lone `E`/`e` that is not the tail of a longer identifier.
fn starts_escape_string(chars: &[char], i: usize) -> bool {
    let Some(prefix_at) = i.checked_sub(1) else {
        return false;
    };
    if !matches!(chars[prefix_at], 'E' | 'e') {
        return false;
    }
    match prefix_at.checked_sub(1).map(|j| chars[j]) {
        Some(c) => !(c.is_alphanumeric() || c == '_' || c == '$'),
        None => true,
    }
}

/// Length of a `$tag$` delimiter starting at `chars[i]`, if one starts there.
fn dollar_tag_len(chars: &[char], i: usize) -> Option<usize> {
    if chars.get(i) != Some(&'$') {
        return None;
    }

    let mut end = i + 1;
    while let Some(&c) = chars.get(end) {
        if c.is_ascii_alphanumeric() || c == '_' {
            end += 1;
        } else {
            break;
        }
    }

    match chars.get(end) {
        Some('$') => Some(end - i + 1),
        _ => None,
    }
}
