/// Longest excerpt of a statement quoted in an error message.
pub const EXCERPT_MAX_CHARS: usize = 100;

/// Trimmed, single-line rendering of `sql` holding at most `max_chars` characters.
///
/// A truncated excerpt ends with `…`, which counts towards the limit.
pub fn excerpt(sql: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }

    let trimmed = sql.trim();
    let truncated = trimmed.chars().count() > max_chars;
    let keep = if truncated { max_chars - 1 } else { max_chars };

    let mut out = String::with_capacity(trimmed.len().min(max_chars * 4));
    for ch in trimmed.chars().take(keep) {
        match ch {
            '\n' | '\r' | '\t' => out.push(' '),
            _ => out.push(ch),
        }
    }

    if truncated {
        out.push('…');
    }

    out
}
