use super::Column;

/// The statement terminator.
pub const TERMINATOR: char = ';';

/// Split program text into trimmed statements, each paired with the
/// column range it occupies in `s`. Text after the last terminator is
/// not a statement and empty statements are dropped.
pub fn lex(s: &str) -> Vec<(Column, &str)> {
    StatementLexer { s, pos: 0 }.collect()
}

fn is_statement_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

struct StatementLexer<'a> {
    s: &'a str,
    pos: usize,
}

impl<'a> Iterator for StatementLexer<'a> {
    type Item = (Column, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let rest = self.s.get(self.pos..)?;
            let len = rest.find(TERMINATOR)?;
            let start = self.pos;
            self.pos += len + TERMINATOR.len_utf8();
            let raw = &rest[..len];
            let lead = raw.len() - raw.trim_start_matches(is_statement_whitespace).len();
            let text = raw.trim_matches(is_statement_whitespace);
            if text.is_empty() {
                continue;
            }
            let col = (start + lead)..(start + lead + text.len());
            return Some((col, text));
        }
    }
}
