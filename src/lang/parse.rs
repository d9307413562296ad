use super::{ast::*, Column, Error};
use crate::error;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Classify one statement. `col` is where `text` sits in the program.
///
/// Forms are tried in priority order: declaration, compound-add,
/// plain assignment, then call syntax. Text matching none of them,
/// or calling an unknown name, yields `Ok(None)`.
pub fn parse(col: &Column, text: &str) -> Result<Option<Statement>> {
    Parser {
        text,
        start: col.start,
    }
    .statement()
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Parser<'a> {
    text: &'a str,
    start: usize,
}

impl<'a> Parser<'a> {
    fn statement(&self) -> Result<Option<Statement>> {
        let col = self.column(0, self.text.len());
        let mut words = self.text.split_whitespace();
        if words.next() == Some("var") {
            return self.r#var(col).map(Some);
        }
        if let Some(idx) = self.text.find("+=") {
            let lhs = self.operand(0, idx)?;
            let value = self.integer(idx + 2, self.text.len())?;
            return Ok(Some(Statement::AddAssign(col, lhs, value)));
        }
        if let Some(idx) = self.text.find('=') {
            let lhs = self.operand(0, idx)?;
            let value = self.integer(idx + 1, self.text.len())?;
            return Ok(Some(Statement::Assign(col, lhs, value)));
        }
        if self.text.contains('(') {
            return self.call(col);
        }
        Ok(None)
    }

    fn r#var(&self, col: Column) -> Result<Statement> {
        let after_var = self.text.find("var").map(|i| i + 3).unwrap_or(0);
        let eq = match self.text.find('=') {
            Some(eq) => eq,
            None => return Err(error!(SyntaxError, ..&col; "EXPECTED =")),
        };
        let name = self.ident(after_var, eq)?;
        let value = self.integer(eq + 1, self.text.len())?;
        Ok(Statement::Var(col, name, value))
    }

    fn call(&self, col: Column) -> Result<Option<Statement>> {
        let open = self.text.find('(').unwrap_or(0);
        let close = match self.text.rfind(')') {
            Some(close) if close > open => close,
            _ => return Err(error!(SyntaxError, ..&col; "EXPECTED )")),
        };
        let name = self.text[..open].trim();
        let mut args: Vec<(usize, usize)> = vec![];
        let mut arg_start = open + 1;
        for (idx, ch) in self.text[open + 1..close].char_indices() {
            if ch == ',' {
                args.push((arg_start, open + 1 + idx));
                arg_start = open + 2 + idx;
            }
        }
        args.push((arg_start, close));
        let args_col = self.column(open + 1, close);
        match name {
            "draw_char" => {
                if args.len() != 3 {
                    return Err(error!(SyntaxError, ..&args_col; "WRONG NUMBER OF ARGUMENTS"));
                }
                let x = self.operand(args[0].0, args[0].1)?;
                let y = self.operand(args[1].0, args[1].1)?;
                let n = self.operand(args[2].0, args[2].1)?;
                Ok(Some(Statement::DrawChar(col, x, y, n)))
            }
            "label" | "jump" => {
                if args.len() != 1 {
                    return Err(error!(SyntaxError, ..&args_col; "WRONG NUMBER OF ARGUMENTS"));
                }
                let target = self.ident(args[0].0, args[0].1)?;
                if name == "label" {
                    Ok(Some(Statement::Label(col, target)))
                } else {
                    Ok(Some(Statement::Jump(col, target)))
                }
            }
            _ => {
                log::trace!("unknown call {:?}", name);
                Ok(None)
            }
        }
    }

    /// Column of the trimmed text between byte offsets `from` and `to`.
    fn column(&self, from: usize, to: usize) -> Column {
        let raw = &self.text[from..to];
        let lead = raw.len() - raw.trim_start().len();
        let len = raw.trim().len();
        (self.start + from + lead)..(self.start + from + lead + len)
    }

    fn operand(&self, from: usize, to: usize) -> Result<Operand> {
        let col = self.column(from, to);
        let s: String = self.text[from..to]
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if s.is_empty() {
            return Err(error!(SyntaxError, ..&col; "MISSING OPERAND"));
        }
        if let Some(index) = s
            .strip_prefix("v[")
            .or_else(|| s.strip_prefix("V["))
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return match index.parse::<u8>() {
                Ok(r) if r < 16 => Ok(Operand::Register(col, r)),
                _ => Err(error!(SyntaxError, ..&col; "INVALID REGISTER")),
            };
        }
        if s.chars().all(|c| c.is_ascii_digit()) {
            return match s.parse::<u8>() {
                Ok(n) => Ok(Operand::Literal(col, n)),
                Err(_) => Err(error!(Overflow, ..&col)),
            };
        }
        if s.starts_with(is_ident_start) && s.chars().all(is_ident_char) {
            return Ok(Operand::Var(col, s.into()));
        }
        Err(error!(SyntaxError, ..&col; "INVALID OPERAND"))
    }

    fn integer(&self, from: usize, to: usize) -> Result<u8> {
        match self.operand(from, to)? {
            Operand::Literal(_, n) => Ok(n),
            _ => Err(error!(SyntaxError, ..&self.column(from, to); "EXPECTED INTEGER")),
        }
    }

    fn ident(&self, from: usize, to: usize) -> Result<Rc<str>> {
        match self.operand(from, to)? {
            Operand::Var(_, name) => Ok(name),
            _ => Err(error!(SyntaxError, ..&self.column(from, to); "EXPECTED NAME")),
        }
    }
}
