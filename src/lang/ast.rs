use super::Column;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Var(Column, Rc<str>, u8),
    AddAssign(Column, Operand, u8),
    Assign(Column, Operand, u8),
    DrawChar(Column, Operand, Operand, Operand),
    Label(Column, Rc<str>),
    Jump(Column, Rc<str>),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Operand {
    Literal(Column, u8),
    Register(Column, u8),
    Var(Column, Rc<str>),
}

impl Operand {
    pub fn column(&self) -> Column {
        match self {
            Operand::Literal(col, _) | Operand::Register(col, _) | Operand::Var(col, _) => {
                col.clone()
            }
        }
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operand::Literal(_, n) => write!(f, "{}", n),
            Operand::Register(_, r) => write!(f, "v[{}]", r),
            Operand::Var(_, name) => write!(f, "{}", name),
        }
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Statement::*;
        match self {
            Var(_, name, n) => write!(f, "var {} = {};", name, n),
            AddAssign(_, lhs, n) => write!(f, "{} += {};", lhs, n),
            Assign(_, lhs, n) => write!(f, "{} = {};", lhs, n),
            DrawChar(_, x, y, n) => write!(f, "draw_char({}, {}, {});", x, y, n),
            Label(_, name) => write!(f, "label({});", name),
            Jump(_, name) => write!(f, "jump({});", name),
        }
    }
}
