use super::link::VarRef;
use super::{Opcode, Program};
use crate::error;
use crate::lang::ast::{Operand, Statement};
use crate::lang::{Column, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Translate one statement onto the end of `program`.
pub fn compile(program: &mut Program, statement: &Statement) -> Result<()> {
    let mut comp = Compiler::new();
    comp.statement(program, statement)?;
    program.append(comp.frag)
}

/// Per-statement scratch register counter.
#[derive(Debug, Default)]
struct Scratch {
    next: u8,
}

impl Scratch {
    fn alloc(&mut self, col: &Column) -> Result<u8> {
        if self.next > 0xF {
            return Err(error!(TooManyRegisters, ..col));
        }
        let reg = self.next;
        self.next += 1;
        Ok(reg)
    }
}

struct Compiler {
    scratch: Scratch,
    frag: Vec<(Opcode, Option<VarRef>)>,
}

impl Compiler {
    fn new() -> Compiler {
        Compiler {
            scratch: Scratch::default(),
            frag: vec![],
        }
    }

    fn statement(&mut self, prog: &mut Program, statement: &Statement) -> Result<()> {
        use Statement::*;
        match statement {
            Var(col, name, value) => self.r#var(prog, col, name, *value),
            AddAssign(_, lhs, value) => self.add_assign(prog, lhs, *value),
            Assign(_, lhs, value) => self.assign(lhs, *value),
            DrawChar(_, x, y, n) => self.draw_char(prog, x, y, n),
            Label(_, name) => {
                prog.define_label(name);
                Ok(())
            }
            Jump(col, name) => self.jump(prog, col, name),
        }
    }

    fn emit(&mut self, op: Opcode) {
        self.frag.push((op, None));
    }

    /// `LD I` aimed `back` bytes before variable `index`, patched at link.
    fn emit_index(&mut self, col: &Column, index: usize, back: u8) {
        let var_ref = VarRef {
            col: col.clone(),
            index,
            back,
        };
        self.frag.push((Opcode::LoadIndex(0), Some(var_ref)));
    }

    fn r#var(&mut self, prog: &mut Program, col: &Column, name: &Rc<str>, value: u8) -> Result<()> {
        let index = prog.declare(name, value).map_err(|e| e.in_column(col))?;
        let reg = self.scratch.alloc(col)?;
        self.emit(Opcode::Load(reg, value));
        self.emit_index(col, index, reg);
        self.emit(Opcode::Store(reg));
        Ok(())
    }

    fn add_assign(&mut self, prog: &Program, lhs: &Operand, value: u8) -> Result<()> {
        let reg = self.resolve(prog, &[lhs])?[0];
        self.emit(Opcode::AddImm(reg, value));
        if let Operand::Var(col, name) = lhs {
            let index = self.var_index(prog, col, name)?;
            self.emit_index(col, index, reg);
            self.emit(Opcode::Store(reg));
        }
        Ok(())
    }

    fn assign(&mut self, lhs: &Operand, value: u8) -> Result<()> {
        match lhs {
            Operand::Register(_, reg) => {
                self.emit(Opcode::Load(*reg, value));
                Ok(())
            }
            _ => Err(error!(SyntaxError, ..&lhs.column(); "ONLY REGISTERS CAN BE ASSIGNED")),
        }
    }

    fn draw_char(&mut self, prog: &Program, x: &Operand, y: &Operand, n: &Operand) -> Result<()> {
        let regs = self.resolve(prog, &[x, y, n])?;
        self.emit(Opcode::Glyph(regs[2]));
        self.emit(Opcode::Draw(regs[0], regs[1], 5));
        Ok(())
    }

    fn jump(&mut self, prog: &Program, col: &Column, name: &Rc<str>) -> Result<()> {
        match prog.label(name) {
            Some(addr) => {
                self.emit(Opcode::Jump(addr));
                Ok(())
            }
            None => Err(error!(UndefinedLabel, ..col; name)),
        }
    }

    fn var_index(&self, prog: &Program, col: &Column, name: &str) -> Result<usize> {
        match prog.var().index(name) {
            Some(index) => Ok(index),
            None => Err(error!(UndefinedVariable, ..col; name)),
        }
    }

    /// Put every operand in a register, returning the registers in
    /// argument order. Variables take the low scratch registers and
    /// load highest first, since `Fx65` fills everything below its
    /// target. Literals follow in the next registers.
    fn resolve(&mut self, prog: &Program, operands: &[&Operand]) -> Result<Vec<u8>> {
        let mut regs = vec![0; operands.len()];
        let mut loads: Vec<(u8, usize, Column)> = vec![];
        for (arg, operand) in operands.iter().enumerate() {
            if let Operand::Var(col, name) = operand {
                let index = self.var_index(prog, col, name)?;
                let reg = self.scratch.alloc(col)?;
                regs[arg] = reg;
                loads.push((reg, index, col.clone()));
            }
        }
        for (reg, index, col) in loads.iter().rev() {
            self.emit_index(col, *index, *reg);
            self.emit(Opcode::Fill(*reg));
        }
        for (arg, operand) in operands.iter().enumerate() {
            match operand {
                Operand::Literal(col, value) => {
                    let reg = self.scratch.alloc(col)?;
                    regs[arg] = reg;
                    self.emit(Opcode::Load(reg, *value));
                }
                Operand::Register(_, reg) => regs[arg] = *reg,
                Operand::Var(..) => {}
            }
        }
        Ok(regs)
    }
}
