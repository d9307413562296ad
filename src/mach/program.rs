use super::link::VarRef;
use super::{compile, Address, Link, Opcode, Var, MEMORY_SIZE, PROGRAM_ORIGIN};
use crate::error;
use crate::lang::{lex, parse, Error};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// Where variable storage goes relative to the code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Variables start at the program origin, on top of the code.
    Origin,
    /// Variables start at the first byte after the code.
    AfterCode,
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::Origin
    }
}

/// ## Compiled program
///
/// The instruction stream with its variable table, labels and
/// diagnostics. Errors are collected rather than returned so one
/// bad statement doesn't hide the next.

#[derive(Debug, Clone)]
pub struct Program {
    ops: Vec<Opcode>,
    layout: Layout,
    var: Var,
    link: Link,
    errors: Vec<Error>,
    warnings: Vec<Error>,
    statement: usize,
}

impl Default for Program {
    fn default() -> Program {
        Program::new(Layout::default())
    }
}

impl Program {
    pub fn new(layout: Layout) -> Program {
        Program {
            ops: vec![],
            layout,
            var: Var::new(PROGRAM_ORIGIN),
            link: Link::new(),
            errors: vec![],
            warnings: vec![],
            statement: 0,
        }
    }

    /// Compile program text. Check `errors()` before loading.
    pub fn compile(source: &str, layout: Layout) -> Program {
        let mut program = Program::new(layout);
        for (col, text) in lex(source) {
            program.statement += 1;
            match parse(&col, text) {
                Ok(Some(statement)) => {
                    log::trace!("{}: {}", program.statement, statement);
                    if let Err(error) = compile::compile(&mut program, &statement) {
                        program.error(error);
                    }
                }
                Ok(None) => log::trace!("{}: ignored {:?}", program.statement, text),
                Err(error) => program.error(error),
            }
        }
        program.finish();
        program
    }

    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn var(&self) -> &Var {
        &self.var
    }

    pub fn link(&self) -> &Link {
        &self.link
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn warnings(&self) -> &[Error] {
        &self.warnings
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Address of the byte after the last instruction.
    pub fn end(&self) -> Address {
        PROGRAM_ORIGIN + 2 * self.ops.len() as Address
    }

    pub fn label(&self, name: &str) -> Option<Address> {
        self.link.label(name)
    }

    /// Memory image starting at the program origin.
    pub fn image(&self) -> Vec<u8> {
        self.ops.iter().flat_map(|op| op.to_bytes()).collect()
    }

    pub(super) fn declare(&mut self, name: &Rc<str>, default: u8) -> Result<usize> {
        self.var.declare(name, default)
    }

    pub(super) fn define_label(&mut self, name: &Rc<str>) {
        let addr = self.end();
        if let Some(prev) = self.link.define(name, addr) {
            log::debug!("label {} moved from 0x{:03X} to 0x{:03X}", name, prev, addr);
        }
    }

    pub(super) fn append(&mut self, frag: Vec<(Opcode, Option<VarRef>)>) -> Result<()> {
        let capacity = (MEMORY_SIZE - PROGRAM_ORIGIN as usize) / 2;
        if self.ops.len() + frag.len() > capacity {
            return Err(error!(OutOfMemory; "PROGRAM TOO LARGE"));
        }
        for (op, var_ref) in frag {
            if let Some(var_ref) = var_ref {
                self.link.link_var(self.ops.len(), self.statement, var_ref);
            }
            self.ops.push(op);
        }
        Ok(())
    }

    fn error(&mut self, error: Error) {
        self.errors.push(error.in_statement(self.statement));
    }

    fn finish(&mut self) {
        if self.layout == Layout::AfterCode {
            self.var.place(self.end());
        }
        let var_end = self.var.base() as usize + self.var.len();
        if var_end > MEMORY_SIZE {
            self.errors.push(error!(OutOfMemory; "TOO MANY VARIABLES"));
            return;
        }
        let mut errors = self.link.link(&mut self.ops, &self.var);
        self.errors.append(&mut errors);
        let end = self.end();
        for slot in self.var.iter().filter(|slot| slot.address < end) {
            log::warn!("variable {} at 0x{:03X} overlaps code", slot.name, slot.address);
            self.warnings
                .push(error!(VariableOverlapsCode; &format!("{} 0x{:03X}", slot.name, slot.address)));
        }
    }
}
