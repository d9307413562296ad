use super::{Address, Opcode, Var};
use crate::error;
use crate::lang::{Column, Error};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

/// An emitted `LD I` that must point `back` bytes before a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarRef {
    pub col: Column,
    pub index: usize,
    pub back: u8,
}

/// ## Symbol table
///
/// Labels resolve immediately to the address of the next statement.
/// Variable references are patched once the variable base is known.

#[derive(Debug, Default, Clone)]
pub struct Link {
    symbols: HashMap<Rc<str>, Address>,
    unlinked: BTreeMap<usize, (usize, VarRef)>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    /// Record a label, replacing any earlier address for the name.
    pub fn define(&mut self, name: &Rc<str>, addr: Address) -> Option<Address> {
        self.symbols.insert(name.clone(), addr)
    }

    pub fn label(&self, name: &str) -> Option<Address> {
        self.symbols.get(name).copied()
    }

    pub fn labels(&self) -> impl Iterator<Item = (&str, Address)> {
        self.symbols.iter().map(|(name, addr)| (name.as_ref(), *addr))
    }

    pub fn link_var(&mut self, op_index: usize, statement: usize, var: VarRef) {
        self.unlinked.insert(op_index, (statement, var));
    }

    pub fn unlinked_len(&self) -> usize {
        self.unlinked.len()
    }

    /// Patch every pending variable reference in `ops`.
    pub fn link(&mut self, ops: &mut [Opcode], var: &Var) -> Vec<Error> {
        let mut errors: Vec<Error> = vec![];
        for (op_index, (statement, var_ref)) in std::mem::take(&mut self.unlinked) {
            let dest = var
                .get(var_ref.index)
                .and_then(|slot| slot.address.checked_sub(var_ref.back as Address));
            if let (Some(dest), Some(op)) = (dest, ops.get_mut(op_index)) {
                if let Opcode::LoadIndex(_) = op {
                    *op = Opcode::LoadIndex(dest);
                    continue;
                }
            }
            let error = error!(InternalError, ..&var_ref.col; "LINK FAILURE");
            errors.push(error.in_statement(statement));
        }
        errors
    }
}
