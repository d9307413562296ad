use super::Address;
use crate::error;
use crate::lang::Error;
use std::collections::HashMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// ## Variable memory
///
/// Compile-time table of declared variables. Each declaration takes
/// the next byte; the base address is chosen by the program layout.

#[derive(Debug, Default, Clone)]
pub struct Var {
    names: HashMap<Rc<str>, usize>,
    slots: Vec<Slot>,
    base: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub name: Rc<str>,
    pub default: u8,
    pub address: Address,
}

impl Var {
    pub fn new(base: Address) -> Var {
        Var {
            base,
            ..Var::default()
        }
    }

    /// Allocate the next byte for `name`, returning its index.
    pub fn declare(&mut self, name: &Rc<str>, default: u8) -> Result<usize> {
        if self.names.contains_key(name) {
            return Err(error!(DuplicateDefinition; name));
        }
        let index = self.slots.len();
        self.names.insert(name.clone(), index);
        self.slots.push(Slot {
            name: name.clone(),
            default,
            address: self.base + index as Address,
        });
        Ok(index)
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn address(&self, name: &str) -> Option<Address> {
        self.index(name).map(|idx| self.slots[idx].address)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Move every slot so the first lands at `base`.
    pub fn place(&mut self, base: Address) {
        self.base = base;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            slot.address = base + index as Address;
        }
    }
}
