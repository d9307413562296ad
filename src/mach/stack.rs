use super::{Address, STACK_SIZE};
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// ## Size limited call stack
///
/// Return addresses live in a fixed array. Pushing onto a full stack
/// or popping an empty one is an error and leaves the stack unchanged.

#[derive(Clone, PartialEq, Eq)]
pub struct Stack {
    vec: [Address; STACK_SIZE],
    len: usize,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:03X?}", &self.vec[..self.len])
    }
}

impl Default for Stack {
    fn default() -> Stack {
        Stack::new()
    }
}

impl Stack {
    pub fn new() -> Stack {
        Stack {
            vec: [0; STACK_SIZE],
            len: 0,
        }
    }
    fn max_len(&self) -> usize {
        STACK_SIZE
    }
    /// Entries in use, the stack pointer.
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn is_full(&self) -> bool {
        self.len == self.max_len()
    }
    pub fn last(&self) -> Option<&Address> {
        self.as_slice().last()
    }
    pub fn as_slice(&self) -> &[Address] {
        &self.vec[..self.len]
    }
    pub fn push(&mut self, addr: Address) -> Result<()> {
        if self.is_full() {
            return Err(error!(StackOverflow));
        }
        self.vec[self.len] = addr;
        self.len += 1;
        Ok(())
    }
    pub fn pop(&mut self) -> Result<Address> {
        if self.is_empty() {
            return Err(error!(StackUnderflow));
        }
        self.len -= 1;
        Ok(self.vec[self.len])
    }
}
