/*!
## Rust Machine Module

This Rust module is the virtual machine and the code generator that
targets it. Both sides meet at [`Opcode`], which owns the 16-bit
instruction encoding.

*/

pub type Address = u16;

/// Size of the address space in bytes.
pub const MEMORY_SIZE: usize = 4096;
/// Where loaded code and compiler-allocated variables begin.
pub const PROGRAM_ORIGIN: Address = 0x200;
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const STACK_SIZE: usize = 16;
pub const KEY_COUNT: usize = 16;
/// Register used as the carry, borrow and collision flag.
pub const FLAG: usize = 0xF;

mod compile;
mod font;
mod link;
mod listing;
mod opcode;
mod operation;
mod program;
mod runtime;
mod stack;
mod state;
mod var;

pub use font::FONT;
pub use link::Link;
pub use listing::Listing;
pub use opcode::Opcode;
pub use operation::{execute, step, Options, Step};
pub use program::{Layout, Program};
pub use runtime::{Event, Runtime};
pub use stack::Stack;
pub use state::State;
pub use var::{Slot, Var};

#[cfg(test)]
mod tests;
