//! # CHIP-8 Lang
//!
//! A small 8-bit virtual machine and a tiny statement language that
//! compiles to it.
//!
//! The machine has 4K of memory, sixteen byte registers, a 64×32
//! monochrome display, two timers and a sixteen key hex keypad. Raw
//! program images run unchanged. Programs can also be written in a
//! statement language with variables, labels and a glyph drawing
//! intrinsic.
//!
//! ```text
//! var x = 0;
//! label(top);
//! draw_char(x, 4, 10);
//! x += 5;
//! jump(top);
//! ```
//!
//! Run a program image with `chip8 --rom file.ch8` or compile and run
//! source with `chip8 --source file.c8s`. Ctrl-C or Escape enters the
//! debugger.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod __Language;

pub mod lang;
pub mod mach;
